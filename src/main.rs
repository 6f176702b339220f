//! CLI entry point for pinlint.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use pinlint::config::Config;
use pinlint::github::{self, GithubClient};
use pinlint::gitlab::{self, GitlabClient};
use pinlint::puppetfile;
use pinlint::report;

#[derive(Parser)]
#[command(name = "pinlint")]
#[command(version)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("GIT_SHA"),
    "\nbuilt: ",
    env!("BUILD_DATE"),
))]
#[command(about = "Audit Puppetfile pins against upstream tag lists", long_about = None)]
struct Cli {
    /// Path to the Puppetfile to audit (overrides the config file)
    #[arg(long, value_name = "PATH")]
    puppetfile: Option<PathBuf>,

    /// Path to the config file (default: .pinlint.yml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print flagged URLs only, without section headers
    #[arg(short, long)]
    quiet: bool,

    /// Check GitHub-hosted dependencies only
    #[arg(long, conflicts_with = "gitlab_only")]
    github_only: bool,

    /// Check GitLab-hosted dependencies only
    #[arg(long)]
    gitlab_only: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let puppetfile_path = cli
        .puppetfile
        .clone()
        .unwrap_or_else(|| config.puppetfile.clone());

    // A scan with mismatched source/pin counts pairs nothing; both checkers
    // then have nothing to flag.
    let scan = puppetfile::scan(&puppetfile_path)?.unwrap_or_default();

    let github_unpinned = if cli.gitlab_only {
        None
    } else {
        let client = GithubClient::new(&config.github);
        Some(github::find_unpinned(
            &scan.dependencies,
            &scan.github_repos,
            &mut |repo| client.list_tags(repo),
        )?)
    };

    let gitlab_unpinned = if cli.github_only {
        None
    } else {
        let client = GitlabClient::new(&config.gitlab);
        let projects = client
            .group_projects(config.gitlab.group_id)?
            .unwrap_or_default();
        Some(gitlab::find_unpinned(
            &scan.dependencies,
            &projects,
            &mut |project_id| client.list_tags(project_id),
        )?)
    };

    println!(
        "{}",
        report::format_report(
            github_unpinned.as_deref(),
            gitlab_unpinned.as_deref(),
            cli.quiet,
        )
    );

    Ok(())
}
