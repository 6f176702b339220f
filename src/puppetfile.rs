//! Puppetfile scanning.
//!
//! Extracts (source URL, pin value) pairs from a Puppetfile. Sources come
//! from `:git`/`:svn` lines, pins from `:tag`/`:ref`/`:commit`/`:branch`
//! lines, and the two are paired purely by their order in the file. A file
//! where the counts disagree cannot be paired and yields no scan at all.

use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::Path;

/// A single manifest entry: where the module comes from and what it is
/// pinned to. The pin may be a tag name, commit hash, branch, or ref; the
/// scanner does not distinguish between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub source: String,
    pub pin: String,
}

/// A GitHub-hosted module source, split into its owner and repository
/// components with any trailing `.git` stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubRepo {
    pub owner: String,
    pub repo: String,
}

/// Everything a single pass over the Puppetfile produces: all dependencies
/// in file order, plus the ordered subsequence hosted on GitHub.
#[derive(Debug, Clone, Default)]
pub struct Scan {
    pub dependencies: Vec<Dependency>,
    pub github_repos: Vec<GithubRepo>,
}

/// Scan a Puppetfile on disk.
///
/// Returns `Ok(None)` when the source and pin line counts disagree, since
/// order-based pairing is meaningless in that case.
pub fn scan(path: &Path) -> Result<Option<Scan>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read Puppetfile at {}", path.display()))?;
    Ok(scan_content(&content))
}

/// Scan Puppetfile content that is already in memory.
pub fn scan_content(content: &str) -> Option<Scan> {
    let regex_source = Regex::new(r#"(?i)^:(?:git|svn)\s+=>\s+['"](.+)['"],"#).unwrap();
    let regex_pin = Regex::new(r#"(?i)^:(?:ref|tag|commit|branch)\s+=>\s+['"](.+)['"],?"#).unwrap();
    let regex_github =
        Regex::new(r#"(?i)^:(?:git|svn)\s+=>\s+['"]https://github\.com/(.+)/(.+?)['"],?"#).unwrap();

    let mut sources = Vec::new();
    let mut pins = Vec::new();
    let mut github_repos = Vec::new();

    for line in content.lines() {
        let line = line.trim();

        if let Some(captures) = regex_source.captures(line) {
            sources.push(captures[1].to_string());
        }

        if let Some(captures) = regex_pin.captures(line) {
            pins.push(captures[1].to_string());
        }

        if let Some(captures) = regex_github.captures(line) {
            let repo = captures[2].strip_suffix(".git").unwrap_or(&captures[2]);
            github_repos.push(GithubRepo {
                owner: captures[1].to_string(),
                repo: repo.to_string(),
            });
        }
    }

    // Pairing is positional, so a count mismatch invalidates the whole scan.
    if sources.len() != pins.len() {
        return None;
    }

    let dependencies = sources
        .into_iter()
        .zip(pins)
        .map(|(source, pin)| Dependency { source, pin })
        .collect();

    Some(Scan {
        dependencies,
        github_repos,
    })
}
