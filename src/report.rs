//! Plain-text report rendering.
//!
//! The report is two labeled lists: external (GitHub) sources first, then
//! internal (GitLab) ones. A section passed as `None` was not checked at all
//! and is omitted entirely, which is how the `--github-only`/`--gitlab-only`
//! filters surface here.

use colored::Colorize;

/// Header printed above the external (GitHub) findings.
pub const EXTERNAL_HEADER: &str = "External repos that's not using tag:";
/// Header printed above the internal (GitLab) findings.
pub const INTERNAL_HEADER: &str = "Internal repos that's not using tag:";

/// Render the findings. With `quiet` set, only the flagged URLs are emitted.
pub fn format_report(
    github: Option<&[String]>,
    gitlab: Option<&[String]>,
    quiet: bool,
) -> String {
    let mut output: Vec<String> = Vec::new();

    if let Some(urls) = github {
        if !quiet {
            output.push(EXTERNAL_HEADER.bold().to_string());
        }
        output.extend(urls.iter().cloned());
    }

    if let Some(urls) = gitlab {
        if github.is_some() {
            output.push(String::new());
        }
        if !quiet {
            output.push(INTERNAL_HEADER.bold().to_string());
        }
        output.extend(urls.iter().cloned());
    }

    output.join("\n")
}
