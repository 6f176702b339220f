//! GitHub tag lookups and unpinned-dependency detection.
//!
//! The flagging logic in [`find_unpinned`] is pure set bookkeeping over a
//! fetched tag list; the network side lives in [`GithubClient`] and is
//! injected as a callback so the logic stays testable offline.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::thread;
use std::time::Duration;
use ureq::Agent;

use crate::config::GithubConfig;
use crate::puppetfile::{Dependency, GithubRepo};

#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
}

/// Thin client over the GitHub REST API.
pub struct GithubClient {
    agent: Agent,
    api_url: String,
    token: String,
    delay: Duration,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Self {
        Self {
            agent: Agent::new(),
            api_url: config.api_url.clone(),
            token: config.token.clone(),
            delay: Duration::from_millis(config.delay_ms),
        }
    }

    /// Fetch the tag names of a repository.
    ///
    /// Returns `Ok(None)` on any non-success status (missing repo, bad
    /// token, rate limit) so the caller can skip that repository. Transport
    /// failures propagate. Every call is followed by a fixed pause to stay
    /// under the API rate limit.
    pub fn list_tags(&self, repo: &GithubRepo) -> Result<Option<Vec<String>>> {
        let url = format!("{}/repos/{}/{}/tags", self.api_url, repo.owner, repo.repo);
        let response = self
            .agent
            .get(&url)
            .set("Authorization", &format!("token {}", self.token))
            .call();
        thread::sleep(self.delay);

        match response {
            Ok(response) => {
                let tags: Vec<Tag> = response.into_json().with_context(|| {
                    format!("Failed to decode tag list for {}/{}", repo.owner, repo.repo)
                })?;
                Ok(Some(tags.into_iter().map(|tag| tag.name).collect()))
            }
            Err(ureq::Error::Status(_, _)) => Ok(None),
            Err(e) => Err(e).with_context(|| {
                format!("GitHub request failed for {}/{}", repo.owner, repo.repo)
            }),
        }
    }
}

/// Flag every GitHub-hosted dependency whose pin matches none of its
/// repository's published tag names.
///
/// `fetch` returns the tag names for one repository, or `None` when the
/// lookup was refused; refused repositories are skipped without a finding.
/// A dependency line matches a repository when its source URL contains the
/// owner, the repository name, and the literal `github`. The result is
/// de-duplicated in first-seen order.
pub fn find_unpinned(
    deps: &[Dependency],
    repos: &[GithubRepo],
    fetch: &mut dyn FnMut(&GithubRepo) -> Result<Option<Vec<String>>>,
) -> Result<Vec<String>> {
    let mut flagged: Vec<String> = Vec::new();

    for repo in repos {
        let tags = match fetch(repo)? {
            Some(tags) => tags,
            None => continue,
        };

        for dep in deps {
            let matches_repo = dep.source.contains(&repo.owner)
                && dep.source.contains(&repo.repo)
                && dep.source.contains("github");
            if !matches_repo {
                continue;
            }

            if tags.iter().any(|tag| tag == &dep.pin) {
                continue;
            }

            if !flagged.contains(&dep.source) {
                flagged.push(dep.source.clone());
            }
        }
    }

    Ok(flagged)
}
