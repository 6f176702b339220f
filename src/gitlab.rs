//! GitLab group resolution and unpinned-dependency detection.
//!
//! Internal dependencies are matched by exact clone-URL equality against the
//! projects of one configured group. As with the GitHub side, the flagging
//! logic takes an injected tag fetcher so it can run without a network.

use anyhow::{Context, Result};
use serde::Deserialize;
use ureq::Agent;

use crate::config::GitlabConfig;
use crate::puppetfile::Dependency;

/// A project inside the configured GitLab group. Manifest sources are
/// resolved to a project id by comparing against both clone URLs.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: u64,
    pub http_url_to_repo: String,
    pub ssh_url_to_repo: String,
}

#[derive(Debug, Deserialize)]
struct Group {
    projects: Vec<Project>,
}

#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
}

/// Thin client over the self-hosted GitLab API.
pub struct GitlabClient {
    agent: Agent,
    api_url: String,
    token: String,
}

impl GitlabClient {
    pub fn new(config: &GitlabConfig) -> Self {
        Self {
            agent: Agent::new(),
            api_url: config.api_url.clone(),
            token: config.token.clone(),
        }
    }

    /// Fetch all projects of a group. `Ok(None)` on any non-success status;
    /// the caller then has nothing to check.
    pub fn group_projects(&self, group_id: u64) -> Result<Option<Vec<Project>>> {
        let url = format!("{}/groups/{}", self.api_url, group_id);
        let response = self
            .agent
            .get(&url)
            .set("PRIVATE-TOKEN", &self.token)
            .call();

        match response {
            Ok(response) => {
                let group: Group = response
                    .into_json()
                    .with_context(|| format!("Failed to decode GitLab group {}", group_id))?;
                Ok(Some(group.projects))
            }
            Err(ureq::Error::Status(_, _)) => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("GitLab request failed for group {}", group_id))
            }
        }
    }

    /// Fetch the tag names of a project. `Ok(None)` on any non-success
    /// status so the caller can skip that project.
    pub fn list_tags(&self, project_id: u64) -> Result<Option<Vec<String>>> {
        let url = format!("{}/projects/{}/repository/tags", self.api_url, project_id);
        let response = self
            .agent
            .get(&url)
            .set("PRIVATE-TOKEN", &self.token)
            .call();

        match response {
            Ok(response) => {
                let tags: Vec<Tag> = response.into_json().with_context(|| {
                    format!("Failed to decode tag list for project {}", project_id)
                })?;
                Ok(Some(tags.into_iter().map(|tag| tag.name).collect()))
            }
            Err(ureq::Error::Status(_, _)) => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("GitLab request failed for project {}", project_id))
            }
        }
    }
}

/// Flag every dependency whose source equals one of a project's clone URLs
/// and whose pin matches none of that project's tag names.
///
/// Tags are fetched at most once per project, and only for projects that
/// some dependency actually references. Projects whose tag lookup was
/// refused are skipped without a finding.
pub fn find_unpinned(
    deps: &[Dependency],
    projects: &[Project],
    fetch: &mut dyn FnMut(u64) -> Result<Option<Vec<String>>>,
) -> Result<Vec<String>> {
    let mut flagged: Vec<String> = Vec::new();

    for project in projects {
        let matched: Vec<&Dependency> = deps
            .iter()
            .filter(|dep| {
                dep.source == project.http_url_to_repo || dep.source == project.ssh_url_to_repo
            })
            .collect();
        if matched.is_empty() {
            continue;
        }

        let tags = match fetch(project.id)? {
            Some(tags) => tags,
            None => continue,
        };

        for dep in matched {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn dep(source: &str, pin: &str) -> Dependency {
        Dependency {
            source: source.to_string(),
            pin: pin.to_string(),
        }
    }

    fn project(id: u64, name: &str) -> Project {
        Project {
            id,
            http_url_to_repo: format!("https://gitlab.company.com/puppet/{}.git", name),
            ssh_url_to_repo: format!("git@gitlab.company.com:puppet/{}.git", name),
        }
    }

    #[test]
    fn test_ssh_source_with_missing_pin_is_flagged() {
        let deps = vec![dep("git@gitlab.company.com:puppet/varnish.git", "master")];
        let projects = vec![project(7, "varnish")];

        let flagged = find_unpinned(&deps, &projects, &mut |_| {
            Ok(Some(vec!["v1.0".to_string()]))
        })
        .unwrap();

        assert_eq!(
            flagged,
            vec!["git@gitlab.company.com:puppet/varnish.git".to_string()]
        );
    }

    #[test]
    fn test_http_source_matches_too() {
        let deps = vec![dep("https://gitlab.company.com/puppet/varnish.git", "v1.0")];
        let projects = vec![project(7, "varnish")];

        let flagged = find_unpinned(&deps, &projects, &mut |_| {
            Ok(Some(vec!["v1.0".to_string()]))
        })
        .unwrap();

        assert!(flagged.is_empty());
    }

    #[test]
    fn test_unknown_source_is_ignored() {
        let deps = vec![dep("git@gitlab.company.com:puppet/systemd.git", "master")];
        let projects = vec![project(7, "varnish")];
        let mut calls = 0;

        let flagged = find_unpinned(&deps, &projects, &mut |_| {
            calls += 1;
            Ok(Some(vec![]))
        })
        .unwrap();

        assert!(flagged.is_empty());
        // No dependency references the project, so its tags are never fetched
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_tags_fetched_once_per_project() {
        let deps = vec![
            dep("git@gitlab.company.com:puppet/varnish.git", "a"),
            dep("https://gitlab.company.com/puppet/varnish.git", "b"),
        ];
        let projects = vec![project(7, "varnish")];
        let mut calls = 0;

        let flagged = find_unpinned(&deps, &projects, &mut |_| {
            calls += 1;
            Ok(Some(vec![]))
        })
        .unwrap();

        assert_eq!(calls, 1);
        assert_eq!(flagged.len(), 2);
    }

    #[test]
    fn test_refused_tag_lookup_is_skipped() {
        let deps = vec![dep("git@gitlab.company.com:puppet/varnish.git", "master")];
        let projects = vec![project(7, "varnish")];

        let flagged = find_unpinned(&deps, &projects, &mut |_| Ok(None)).unwrap();

        assert!(flagged.is_empty());
    }

    #[test]
    fn test_no_projects_means_no_findings() {
        let deps = vec![dep("git@gitlab.company.com:puppet/varnish.git", "master")];

        let flagged = find_unpinned(&deps, &[], &mut |_| Ok(Some(vec![]))).unwrap();

        assert!(flagged.is_empty());
    }

    #[test]
    fn test_fetch_error_propagates() {
        let deps = vec![dep("git@gitlab.company.com:puppet/varnish.git", "master")];
        let projects = vec![project(7, "varnish")];

        let result = find_unpinned(&deps, &projects, &mut |_| {
            Err(anyhow::anyhow!("connection reset"))
        });

        assert!(result.is_err());
    }

    #[test]
    fn test_group_payload_shape_deserializes() {
        let json = r#"{
            "id": 123,
            "name": "puppet",
            "projects": [
                {
                    "id": 7,
                    "http_url_to_repo": "https://gitlab.company.com/puppet/varnish.git",
                    "ssh_url_to_repo": "git@gitlab.company.com:puppet/varnish.git",
                    "name": "varnish"
                }
            ]
        }"#;
        let group: Group = serde_json::from_str(json).unwrap();
        assert_eq!(group.projects.len(), 1);
        assert_eq!(group.projects[0].id, 7);
    }
}
