//! Configuration loading for pinlint.
//!
//! Everything has a built-in default (see [`crate::defaults`]); an optional
//! `.pinlint.yml` next to the Puppetfile overrides them, and the API tokens
//! fall back to environment variables when the file leaves them empty.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults;

/// Environment fallback for the GitHub API token.
pub const GITHUB_TOKEN_ENV: &str = "PINLINT_GITHUB_TOKEN";
/// Environment fallback for the GitLab API token.
pub const GITLAB_TOKEN_ENV: &str = "PINLINT_GITLAB_TOKEN";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_puppetfile")]
    pub puppetfile: PathBuf,
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub gitlab: GitlabConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    #[serde(default = "default_github_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_github_delay_ms")]
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitlabConfig {
    #[serde(default = "default_gitlab_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_gitlab_group_id")]
    pub group_id: u64,
}

fn default_puppetfile() -> PathBuf {
    PathBuf::from(defaults::PUPPETFILE)
}

fn default_github_api_url() -> String {
    defaults::GITHUB_API_URL.to_string()
}

fn default_github_delay_ms() -> u64 {
    defaults::GITHUB_DELAY_MS
}

fn default_gitlab_api_url() -> String {
    defaults::GITLAB_API_URL.to_string()
}

fn default_gitlab_group_id() -> u64 {
    defaults::GITLAB_GROUP_ID
}

impl Default for Config {
    fn default() -> Self {
        Self {
            puppetfile: default_puppetfile(),
            github: GithubConfig::default(),
            gitlab: GitlabConfig::default(),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_github_api_url(),
            token: String::new(),
            delay_ms: default_github_delay_ms(),
        }
    }
}

impl Default for GitlabConfig {
    fn default() -> Self {
        Self {
            api_url: default_gitlab_api_url(),
            token: String::new(),
            group_id: default_gitlab_group_id(),
        }
    }
}

impl Config {
    /// Load `.pinlint.yml` from the working directory, or pure defaults
    /// when no such file exists.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(defaults::CONFIG_FILE))
    }

    /// Load configuration from a specific file. A missing file is not an
    /// error; it simply yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            Self::parse(&content)?
        } else {
            Self::default()
        };

        config.apply_env_tokens();
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse config")
    }

    /// Fill empty tokens from the environment. File values win.
    fn apply_env_tokens(&mut self) {
        if self.github.token.is_empty() {
            if let Ok(token) = std::env::var(GITHUB_TOKEN_ENV) {
                self.github.token = token;
            }
        }
        if self.gitlab.token.is_empty() {
            if let Ok(token) = std::env::var(GITLAB_TOKEN_ENV) {
                self.gitlab.token = token;
            }
        }
    }
}
