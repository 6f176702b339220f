//! # Pinlint - Puppetfile pin auditing
//!
//! Pinlint cross-checks the version pins declared in a Puppetfile against the
//! tag lists published by the upstream hosting services and reports which
//! dependencies are not pinned to a released tag.
//!
//! ## Overview
//!
//! A Puppetfile declares each external module with a `:git`/`:svn` source line
//! followed by a `:tag`/`:ref`/`:commit`/`:branch` pin line. The pin may name
//! a published tag, or it may be a raw commit hash, a branch, or anything
//! else. Pinlint fetches the real tag list for every GitHub-hosted module and
//! for every module that belongs to a configured GitLab group, and flags the
//! sources whose pin matches none of the published tag names.
//!
//! ## Modules
//!
//! - [`puppetfile`] - Puppetfile scanning and source/pin pairing
//! - [`github`] - GitHub tag lookups and unpinned-dependency detection
//! - [`gitlab`] - GitLab group resolution and unpinned-dependency detection
//! - [`report`] - Plain-text report rendering
//! - [`config`] - Configuration loading with built-in defaults
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use pinlint::puppetfile;
//!
//! let scan = puppetfile::scan(Path::new("Puppetfile"))
//!     .expect("Failed to read Puppetfile")
//!     .unwrap_or_default();
//!
//! for dep in &scan.dependencies {
//!     println!("{} pinned to {}", dep.source, dep.pin);
//! }
//! ```

pub mod config;
pub mod github;
pub mod gitlab;
pub mod puppetfile;
pub mod report;

/// Built-in defaults matching a bare, unconfigured run.
pub mod defaults {
    /// GitHub REST API base URL
    pub const GITHUB_API_URL: &str = "https://api.github.com";
    /// Self-hosted GitLab API base URL
    pub const GITLAB_API_URL: &str = "https://gitlab.company.com/api/v3";
    /// GitLab group whose projects count as internal dependencies
    pub const GITLAB_GROUP_ID: u64 = 123;
    /// Puppetfile location relative to the working directory
    pub const PUPPETFILE: &str = "Puppetfile";
    /// Pause between GitHub requests to stay under the API rate limit
    pub const GITHUB_DELAY_MS: u64 = 500;
    /// Configuration file location relative to the working directory
    pub const CONFIG_FILE: &str = ".pinlint.yml";
}
