//! Repository model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A source repository tracked by libraries.io.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// `owner/name`.
    pub full_name: String,

    /// Hosting service ("GitHub", "GitLab", "Bitbucket").
    #[serde(default)]
    pub host_type: Option<String>,

    /// Repository description.
    #[serde(default)]
    pub description: Option<String>,

    /// Primary language.
    #[serde(default)]
    pub language: Option<String>,

    /// SPDX license identifier.
    #[serde(default)]
    pub license: Option<String>,

    /// Stars on the host.
    #[serde(default)]
    pub stargazers_count: u64,

    /// Forks on the host.
    #[serde(default)]
    pub forks_count: u64,

    /// Open issues on the host.
    #[serde(default)]
    pub open_issues_count: u64,

    /// Whether this repository is a fork.
    #[serde(default)]
    pub fork: bool,

    /// Whether the repository is archived.
    #[serde(default)]
    pub archived: bool,

    /// Last push to the default branch.
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,

    /// SourceRank score.
    #[serde(default)]
    pub rank: Option<i64>,
}

impl Repository {
    /// Owner part of `full_name`.
    pub fn owner(&self) -> &str {
        self.full_name.split('/').next().unwrap_or_default()
    }
}
