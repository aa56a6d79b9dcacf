//! Project, version and dependency models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A package on one platform.
///
/// Returned by the project endpoint, project search and most list
/// endpoints. Fields libraries.io omits for some platforms default to
/// empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Package name.
    pub name: String,

    /// Package manager (e.g. "Pypi").
    pub platform: String,

    /// Short description.
    #[serde(default)]
    pub description: Option<String>,

    /// Project homepage.
    #[serde(default)]
    pub homepage: Option<String>,

    /// Source repository URL.
    #[serde(default)]
    pub repository_url: Option<String>,

    /// Primary language.
    #[serde(default)]
    pub language: Option<String>,

    /// SPDX identifiers.
    #[serde(default)]
    pub normalized_licenses: Vec<String>,

    /// Keywords from the manifest and repository topics.
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Repository stars.
    #[serde(default)]
    pub stars: u64,

    /// Repository forks.
    #[serde(default)]
    pub forks: u64,

    /// SourceRank score.
    #[serde(default)]
    pub rank: i64,

    /// Packages depending on this one.
    #[serde(default)]
    pub dependents_count: u64,

    /// Repositories depending on this one.
    #[serde(default)]
    pub dependent_repos_count: u64,

    /// Newest version number.
    #[serde(default)]
    pub latest_release_number: Option<String>,

    /// When the newest version was published.
    #[serde(default)]
    pub latest_release_published_at: Option<DateTime<Utc>>,

    /// Newest non-prerelease version number.
    #[serde(default)]
    pub latest_stable_release_number: Option<String>,

    /// Published versions.
    #[serde(default)]
    pub versions: Vec<Version>,
}

/// A published version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    /// Version string.
    pub number: String,

    /// Publication time.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// A project together with the dependencies of one of its versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDependencies {
    /// The project itself.
    #[serde(flatten)]
    pub project: Project,

    /// Version the dependencies belong to.
    #[serde(default)]
    pub dependencies_for_version: Option<String>,

    /// Declared dependencies.
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

/// One declared dependency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    /// Name of the depended-upon package.
    pub project_name: String,

    /// Its package manager.
    #[serde(default)]
    pub platform: Option<String>,

    /// Version requirement as written in the manifest.
    #[serde(default)]
    pub requirements: Option<String>,

    /// Newest stable version available.
    #[serde(default)]
    pub latest_stable: Option<String>,

    /// Newest version available.
    #[serde(default)]
    pub latest: Option<String>,

    /// Whether the package is deprecated.
    #[serde(default)]
    pub deprecated: Option<bool>,

    /// Whether the requirement excludes the newest stable version.
    #[serde(default)]
    pub outdated: Option<bool>,

    /// Manifest the dependency was read from (repository dependencies only).
    #[serde(default)]
    pub filepath: Option<String>,

    /// Dependency kind ("runtime", "development", ...).
    #[serde(default)]
    pub kind: Option<String>,
}

impl Project {
    /// Latest version number, preferring stable releases.
    pub fn latest_version(&self) -> Option<&str> {
        self.latest_stable_release_number
            .as_deref()
            .or(self.latest_release_number.as_deref())
    }

    /// Licenses joined for display.
    pub fn license_summary(&self) -> String {
        if self.normalized_licenses.is_empty() {
            "-".to_string()
        } else {
            self.normalized_licenses.join(", ")
        }
    }
}

impl Dependency {
    /// Whether the dependency needs attention.
    pub fn needs_attention(&self) -> bool {
        self.outdated.unwrap_or(false) || self.deprecated.unwrap_or(false)
    }
}

/// SourceRank breakdown of a project.
///
/// Each field is the score contributed by one criterion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceRank {
    #[serde(default)]
    pub basic_info_present: i64,
    #[serde(default)]
    pub repository_present: i64,
    #[serde(default)]
    pub readme_present: i64,
    #[serde(default)]
    pub license_present: i64,
    #[serde(default)]
    pub versions_present: i64,
    #[serde(default)]
    pub follows_semver: i64,
    #[serde(default)]
    pub recent_release: i64,
    #[serde(default)]
    pub not_brand_new: i64,
    #[serde(default)]
    pub is_deprecated: i64,
    #[serde(default)]
    pub is_unmaintained: i64,
    #[serde(default)]
    pub is_removed: i64,
    #[serde(default)]
    pub any_outdated_dependencies: i64,
    #[serde(default)]
    pub all_prereleases: i64,
    #[serde(default)]
    pub one_point_oh: i64,
    #[serde(default)]
    pub dependent_projects: i64,
    #[serde(default)]
    pub dependent_repositories: i64,
    #[serde(default)]
    pub stars: i64,
    #[serde(default)]
    pub contributors: i64,
    #[serde(default)]
    pub subscribers: i64,
}

impl SourceRank {
    /// Sum of all criteria, i.e. the project's rank.
    pub fn total(&self) -> i64 {
        [
            self.basic_info_present,
            self.repository_present,
            self.readme_present,
            self.license_present,
            self.versions_present,
            self.follows_semver,
            self.recent_release,
            self.not_brand_new,
            self.is_deprecated,
            self.is_unmaintained,
            self.is_removed,
            self.any_outdated_dependencies,
            self.all_prereleases,
            self.one_point_oh,
            self.dependent_projects,
            self.dependent_repositories,
            self.stars,
            self.contributors,
            self.subscribers,
        ]
        .iter()
        .sum()
    }
}
