//! Search catalog: read-only platform, project, repository and user queries.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ArgKey, Cardinality, EndpointFamily, HttpVerb, OperationInfo};
use crate::error::LibrariesError;
use crate::params::{RequestParameters, QUERY, SORT};
use crate::traits::Operation;

const GET: &[HttpVerb] = &[HttpVerb::Get];

const NONE: &[ArgKey] = &[];
const PLATFORM_PROJECT: &[ArgKey] = &[ArgKey::Platform, ArgKey::Project];
const PLATFORM_PROJECT_VERSION: &[ArgKey] = &[ArgKey::Platform, ArgKey::Project, ArgKey::Version];
const HOST_OWNER_REPO: &[ArgKey] = &[ArgKey::Host, ArgKey::Owner, ArgKey::Repo];
const HOST_USER: &[ArgKey] = &[ArgKey::Host, ArgKey::User];

/// Version substituted when a dependency lookup names none.
pub const LATEST_VERSION: &str = "latest";

const fn entry(
    name: &'static str,
    args: &'static [ArgKey],
    tail: &'static [&'static str],
    cardinality: Cardinality,
) -> OperationInfo {
    OperationInfo {
        name,
        family: EndpointFamily::Resource,
        args,
        tail,
        cardinality,
        verbs: GET,
    }
}

const PLATFORMS: OperationInfo = entry("platforms", NONE, &["platforms"], Cardinality::Singleton);
const PROJECT: OperationInfo = entry("project", PLATFORM_PROJECT, &[], Cardinality::Singleton);
const PROJECT_DEPENDENCIES: OperationInfo = entry(
    "project-dependencies",
    PLATFORM_PROJECT_VERSION,
    &["dependencies"],
    Cardinality::Singleton,
);
const PROJECT_DEPENDENTS: OperationInfo = entry(
    "project-dependents",
    PLATFORM_PROJECT,
    &["dependents"],
    Cardinality::Collection,
);
const PROJECT_DEPENDENT_REPOSITORIES: OperationInfo = entry(
    "project-dependent-repositories",
    PLATFORM_PROJECT,
    &["dependent_repositories"],
    Cardinality::Collection,
);
const PROJECT_CONTRIBUTORS: OperationInfo = entry(
    "project-contributors",
    PLATFORM_PROJECT,
    &["contributors"],
    Cardinality::Collection,
);
const PROJECT_SOURCERANK: OperationInfo = entry(
    "project-sourcerank",
    PLATFORM_PROJECT,
    &["sourcerank"],
    Cardinality::Singleton,
);
const PROJECT_USAGE: OperationInfo =
    entry("project-usage", PLATFORM_PROJECT, &["usage"], Cardinality::Singleton);
const PROJECT_SEARCH: OperationInfo =
    entry("project-search", NONE, &["search"], Cardinality::Collection);
const REPOSITORY: OperationInfo = entry("repository", HOST_OWNER_REPO, &[], Cardinality::Singleton);
const REPOSITORY_DEPENDENCIES: OperationInfo = entry(
    "repository-dependencies",
    HOST_OWNER_REPO,
    &["dependencies"],
    Cardinality::Singleton,
);
const REPOSITORY_PROJECTS: OperationInfo = entry(
    "repository-projects",
    HOST_OWNER_REPO,
    &["projects"],
    Cardinality::Collection,
);
const USER: OperationInfo = entry("user", HOST_USER, &[], Cardinality::Singleton);
const USER_REPOSITORIES: OperationInfo = entry(
    "user-repositories",
    HOST_USER,
    &["repositories"],
    Cardinality::Collection,
);
const USER_PACKAGES: OperationInfo =
    entry("user-packages", HOST_USER, &["projects"], Cardinality::Collection);
const USER_PACKAGES_CONTRIBUTIONS: OperationInfo = entry(
    "user-packages-contributions",
    HOST_USER,
    &["project-contributions"],
    Cardinality::Collection,
);
const USER_REPOSITORY_CONTRIBUTIONS: OperationInfo = entry(
    "repository-contributions",
    HOST_USER,
    &["repository-contributions"],
    Cardinality::Collection,
);
const USER_DEPENDENCIES: OperationInfo = entry(
    "user-dependencies",
    HOST_USER,
    &["dependencies"],
    Cardinality::Collection,
);

/// Search operations offered by libraries.io.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchOperation {
    /// Supported package managers.
    Platforms,
    /// A project and its versions.
    Project,
    /// Dependencies of one project version.
    ProjectDependencies,
    /// Projects depending on a project.
    ProjectDependents,
    /// Repositories depending on a project.
    ProjectDependentRepositories,
    /// Users that contributed to a project.
    ProjectContributors,
    /// SourceRank breakdown of a project.
    ProjectSourcerank,
    /// Usage breakdown of a project's versions.
    ProjectUsage,
    /// Free-text project search.
    ProjectSearch,
    /// A repository.
    Repository,
    /// Dependencies declared by a repository.
    RepositoryDependencies,
    /// Packages referencing a repository.
    RepositoryProjects,
    /// A user.
    User,
    /// Repositories owned by a user.
    UserRepositories,
    /// Packages referencing a user's repositories.
    UserPackages,
    /// Packages a user has contributed to.
    UserPackagesContributions,
    /// Repositories a user has contributed to.
    UserRepositoryContributions,
    /// Unique dependencies across a user's repositories.
    UserDependencies,
}

impl SearchOperation {
    /// Every search operation.
    pub const ALL: [SearchOperation; 18] = [
        SearchOperation::Platforms,
        SearchOperation::Project,
        SearchOperation::ProjectDependencies,
        SearchOperation::ProjectDependents,
        SearchOperation::ProjectDependentRepositories,
        SearchOperation::ProjectContributors,
        SearchOperation::ProjectSourcerank,
        SearchOperation::ProjectUsage,
        SearchOperation::ProjectSearch,
        SearchOperation::Repository,
        SearchOperation::RepositoryDependencies,
        SearchOperation::RepositoryProjects,
        SearchOperation::User,
        SearchOperation::UserRepositories,
        SearchOperation::UserPackages,
        SearchOperation::UserPackagesContributions,
        SearchOperation::UserRepositoryContributions,
        SearchOperation::UserDependencies,
    ];
}

impl Operation for SearchOperation {
    type Query = SearchQuery;

    fn info(&self) -> &'static OperationInfo {
        match self {
            SearchOperation::Platforms => &PLATFORMS,
            SearchOperation::Project => &PROJECT,
            SearchOperation::ProjectDependencies => &PROJECT_DEPENDENCIES,
            SearchOperation::ProjectDependents => &PROJECT_DEPENDENTS,
            SearchOperation::ProjectDependentRepositories => &PROJECT_DEPENDENT_REPOSITORIES,
            SearchOperation::ProjectContributors => &PROJECT_CONTRIBUTORS,
            SearchOperation::ProjectSourcerank => &PROJECT_SOURCERANK,
            SearchOperation::ProjectUsage => &PROJECT_USAGE,
            SearchOperation::ProjectSearch => &PROJECT_SEARCH,
            SearchOperation::Repository => &REPOSITORY,
            SearchOperation::RepositoryDependencies => &REPOSITORY_DEPENDENCIES,
            SearchOperation::RepositoryProjects => &REPOSITORY_PROJECTS,
            SearchOperation::User => &USER,
            SearchOperation::UserRepositories => &USER_REPOSITORIES,
            SearchOperation::UserPackages => &USER_PACKAGES,
            SearchOperation::UserPackagesContributions => &USER_PACKAGES_CONTRIBUTIONS,
            SearchOperation::UserRepositoryContributions => &USER_REPOSITORY_CONTRIBUTIONS,
            SearchOperation::UserDependencies => &USER_DEPENDENCIES,
        }
    }

    fn default_argument(&self, key: ArgKey) -> Option<&'static str> {
        match (self, key) {
            (SearchOperation::ProjectDependencies, ArgKey::Version) => Some(LATEST_VERSION),
            _ => None,
        }
    }

    fn apply_params(&self, params: &mut RequestParameters, query: &SearchQuery) {
        if *self != SearchOperation::ProjectSearch {
            return;
        }

        if let Some(q) = &query.q {
            params.set(QUERY, q.as_str());
        }

        for (filter, values) in &query.filters {
            if !values.is_empty() {
                params.set(filter.as_str(), values.clone());
            }
        }

        if let Some(sort) = query.sort {
            params.set(SORT, sort.as_str());
        }
    }
}

impl fmt::Display for SearchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchOperation {
    type Err = LibrariesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        SearchOperation::ALL
            .into_iter()
            .find(|op| op.name() == wanted)
            .ok_or_else(|| LibrariesError::UnknownOperation(s.to_string()))
    }
}

/// Sort keys accepted by project search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SearchSort {
    /// Number of contributions.
    ContributionsCount,
    /// Creation date.
    CreatedAt,
    /// Number of dependent packages.
    DependentsCount,
    /// Number of dependent repositories.
    DependentReposCount,
    /// Publish date of the latest release.
    LatestReleasePublishedAt,
    /// SourceRank.
    Rank,
    /// Repository stars.
    Stars,
}

impl SearchSort {
    /// Every sort key.
    pub const ALL: [SearchSort; 7] = [
        SearchSort::ContributionsCount,
        SearchSort::CreatedAt,
        SearchSort::DependentsCount,
        SearchSort::DependentReposCount,
        SearchSort::LatestReleasePublishedAt,
        SearchSort::Rank,
        SearchSort::Stars,
    ];

    /// Wire value of the sort key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchSort::ContributionsCount => "contributions_count",
            SearchSort::CreatedAt => "created_at",
            SearchSort::DependentsCount => "dependents_count",
            SearchSort::DependentReposCount => "dependent_repos_count",
            SearchSort::LatestReleasePublishedAt => "latest_release_published_at",
            SearchSort::Rank => "rank",
            SearchSort::Stars => "stars",
        }
    }
}

impl FromStr for SearchSort {
    type Err = LibrariesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SearchSort::ALL
            .into_iter()
            .find(|sort| sort.as_str() == wanted)
            .ok_or_else(|| LibrariesError::UnknownKey {
                kind: "sort",
                value: s.to_string(),
            })
    }
}

/// Filter keys accepted by project search.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SearchFilter {
    /// Programming languages.
    Languages,
    /// License identifiers.
    Licenses,
    /// Keywords.
    Keywords,
    /// Package managers.
    Platforms,
}

impl SearchFilter {
    /// Every filter key.
    pub const ALL: [SearchFilter; 4] = [
        SearchFilter::Languages,
        SearchFilter::Licenses,
        SearchFilter::Keywords,
        SearchFilter::Platforms,
    ];

    /// Wire name of the filter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchFilter::Languages => "languages",
            SearchFilter::Licenses => "licenses",
            SearchFilter::Keywords => "keywords",
            SearchFilter::Platforms => "platforms",
        }
    }
}

impl FromStr for SearchFilter {
    type Err = LibrariesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SearchFilter::ALL
            .into_iter()
            .find(|f| f.as_str() == wanted)
            .ok_or_else(|| LibrariesError::UnknownKey {
                kind: "filter",
                value: s.to_string(),
            })
    }
}

/// Search text, sort key and filters for [`SearchOperation::ProjectSearch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free-text query (`q`).
    pub q: Option<String>,
    /// Sort key.
    pub sort: Option<SearchSort>,
    /// Filter values by filter key.
    pub filters: BTreeMap<SearchFilter, BTreeSet<String>>,
}

impl SearchQuery {
    /// Query with search text.
    #[must_use]
    pub fn text(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Default::default()
        }
    }

    /// Set the sort key.
    #[must_use]
    pub fn sort(mut self, sort: SearchSort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Add one value to a filter.
    #[must_use]
    pub fn filter(mut self, filter: SearchFilter, value: impl Into<String>) -> Self {
        self.filters.entry(filter).or_default().insert(value.into());
        self
    }

    /// Whether nothing was supplied.
    pub fn is_empty(&self) -> bool {
        self.q.is_none() && self.sort.is_none() && self.filters.values().all(BTreeSet::is_empty)
    }
}
