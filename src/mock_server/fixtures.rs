//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use crate::{Dependency, Platform, Project};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Platform Fixtures
    // =========================================================================

    /// Create a platform with a project count and language.
    pub fn platform(name: &str, project_count: u64, language: &str) -> Platform {
        Platform {
            name: name.to_string(),
            project_count,
            homepage: None,
            color: None,
            default_language: Some(language.to_string()),
        }
    }

    // =========================================================================
    // Project Fixtures
    // =========================================================================

    /// Create a minimal project with required fields only.
    pub fn minimal_project(platform: &str, name: &str) -> Project {
        Project {
            name: name.to_string(),
            platform: platform.to_string(),
            description: None,
            homepage: None,
            repository_url: None,
            language: None,
            normalized_licenses: vec![],
            keywords: vec![],
            stars: 0,
            forks: 0,
            rank: 0,
            dependents_count: 0,
            dependent_repos_count: 0,
            latest_release_number: None,
            latest_release_published_at: None,
            latest_stable_release_number: None,
            versions: vec![],
        }
    }

    /// Create a released project with a license, keywords and popularity.
    pub fn released_project(
        platform: &str,
        name: &str,
        version: &str,
        license: &str,
        stars: u64,
        keywords: &[&str],
    ) -> Project {
        let mut project = Self::minimal_project(platform, name);
        project.description = Some(format!("The {} package", name));
        project.normalized_licenses = vec![license.to_string()];
        project.keywords = keywords.iter().map(|k| k.to_string()).collect();
        project.stars = stars;
        project.rank = (stars / 100) as i64;
        project.latest_release_number = Some(version.to_string());
        project.latest_stable_release_number = Some(version.to_string());
        project
    }

    // =========================================================================
    // Dependency Fixtures
    // =========================================================================

    /// Create a runtime dependency.
    pub fn dependency(platform: &str, name: &str, requirements: &str, latest: &str) -> Dependency {
        Dependency {
            project_name: name.to_string(),
            platform: Some(platform.to_string()),
            requirements: Some(requirements.to_string()),
            latest_stable: Some(latest.to_string()),
            latest: Some(latest.to_string()),
            deprecated: Some(false),
            outdated: Some(false),
            filepath: None,
            kind: Some("runtime".to_string()),
        }
    }

    /// Create a dependency whose requirement excludes the latest release.
    pub fn outdated_dependency(
        platform: &str,
        name: &str,
        requirements: &str,
        latest: &str,
    ) -> Dependency {
        let mut dep = Self::dependency(platform, name, requirements, latest);
        dep.outdated = Some(true);
        dep
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// A small catalog of platforms, projects and dependencies.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A complete test scenario with related entities.
pub struct DefaultScenario {
    pub platforms: Vec<Platform>,
    pub projects: Vec<Project>,
    pub dependencies: Vec<((String, String), Vec<Dependency>)>,
}

impl DefaultScenario {
    fn new() -> Self {
        let platforms = vec![
            Fixtures::platform("NPM", 4_079_586, "JavaScript"),
            Fixtures::platform("Pypi", 602_103, "Python"),
            Fixtures::platform("Cargo", 152_844, "Rust"),
        ];

        let projects = vec![
            Fixtures::released_project("Pypi", "requests", "2.31.0", "Apache-2.0", 50_000, &["http", "python"]),
            Fixtures::released_project("Pypi", "httpx", "0.27.0", "BSD-3-Clause", 12_000, &["http", "async"]),
            Fixtures::released_project("Pypi", "urllib3", "2.2.1", "MIT", 3_600, &["http"]),
            Fixtures::released_project("NPM", "base62", "2.0.1", "MIT", 150, &["encoding"]),
            Fixtures::released_project("NPM", "axios", "1.6.8", "MIT", 104_000, &["http", "promise"]),
            Fixtures::released_project("Cargo", "reqwest", "0.12.4", "MIT OR Apache-2.0", 9_000, &["http", "client"]),
        ];

        let dependencies = vec![
            (
                ("Pypi".to_string(), "requests".to_string()),
                vec![
                    Fixtures::dependency("Pypi", "urllib3", ">=1.21.1,<3", "2.2.1"),
                    Fixtures::dependency("Pypi", "idna", ">=2.5,<4", "3.7"),
                    Fixtures::outdated_dependency("Pypi", "chardet", ">=3.0.2,<5", "5.2.0"),
                ],
            ),
            (
                ("NPM".to_string(), "axios".to_string()),
                vec![Fixtures::dependency("NPM", "follow-redirects", "^1.15.6", "1.15.6")],
            ),
        ];

        Self {
            platforms,
            projects,
            dependencies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_project() {
        let project = Fixtures::minimal_project("NPM", "base62");
        assert_eq!(project.name, "base62");
        assert_eq!(project.platform, "NPM");
        assert!(project.latest_version().is_none());
    }

    #[test]
    fn test_released_project() {
        let project =
            Fixtures::released_project("Pypi", "requests", "2.31.0", "Apache-2.0", 50_000, &["http"]);
        assert_eq!(project.latest_version(), Some("2.31.0"));
        assert_eq!(project.license_summary(), "Apache-2.0");
        assert_eq!(project.rank, 500);
    }

    #[test]
    fn test_outdated_dependency() {
        let dep = Fixtures::outdated_dependency("Pypi", "chardet", "<5", "5.2.0");
        assert!(dep.needs_attention());
    }

    #[test]
    fn test_default_scenario() {
        let scenario = Fixtures::default_scenario();
        assert_eq!(scenario.platforms.len(), 3);
        assert!(!scenario.projects.is_empty());
        assert!(!scenario.dependencies.is_empty());
    }
}
