//! Mock server state management.
//!
//! Provides the in-memory data store for the mock libraries.io API server.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{Dependency, Platform, Project, Subscription};

/// Key of a project: lowercased platform plus package name.
pub type ProjectKey = (String, String);

/// Build the lookup key for a project.
pub fn project_key(platform: &str, name: &str) -> ProjectKey {
    (platform.to_ascii_lowercase(), name.to_string())
}

/// Shared state for the mock server.
///
/// Wrapped in `Arc<RwLock<_>>` by the server for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Supported package managers, in listing order.
    pub platforms: Vec<Platform>,

    /// Projects indexed by platform and name.
    pub projects: HashMap<ProjectKey, Project>,

    /// Dependencies of each project's latest version.
    pub dependencies: HashMap<ProjectKey, Vec<Dependency>>,

    /// Subscriptions of the key's owner, ordered by project.
    pub subscriptions: BTreeMap<ProjectKey, Subscription>,

    /// Optional API key. If set, requests must carry it as `api_key`.
    pub required_key: Option<String>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a platform.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platforms.push(platform);
        self
    }

    /// Add a project.
    pub fn with_project(mut self, project: Project) -> Self {
        self.projects
            .insert(project_key(&project.platform, &project.name), project);
        self
    }

    /// Set the dependencies of a project.
    pub fn with_dependencies(mut self, platform: &str, name: &str, deps: Vec<Dependency>) -> Self {
        self.dependencies.insert(project_key(platform, name), deps);
        self
    }

    /// Set the required API key.
    pub fn with_required_key(mut self, key: &str) -> Self {
        self.required_key = Some(key.to_string());
        self
    }

    /// Whether `key` is accepted.
    pub fn accepts_key(&self, key: Option<&str>) -> bool {
        match (&self.required_key, key) {
            (None, _) => true,
            (Some(required), Some(given)) => required == given,
            (Some(_), None) => false,
        }
    }

    /// Get a project by platform (case-insensitive) and name.
    pub fn get_project(&self, platform: &str, name: &str) -> Option<&Project> {
        self.projects.get(&project_key(platform, name))
    }

    /// Get the dependencies of a project, if the project exists.
    pub fn get_dependencies(&self, platform: &str, name: &str) -> Option<Vec<Dependency>> {
        let key = project_key(platform, name);
        self.projects
            .contains_key(&key)
            .then(|| self.dependencies.get(&key).cloned().unwrap_or_default())
    }

    /// Search projects.
    ///
    /// `q` matches name, description and keywords case-insensitively;
    /// `platforms` restricts to the listed package managers. Results are
    /// ordered by `sort` (descending), defaulting to rank.
    pub fn search_projects(
        &self,
        q: Option<&str>,
        platforms: &[String],
        sort: Option<&str>,
    ) -> Vec<&Project> {
        let needle = q.map(str::to_lowercase).unwrap_or_default();
        let mut found: Vec<&Project> = self
            .projects
            .values()
            .filter(|p| {
                platforms.is_empty()
                    || platforms.iter().any(|wanted| wanted.eq_ignore_ascii_case(&p.platform))
            })
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
                    || p.keywords.iter().any(|k| k.to_lowercase() == needle)
            })
            .collect();

        let score = |p: &Project| -> i64 {
            match sort {
                Some("stars") => p.stars as i64,
                Some("dependents_count") => p.dependents_count as i64,
                Some("dependent_repos_count") => p.dependent_repos_count as i64,
                _ => p.rank,
            }
        };
        found.sort_by(|a, b| score(b).cmp(&score(a)).then_with(|| a.name.cmp(&b.name)));
        found
    }

    /// Get a subscription.
    pub fn get_subscription(&self, platform: &str, name: &str) -> Option<&Subscription> {
        self.subscriptions.get(&project_key(platform, name))
    }

    /// Create or replace a subscription to an existing project.
    pub fn subscribe(
        &mut self,
        platform: &str,
        name: &str,
        include_prerelease: bool,
    ) -> Option<&Subscription> {
        let project = self.get_project(platform, name)?.clone();
        let key = project_key(platform, name);
        let now = Utc::now();
        self.subscriptions.insert(
            key.clone(),
            Subscription {
                include_prerelease,
                created_at: Some(now),
                updated_at: Some(now),
                project: Some(project),
            },
        );
        self.subscriptions.get(&key)
    }

    /// Change an existing subscription.
    pub fn update_subscription(
        &mut self,
        platform: &str,
        name: &str,
        include_prerelease: bool,
    ) -> Option<&Subscription> {
        let sub = self.subscriptions.get_mut(&project_key(platform, name))?;
        sub.include_prerelease = include_prerelease;
        sub.updated_at = Some(Utc::now());
        Some(sub)
    }

    /// Remove a subscription. Returns whether one existed.
    pub fn unsubscribe(&mut self, platform: &str, name: &str) -> bool {
        self.subscriptions
            .remove(&project_key(platform, name))
            .is_some()
    }
}

/// Slice one page out of `items`; pages are 1-indexed.
pub fn page_of<T: Clone>(items: &[T], page: u32, per_page: u32) -> Vec<T> {
    let page = page.max(1) as usize;
    let per_page = per_page.max(1) as usize;
    let start = (page - 1) * per_page;
    items.iter().skip(start).take(per_page).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::Fixtures;

    #[test]
    fn test_state_add_and_get_project() {
        let state = MockState::new().with_project(Fixtures::minimal_project("NPM", "base62"));

        assert!(state.get_project("npm", "base62").is_some());
        assert!(state.get_project("NPM", "Base62").is_none());
    }

    #[test]
    fn test_state_search_filters_and_sorts() {
        let mut low = Fixtures::minimal_project("Pypi", "requests-mock");
        low.stars = 10;
        let mut high = Fixtures::minimal_project("Pypi", "requests");
        high.stars = 500;
        let other = Fixtures::minimal_project("NPM", "request");

        let state = MockState::new()
            .with_project(low)
            .with_project(high)
            .with_project(other);

        let all = state.search_projects(Some("request"), &[], Some("stars"));
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "requests");

        let pypi = state.search_projects(Some("request"), &["pypi".to_string()], None);
        assert_eq!(pypi.len(), 2);
    }

    #[test]
    fn test_state_subscription_lifecycle() {
        let mut state = MockState::new().with_project(Fixtures::minimal_project("NPM", "base62"));

        assert!(state.subscribe("NPM", "missing", false).is_none());
        assert!(state.subscribe("NPM", "base62", false).is_some());
        let updated = state.update_subscription("npm", "base62", true).unwrap();
        assert!(updated.include_prerelease);
        assert!(state.unsubscribe("NPM", "base62"));
        assert!(!state.unsubscribe("NPM", "base62"));
    }

    #[test]
    fn test_required_key() {
        let open = MockState::new();
        assert!(open.accepts_key(None));

        let locked = MockState::new().with_required_key("k");
        assert!(locked.accepts_key(Some("k")));
        assert!(!locked.accepts_key(Some("other")));
        assert!(!locked.accepts_key(None));
    }

    #[test]
    fn test_page_of() {
        let items: Vec<u32> = (1..=5).collect();
        assert_eq!(page_of(&items, 1, 2), vec![1, 2]);
        assert_eq!(page_of(&items, 3, 2), vec![5]);
        assert!(page_of(&items, 4, 2).is_empty());
    }
}
