//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output of single
//! resources, table rows for collections, and [`render`], which picks the
//! right view for an operation's response and falls back to JSON.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tabled::{Table, Tabled};

use crate::{
    Dependency, Platform, Project, ProjectDependencies, Repository, Response, SearchOperation,
    Subscription, User,
};

const TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Trait for human-readable key-value output.
///
/// Implemented by model types to provide formatted output suitable for
/// terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(title: String) -> Vec<String> {
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

impl PrettyPrint for Project {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Project: {}/{}", self.platform, self.name));

        if let Some(ref description) = self.description {
            lines.push(format!("Description:    {}", description));
        }
        if let Some(version) = self.latest_version() {
            lines.push(format!("Latest:         {}", version));
        }
        if let Some(ref published) = self.latest_release_published_at {
            lines.push(format!("Published:      {}", published.format(TIMESTAMP)));
        }
        lines.push(format!("Licenses:       {}", self.license_summary()));
        lines.push(format!(
            "Popularity:     {} stars, {} forks, rank {}",
            self.stars, self.forks, self.rank
        ));
        lines.push(format!(
            "Dependents:     {} packages, {} repositories",
            self.dependents_count, self.dependent_repos_count
        ));
        if let Some(ref repo) = self.repository_url {
            lines.push(format!("Repository:     {}", repo));
        }
        if !self.versions.is_empty() {
            lines.push(format!("Versions:       {}", self.versions.len()));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for ProjectDependencies {
    fn pretty_print(&self) -> String {
        let version = self.dependencies_for_version.as_deref().unwrap_or("latest");
        let mut lines = header(format!(
            "Dependencies: {}/{}@{}",
            self.project.platform, self.project.name, version
        ));

        if self.dependencies.is_empty() {
            lines.push("(none)".to_string());
        } else {
            let rows: Vec<DependencyRow> = self.dependencies.iter().map(DependencyRow::from).collect();
            lines.push(Table::new(rows).to_string());
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Repository {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Repository: {}", self.full_name));

        if let Some(ref host) = self.host_type {
            lines.push(format!("Host:           {}", host));
        }
        if let Some(ref description) = self.description {
            lines.push(format!("Description:    {}", description));
        }
        if let Some(ref language) = self.language {
            lines.push(format!("Language:       {}", language));
        }
        if let Some(ref license) = self.license {
            lines.push(format!("License:        {}", license));
        }
        lines.push(format!(
            "Activity:       {} stars, {} forks, {} open issues",
            self.stargazers_count, self.forks_count, self.open_issues_count
        ));
        if let Some(ref pushed) = self.pushed_at {
            lines.push(format!("Pushed:         {}", pushed.format(TIMESTAMP)));
        }
        if self.fork {
            lines.push("Fork:           yes".to_string());
        }
        if self.archived {
            lines.push("Archived:       yes".to_string());
        }

        lines.join("\n")
    }
}

impl PrettyPrint for User {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("User: {}", self.login));

        for (label, value) in [
            ("Name:           ", &self.name),
            ("Type:           ", &self.user_type),
            ("Company:        ", &self.company),
            ("Location:       ", &self.location),
            ("Website:        ", &self.blog),
            ("Host:           ", &self.host_type),
        ] {
            if let Some(value) = value {
                lines.push(format!("{label}{value}"));
            }
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Subscription {
    fn pretty_print(&self) -> String {
        let target = self.target().unwrap_or_else(|| "(unknown project)".to_string());
        let mut lines = header(format!("Subscription: {}", target));
        lines.push(format!(
            "Prereleases:    {}",
            if self.include_prerelease { "yes" } else { "no" }
        ));
        if let Some(ref created) = self.created_at {
            lines.push(format!("Created:        {}", created.format(TIMESTAMP)));
        }
        lines.join("\n")
    }
}

// Table row types for collection output

/// Table row for a platform.
#[derive(Tabled)]
pub struct PlatformRow {
    name: String,
    projects: u64,
    language: String,
}

impl From<&Platform> for PlatformRow {
    fn from(p: &Platform) -> Self {
        Self {
            name: p.name.clone(),
            projects: p.project_count,
            language: p.default_language.clone().unwrap_or_default(),
        }
    }
}

/// Table row for a project.
#[derive(Tabled)]
pub struct ProjectRow {
    platform: String,
    name: String,
    latest: String,
    stars: u64,
    licenses: String,
}

impl From<&Project> for ProjectRow {
    fn from(p: &Project) -> Self {
        Self {
            platform: p.platform.clone(),
            name: p.name.clone(),
            latest: p.latest_version().unwrap_or_default().to_string(),
            stars: p.stars,
            licenses: p.license_summary(),
        }
    }
}

/// Table row for a dependency.
#[derive(Tabled)]
pub struct DependencyRow {
    name: String,
    requirements: String,
    latest: String,
    kind: String,
    status: String,
}

impl From<&Dependency> for DependencyRow {
    fn from(d: &Dependency) -> Self {
        let status = match (d.deprecated, d.outdated) {
            (Some(true), _) => "deprecated",
            (_, Some(true)) => "outdated",
            _ => "ok",
        };
        Self {
            name: d.project_name.clone(),
            requirements: d.requirements.clone().unwrap_or_default(),
            latest: d.latest_stable.clone().or_else(|| d.latest.clone()).unwrap_or_default(),
            kind: d.kind.clone().unwrap_or_default(),
            status: status.to_string(),
        }
    }
}

/// Table row for a repository.
#[derive(Tabled)]
pub struct RepositoryRow {
    #[tabled(rename = "repository")]
    full_name: String,
    language: String,
    stars: u64,
    forks: u64,
}

impl From<&Repository> for RepositoryRow {
    fn from(r: &Repository) -> Self {
        Self {
            full_name: r.full_name.clone(),
            language: r.language.clone().unwrap_or_default(),
            stars: r.stargazers_count,
            forks: r.forks_count,
        }
    }
}

/// Table row for a user.
#[derive(Tabled)]
pub struct UserRow {
    login: String,
    name: String,
    location: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            login: u.login.clone(),
            name: u.name.clone().unwrap_or_default(),
            location: u.location.clone().unwrap_or_default(),
        }
    }
}

/// Table row for a subscription.
#[derive(Tabled)]
pub struct SubscriptionRow {
    project: String,
    prereleases: String,
    created: String,
}

impl From<&Subscription> for SubscriptionRow {
    fn from(s: &Subscription) -> Self {
        Self {
            project: s.target().unwrap_or_default(),
            prereleases: if s.include_prerelease { "yes" } else { "no" }.to_string(),
            created: s
                .created_at
                .map(|c| c.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

/// Pretty JSON, the fallback for shapes without a dedicated view.
pub fn to_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn table_of<T, R>(items: &[Value]) -> Option<String>
where
    T: DeserializeOwned,
    R: Tabled + for<'a> From<&'a T>,
{
    let decoded: Vec<T> = serde_json::from_value(Value::Array(items.to_vec())).ok()?;
    if decoded.is_empty() {
        return Some("(no results)".to_string());
    }
    let rows: Vec<R> = decoded.iter().map(R::from).collect();
    Some(Table::new(rows).to_string())
}

fn pretty_of<T: DeserializeOwned + PrettyPrint>(value: &Value) -> Option<String> {
    serde_json::from_value::<T>(value.clone())
        .ok()
        .map(|item| item.pretty_print())
}

/// Human-readable view of a search response.
///
/// Responses that do not decode into the expected model are shown as JSON.
pub fn render(op: SearchOperation, response: &Response) -> String {
    let rendered = match response {
        Response::Collection(items) => match op {
            SearchOperation::Platforms => table_of::<Platform, PlatformRow>(items),
            SearchOperation::ProjectSearch
            | SearchOperation::ProjectDependents
            | SearchOperation::RepositoryProjects
            | SearchOperation::UserPackages
            | SearchOperation::UserPackagesContributions
            | SearchOperation::UserDependencies => table_of::<Project, ProjectRow>(items),
            SearchOperation::ProjectDependentRepositories
            | SearchOperation::UserRepositories
            | SearchOperation::UserRepositoryContributions => {
                table_of::<Repository, RepositoryRow>(items)
            }
            SearchOperation::ProjectContributors => table_of::<User, UserRow>(items),
            _ => None,
        },
        Response::Single(map) => {
            let value = Value::Object(map.clone());
            match op {
                SearchOperation::Project => pretty_of::<Project>(&value),
                SearchOperation::ProjectDependencies => pretty_of::<ProjectDependencies>(&value),
                SearchOperation::Repository => pretty_of::<Repository>(&value),
                SearchOperation::User => pretty_of::<User>(&value),
                _ => None,
            }
        }
    };

    rendered.unwrap_or_else(|| to_json(&response.clone().into_value()))
}

/// Human-readable view of a subscription response.
///
/// Bodies without a project, such as a delete confirmation, are shown as JSON.
pub fn render_subscriptions(response: &Response) -> String {
    let rendered = match response {
        Response::Collection(items) => table_of::<Subscription, SubscriptionRow>(items),
        Response::Single(map) if map.contains_key("project") => {
            pretty_of::<Subscription>(&Value::Object(map.clone()))
        }
        Response::Single(_) => None,
    };
    rendered.unwrap_or_else(|| to_json(&response.clone().into_value()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_pretty_print_format() {
        let project: Project = serde_json::from_value(json!({
            "name": "flask",
            "platform": "Pypi",
            "normalized_licenses": ["BSD-3-Clause"]
        }))
        .unwrap();

        let output = project.pretty_print();
        assert!(output.starts_with("Project: Pypi/flask"));
        assert!(output.contains("BSD-3-Clause"));
    }

    #[test]
    fn test_render_platform_table() {
        let response = Response::Collection(vec![json!({"name": "NPM", "project_count": 10})]);
        let output = render(SearchOperation::Platforms, &response);
        assert!(output.contains("NPM"));
        assert!(output.contains("projects"));
    }

    #[test]
    fn test_render_falls_back_to_json() {
        let response = Response::Single(
            json!({"basic_info_present": 1}).as_object().unwrap().clone(),
        );
        let output = render(SearchOperation::ProjectSourcerank, &response);
        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["basic_info_present"], 1);
    }

    #[test]
    fn test_render_undecodable_collection_as_json() {
        let response = Response::Collection(vec![json!({"unexpected": true})]);
        let output = render(SearchOperation::ProjectSearch, &response);
        assert!(serde_json::from_str::<Value>(&output).is_ok());
    }
}
