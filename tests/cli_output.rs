//! CLI output formatting tests.
//!
//! Covers JSON output for `--json` and the pretty views used by default.

use librariesio::output::{render, render_subscriptions, to_json};
use librariesio::{PrettyPrint, Project, Repository, Response, SearchOperation, Subscription};
use serde_json::{json, Value};

fn project_json() -> Value {
    json!({
        "name": "requests",
        "platform": "Pypi",
        "description": "Python HTTP for Humans.",
        "normalized_licenses": ["Apache-2.0"],
        "stars": 50000,
        "latest_stable_release_number": "2.31.0",
        "repository_url": "https://github.com/psf/requests"
    })
}

fn single(value: Value) -> Response {
    Response::from_value(value).unwrap()
}

// ============================================================================
// JSON Output Tests
// ============================================================================

#[test]
fn test_json_output_is_valid_json() {
    let output = to_json(&single(project_json()).into_value());

    let parsed: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["name"], "requests");
}

#[test]
fn test_json_output_preserves_unknown_fields() {
    let mut body = project_json();
    body["subscribers_count"] = json!(12);

    let output = to_json(&single(body).into_value());
    let parsed: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["subscribers_count"], 12);
}

// ============================================================================
// Pretty-Print Tests
// ============================================================================

#[test]
fn test_default_output_is_not_json() {
    let output = render(SearchOperation::Project, &single(project_json()));

    assert!(serde_json::from_str::<Value>(&output).is_err());
    assert!(output.contains("Project: Pypi/requests"));
    assert!(output.contains("2.31.0"));
    assert!(output.contains("Apache-2.0"));
}

#[test]
fn test_project_pretty_print_lists_repository() {
    let project: Project = serde_json::from_value(project_json()).unwrap();
    let output = project.pretty_print();

    assert!(output.contains("https://github.com/psf/requests"));
    assert!(output.contains("50000 stars"));
}

#[test]
fn test_repository_pretty_print() {
    let repo: Repository = serde_json::from_value(json!({
        "full_name": "psf/requests",
        "host_type": "GitHub",
        "language": "Python",
        "stargazers_count": 50000,
        "fork": false
    }))
    .unwrap();

    let output = repo.pretty_print();
    assert!(output.starts_with("Repository: psf/requests"));
    assert!(output.contains("GitHub"));
    assert!(!output.contains("Fork:"));
}

#[test]
fn test_search_results_render_as_table() {
    let response = Response::Collection(vec![
        json!({"name": "requests", "platform": "Pypi", "stars": 50000}),
        json!({"name": "httpx", "platform": "Pypi", "stars": 12000}),
    ]);

    let output = render(SearchOperation::ProjectSearch, &response);
    assert!(output.contains("requests"));
    assert!(output.contains("httpx"));
    assert!(output.contains("licenses"));
}

#[test]
fn test_empty_collection_renders_placeholder() {
    let output = render(SearchOperation::ProjectDependents, &Response::Collection(vec![]));
    assert_eq!(output, "(no results)");
}

#[test]
fn test_subscription_views() {
    let sub = json!({
        "include_prerelease": true,
        "project": {"name": "base62", "platform": "NPM"}
    });

    let subscription: Subscription = serde_json::from_value(sub.clone()).unwrap();
    assert!(subscription.pretty_print().contains("Subscription: NPM/base62"));

    let table = render_subscriptions(&Response::Collection(vec![sub]));
    assert!(table.contains("NPM/base62"));
    assert!(table.contains("yes"));
}

#[test]
fn test_deleted_subscription_renders_as_json() {
    let output = render_subscriptions(&Response::deleted());
    let parsed: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["status"], "success");
}
