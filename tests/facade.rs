//! Search and Subscribe facade tests.
//!
//! Uses wiremock to mock libraries.io and check how outcomes are reported.

use librariesio::{
    LibrariesError, Outcome, Project, ProjectDependencies, RequestOptions, Response, RetryPolicy,
    Search, SearchQuery, SearchSort, Session, SessionKind, Subscribe,
};
use tokio_test::assert_ok;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_for(uri: &str) -> Session {
    Session::builder()
        .api_key("test-key")
        .base_url(uri)
        .retry_policy(RetryPolicy::never())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_project_decodes_into_model() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pypi/requests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "requests",
            "platform": "Pypi",
            "latest_stable_release_number": "2.31.0",
            "normalized_licenses": ["Apache-2.0"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let search = Search::with_session(session_for(&mock_server.uri()));
    let outcome = assert_ok!(search.project("pypi", "requests", RequestOptions::default()).await);

    let project: Project = outcome.into_result().unwrap().decode().unwrap();
    assert_eq!(project.latest_version(), Some("2.31.0"));
}

#[tokio::test]
async fn test_project_dependencies_for_version() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/npm/base62/2.0.1/dependencies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "base62",
            "platform": "NPM",
            "dependencies_for_version": "2.0.1",
            "dependencies": [{"project_name": "mocha", "outdated": true}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let search = Search::with_session(session_for(&mock_server.uri()));
    let outcome = search
        .project_dependencies("npm", "base62", Some("2.0.1"), RequestOptions::default())
        .await
        .unwrap();

    let deps: ProjectDependencies = outcome.into_result().unwrap().decode().unwrap();
    assert!(deps.dependencies[0].needs_attention());
}

#[tokio::test]
async fn test_not_found_is_a_failed_outcome() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pypi/nope/contributors"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"error": "Not Found"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let search = Search::with_session(session_for(&mock_server.uri()));
    let outcome = search
        .project_contributors("pypi", "nope", RequestOptions::default())
        .await
        .unwrap();

    assert!(outcome.is_failed());
    assert_eq!(outcome.error().and_then(LibrariesError::status), Some(404));
    assert_eq!(outcome.unwrap_or_empty(), Response::Collection(vec![]));
}

#[tokio::test]
async fn test_search_passes_query_and_paging() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "http client"))
        .and(query_param("sort", "dependents_count"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let search = Search::with_session(session_for(&mock_server.uri()));
    let query = SearchQuery::text("http client").sort(SearchSort::DependentsCount);
    let outcome = search
        .project_search(query, RequestOptions::for_page(2, 5))
        .await
        .unwrap();

    assert!(matches!(outcome, Outcome::Success(ref r) if r.is_empty()));
}

#[tokio::test]
async fn test_iterator_only_session_is_rejected() {
    let session = Session::builder()
        .api_key("test-key")
        .kind(SessionKind::IteratorOnly)
        .build()
        .unwrap();
    let search = Search::with_session(session);

    let err = search.platforms(RequestOptions::default()).await.unwrap_err();
    assert!(matches!(err, LibrariesError::InvalidSessionClass { .. }));
}

#[tokio::test]
async fn test_missing_argument_is_an_error() {
    let search = Search::new("test-key").unwrap();

    let err = search
        .project("", "requests", RequestOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, LibrariesError::MissingArgument("platform")));
}

#[tokio::test]
async fn test_check_if_subscribed_reads_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscriptions/npm/base62"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "include_prerelease": false,
            "project": {"name": "base62", "platform": "NPM"}
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/subscriptions/npm/left-pad"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let subscribe = Subscribe::with_session(session_for(&mock_server.uri()));
    assert!(subscribe.check_if_subscribed("npm", "base62").await.unwrap());
    assert!(!subscribe.check_if_subscribed("npm", "left-pad").await.unwrap());
}

#[tokio::test]
async fn test_update_subscription_sends_put() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/subscriptions/npm/base62"))
        .and(query_param("include_prerelease", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "include_prerelease": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let subscribe = Subscribe::with_session(session_for(&mock_server.uri()));
    let outcome = subscribe
        .update_subscription("npm", "base62", true)
        .await
        .unwrap();
    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_unsubscribe_gave_up_is_failed_not_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/subscriptions/npm/base62"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&mock_server)
        .await;

    let session = Session::builder()
        .api_key("test-key")
        .base_url(mock_server.uri())
        .retry_policy(RetryPolicy::new(1, 0.0, []))
        .build()
        .unwrap();
    let subscribe = Subscribe::with_session(session);

    let outcome = subscribe.unsubscribe("npm", "base62").await.unwrap();
    assert!(matches!(
        outcome.error(),
        Some(LibrariesError::RetriesExhausted { attempts: 2, .. })
    ));
}
