//! Mock libraries.io API server.
//!
//! Provides an axum-based HTTP server that simulates the libraries.io API.

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock libraries.io API server for testing.
///
/// The server runs in the background and keeps its state across requests,
/// so subscribe/check/unsubscribe workflows behave like the real service.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Pass it to [`SessionBuilder::base_url`](crate::SessionBuilder::base_url).
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for platform in scenario.platforms {
            state = state.with_platform(platform);
        }

        for project in scenario.projects {
            state = state.with_project(project);
        }

        for ((platform, name), deps) in scenario.dependencies {
            state = state.with_dependencies(&platform, &name, deps);
        }

        state
    }

    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            .route("/platforms", get(handlers::list_platforms))
            .route("/search", get(handlers::search_projects))
            .route("/subscriptions", get(handlers::list_subscriptions))
            .route(
                "/subscriptions/:platform/:project",
                get(handlers::get_subscription)
                    .post(handlers::create_subscription)
                    .put(handlers::update_subscription)
                    .delete(handlers::delete_subscription),
            )
            .route("/:platform/:project", get(handlers::get_project))
            .route(
                "/:platform/:project/:version/dependencies",
                get(handlers::get_project_dependencies),
            )
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
