//! Mock libraries.io API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the
//! libraries.io API for integration and end-to-end testing. Unlike wiremock,
//! which mocks single requests per test, this server keeps state across
//! requests, so subscription workflows and multi-page searches behave
//! realistically.
//!
//! # Example
//!
//! ```ignore
//! use librariesio::mock_server::MockServer;
//! use librariesio::{RequestOptions, Search, Session};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let session = Session::builder()
//!         .api_key("test-key")
//!         .base_url(server.url())
//!         .build()
//!         .unwrap();
//!     let search = Search::with_session(session);
//!
//!     // Server comes with default fixtures
//!     let outcome = search.platforms(RequestOptions::default()).await.unwrap();
//!     assert!(outcome.is_success());
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::{project_key, MockState, ProjectKey};
