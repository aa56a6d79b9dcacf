//! HTTP request handlers for the mock server.

pub mod platforms;
pub mod projects;
pub mod subscriptions;

pub use platforms::*;
pub use projects::*;
pub use subscriptions::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::{DEFAULT_PAGE, DEFAULT_PER_PAGE};

use super::state::MockState;

/// Query parameters every endpoint understands.
#[derive(Debug, Default, Deserialize)]
pub struct CommonQuery {
    pub api_key: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub include_prerelease: Option<String>,
}

impl CommonQuery {
    /// Requested page, 1-indexed.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    /// Requested page size.
    pub fn per_page(&self) -> u32 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE)
    }

    /// Whether `include_prerelease` was set to a true value.
    pub fn include_prerelease(&self) -> bool {
        matches!(self.include_prerelease.as_deref(), Some("1") | Some("true"))
    }
}

/// Reject the request unless the state accepts its key.
pub(crate) fn check_key(state: &MockState, key: Option<&str>) -> Result<(), Response> {
    if state.accepts_key(key) {
        Ok(())
    } else {
        Err(error_response(StatusCode::UNAUTHORIZED, "Invalid API key"))
    }
}

/// JSON error body in the shape libraries.io uses.
pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// 404 for an unknown project.
pub(crate) fn not_found(platform: &str, name: &str) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        &format!("Project not found: {}/{}", platform, name),
    )
}
