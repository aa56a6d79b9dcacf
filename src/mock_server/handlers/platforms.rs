//! Platform endpoint handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;

use super::{check_key, CommonQuery};
use crate::mock_server::state::MockState;

/// GET /platforms
pub async fn list_platforms(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<CommonQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = check_key(&state, query.api_key.as_deref()) {
        return rejection;
    }

    (StatusCode::OK, Json(state.platforms.clone())).into_response()
}
