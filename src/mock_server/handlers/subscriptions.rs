//! Subscription endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;

use super::{check_key, error_response, not_found, CommonQuery};
use crate::mock_server::state::{page_of, MockState};
use crate::Subscription;

/// GET /subscriptions
pub async fn list_subscriptions(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<CommonQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = check_key(&state, query.api_key.as_deref()) {
        return rejection;
    }

    let all: Vec<Subscription> = state.subscriptions.values().cloned().collect();
    (
        StatusCode::OK,
        Json(page_of(&all, query.page(), query.per_page())),
    )
        .into_response()
}

/// GET /subscriptions/{platform}/{project}
///
/// Answers `{}` when there is no subscription.
pub async fn get_subscription(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((platform, name)): Path<(String, String)>,
    Query(query): Query<CommonQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = check_key(&state, query.api_key.as_deref()) {
        return rejection;
    }

    match state.get_subscription(&platform, &name) {
        Some(sub) => (StatusCode::OK, Json(sub.clone())).into_response(),
        None => (StatusCode::OK, Json(serde_json::json!({}))).into_response(),
    }
}

/// POST /subscriptions/{platform}/{project}
pub async fn create_subscription(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((platform, name)): Path<(String, String)>,
    Query(query): Query<CommonQuery>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = check_key(&state, query.api_key.as_deref()) {
        return rejection;
    }

    match state.subscribe(&platform, &name, query.include_prerelease()) {
        Some(sub) => (StatusCode::CREATED, Json(sub.clone())).into_response(),
        None => not_found(&platform, &name),
    }
}

/// PUT /subscriptions/{platform}/{project}
pub async fn update_subscription(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((platform, name)): Path<(String, String)>,
    Query(query): Query<CommonQuery>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = check_key(&state, query.api_key.as_deref()) {
        return rejection;
    }

    match state.update_subscription(&platform, &name, query.include_prerelease()) {
        Some(sub) => (StatusCode::OK, Json(sub.clone())).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            &format!("Not subscribed to {}/{}", platform, name),
        ),
    }
}

/// DELETE /subscriptions/{platform}/{project}
pub async fn delete_subscription(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((platform, name)): Path<(String, String)>,
    Query(query): Query<CommonQuery>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = check_key(&state, query.api_key.as_deref()) {
        return rejection;
    }

    if state.unsubscribe(&platform, &name) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        error_response(
            StatusCode::NOT_FOUND,
            &format!("Not subscribed to {}/{}", platform, name),
        )
    }
}
