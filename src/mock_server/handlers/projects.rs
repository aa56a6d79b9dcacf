//! Project and search endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{check_key, not_found, CommonQuery};
use crate::mock_server::state::{page_of, MockState};
use crate::{Project, ProjectDependencies, DEFAULT_PAGE, DEFAULT_PER_PAGE};

/// Query parameters for project search.
#[derive(Debug, Default, Deserialize)]
pub struct SearchProjectsQuery {
    pub api_key: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub q: Option<String>,
    pub sort: Option<String>,
    pub platforms: Option<String>,
}

/// GET /search
pub async fn search_projects(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<SearchProjectsQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = check_key(&state, query.api_key.as_deref()) {
        return rejection;
    }

    let platforms: Vec<String> = query
        .platforms
        .as_deref()
        .map(|p| p.split(',').map(str::to_string).collect())
        .unwrap_or_default();

    let found: Vec<Project> = state
        .search_projects(query.q.as_deref(), &platforms, query.sort.as_deref())
        .into_iter()
        .cloned()
        .collect();

    let page = query.page.unwrap_or(DEFAULT_PAGE);
    let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE);

    (StatusCode::OK, Json(page_of(&found, page, per_page))).into_response()
}

/// GET /{platform}/{project}
pub async fn get_project(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((platform, name)): Path<(String, String)>,
    Query(query): Query<CommonQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = check_key(&state, query.api_key.as_deref()) {
        return rejection;
    }

    match state.get_project(&platform, &name) {
        Some(project) => (StatusCode::OK, Json(project.clone())).into_response(),
        None => not_found(&platform, &name),
    }
}

/// GET /{platform}/{project}/{version}/dependencies
pub async fn get_project_dependencies(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((platform, name, version)): Path<(String, String, String)>,
    Query(query): Query<CommonQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = check_key(&state, query.api_key.as_deref()) {
        return rejection;
    }

    let (Some(project), Some(dependencies)) = (
        state.get_project(&platform, &name),
        state.get_dependencies(&platform, &name),
    ) else {
        return not_found(&platform, &name);
    };

    let version = if version == "latest" {
        project.latest_version().map(str::to_string)
    } else {
        Some(version)
    };

    let body = ProjectDependencies {
        project: project.clone(),
        dependencies_for_version: version,
        dependencies,
    };
    (StatusCode::OK, Json(body)).into_response()
}
