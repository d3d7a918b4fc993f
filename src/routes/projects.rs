use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::DataResponse;
use crate::app::AppState;
use crate::domain::project::{NewProject, Project, ProjectPatch};
use crate::error::{ApiError, ApiResult};
use crate::middleware::client_ip;
use crate::middleware::rate_limit::DEFAULT_WINDOW;
use crate::progress::compute_progress;

/// Create a new project
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<NewProject>,
) -> ApiResult<DataResponse<Project>> {
    state
        .rate_limiter
        .check("projects_post", &client_ip(&headers), 30, DEFAULT_WINDOW)?;

    let project = state.store.create(req)?;
    tracing::info!(project_id = %project.id, "Project created");
    Ok(DataResponse::new(project))
}

/// List all projects
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<DataResponse<Vec<Project>>> {
    state
        .rate_limiter
        .check("projects_get", &client_ip(&headers), 120, DEFAULT_WINDOW)?;

    let projects = state.store.list()?;
    Ok(DataResponse::new(projects))
}

/// Get a specific project by ID
pub async fn get_project(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(project_id): Path<Uuid>,
) -> ApiResult<DataResponse<Project>> {
    state
        .rate_limiter
        .check("projects_get", &client_ip(&headers), 120, DEFAULT_WINDOW)?;

    let project = state
        .store
        .get(project_id)?
        .ok_or_else(|| ApiError::NotFound("Project not found".into()))?;
    Ok(DataResponse::new(project))
}

/// Partially update a project, then refresh its derived progress
pub async fn update_project(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(project_id): Path<Uuid>,
    Json(patch): Json<ProjectPatch>,
) -> ApiResult<DataResponse<Project>> {
    state
        .rate_limiter
        .check("projects_patch", &client_ip(&headers), 60, DEFAULT_WINDOW)?;

    if let Some(input) = &patch.calculation_input {
        input.validate().map_err(ApiError::Validation)?;
    }

    let updated = state
        .store
        .update(project_id, patch)?
        .ok_or_else(|| ApiError::NotFound("Project not found".into()))?;

    // Progress is derived state; refresh it after every mutation.
    let progress = compute_progress(&updated);
    let updated = state
        .store
        .update(
            project_id,
            ProjectPatch {
                progress: Some(progress),
                ..Default::default()
            },
        )?
        .ok_or_else(|| ApiError::NotFound("Project not found".into()))?;

    tracing::info!(project_id = %project_id, "Project updated");
    Ok(DataResponse::new(updated))
}
