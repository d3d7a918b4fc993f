use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::app::AppState;
use crate::domain::ledger::LeadRow;
use crate::domain::project::{ContactInfo, NewProject, Project, UserSelection};
use crate::error::{ApiError, ApiResult};
use crate::middleware::client_ip;
use crate::middleware::rate_limit::DEFAULT_WINDOW;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSelectionRequest {
    #[serde(default)]
    pub selection: Option<UserSelection>,
    #[serde(default)]
    pub contact_info: Option<ContactInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    pub success: bool,
    pub data: Project,
    pub dashboard_url: String,
}

/// Create a project from the booking flow's plot/house selection and forward
/// a lead row to the ledger (best effort).
pub async fn create_selection(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateSelectionRequest>,
) -> ApiResult<Json<SelectionResponse>> {
    state
        .rate_limiter
        .check("selections_post", &client_ip(&headers), 30, DEFAULT_WINDOW)?;

    let selection = req
        .selection
        .ok_or_else(|| ApiError::BadRequest("Selection data is required".into()))?;

    let project = state.store.create(NewProject {
        name: None,
        selection: Some(selection.clone()),
        contact: req.contact_info.clone(),
    })?;

    state.ledger.record_lead(LeadRow::new(
        project.id,
        &selection,
        req.contact_info.as_ref(),
    ));

    tracing::info!(project_id = %project.id, "Selection saved");

    let dashboard_url = format!("/dashboard/{}", project.id);
    Ok(Json(SelectionResponse {
        success: true,
        data: project,
        dashboard_url,
    }))
}
