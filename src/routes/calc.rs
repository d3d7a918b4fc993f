use axum::{extract::State, http::HeaderMap, Json};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::DataResponse;
use crate::app::AppState;
use crate::domain::calculation::CalculationInput;
use crate::domain::ledger::CalculationRow;
use crate::domain::project::{Project, ProjectPatch};
use crate::error::{ApiError, ApiResult};
use crate::middleware::client_ip;
use crate::middleware::rate_limit::DEFAULT_WINDOW;
use crate::pricing::compute_price;
use crate::progress::compute_progress;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalcRequest {
    pub project_id: Uuid,
    pub input: CalculationInput,
}

/// Validate input, run the pricing engine, persist the `{input, result}`
/// pair, refresh progress, and enqueue a ledger row. The ledger append is
/// fire-and-forget and can never fail this request.
pub async fn calculate(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CalcRequest>,
) -> ApiResult<DataResponse<Project>> {
    state
        .rate_limiter
        .check("calc_post", &client_ip(&headers), 60, DEFAULT_WINDOW)?;

    req.input.validate().map_err(ApiError::Validation)?;

    let project = state
        .store
        .get(req.project_id)?
        .ok_or_else(|| ApiError::NotFound("Project not found".into()))?;

    let result = compute_price(&req.input);

    let updated = state
        .store
        .update(
            project.id,
            ProjectPatch {
                calculation_input: Some(req.input.clone()),
                calculation_result: Some(result.clone()),
                ..Default::default()
            },
        )?
        .ok_or_else(|| ApiError::NotFound("Project not found".into()))?;

    let progress = compute_progress(&updated);
    let updated = state
        .store
        .update(
            project.id,
            ProjectPatch {
                progress: Some(progress),
                ..Default::default()
            },
        )?
        .ok_or_else(|| ApiError::NotFound("Project not found".into()))?;

    state
        .ledger
        .record_calculation(CalculationRow::new(project.id, &req.input, &result));

    tracing::info!(
        project_id = %project.id,
        pricing_version = %result.pricing_version,
        total_price = result.total_price,
        "Calculation stored"
    );

    Ok(DataResponse::new(updated))
}
