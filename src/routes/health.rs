use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: ServiceHealth,
}

#[derive(Serialize)]
pub struct ServiceHealth {
    pub storage: String,
    pub ledger: String,
}

/// Health check endpoint - public
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let storage_result = state.store.list();

    let storage_status = if storage_result.is_ok() { "ok" } else { "error" };
    let ledger_status = if state.ledger.is_enabled() {
        "enabled"
    } else {
        "disabled"
    };

    // Storage is the only critical dependency; the ledger is best-effort.
    let (status, status_code) = if storage_result.is_ok() {
        ("healthy", StatusCode::OK)
    } else {
        ("unhealthy", StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            services: ServiceHealth {
                storage: storage_status.to_string(),
                ledger: ledger_status.to_string(),
            },
        }),
    )
}
