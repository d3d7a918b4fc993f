pub mod calc;
pub mod health;
pub mod projects;
pub mod selections;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        // Projects
        .route(
            "/projects",
            post(projects::create_project).get(projects::list_projects),
        )
        .route(
            "/projects/:project_id",
            get(projects::get_project).patch(projects::update_project),
        )
        // Pricing calculation
        .route("/calc", post(calc::calculate))
        // Booking flow entry point
        .route("/selections", post(selections::create_selection))
}
