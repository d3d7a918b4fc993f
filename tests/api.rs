//! End-to-end tests driving the router in-process with an in-memory store
//! and the ledger disabled.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use stroydom_backend::app::{create_app, AppState};
use stroydom_backend::config::{Environment, Settings, StorageBackend};
use stroydom_backend::services::LedgerHandle;
use stroydom_backend::storage::MemoryStore;

fn test_settings() -> Settings {
    Settings {
        env: Environment::Dev,
        server_addr: "127.0.0.1:0".into(),
        storage_backend: StorageBackend::Memory,
        storage_file_path: String::new(),
        cors_allow_origins: vec!["http://localhost:3000".into()],
        ledger_webhook_url: None,
        ledger_token: None,
        ledger_timeout_seconds: 10,
    }
}

fn test_app() -> Router {
    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        test_settings(),
        LedgerHandle::disabled(),
    );
    create_app(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn base_input() -> Value {
    json!({
        "area": 100.0,
        "floors": 1,
        "wallMaterial": "wood",
        "foundationType": "slab",
        "finishLevel": "basic",
        "engineeringOptions": [],
        "extras": [],
        "promoMultiplier": 1.0
    })
}

#[tokio::test]
async fn health_is_ok() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["storage"], "ok");
    assert_eq!(body["services"]["ledger"], "disabled");
}

#[tokio::test]
async fn selection_then_calc_flow() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/selections",
        Some(json!({
            "selection": { "plotId": "plot-5", "constructionFormat": "turnkey" },
            "contactInfo": { "name": "Иван" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let project_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["dashboardUrl"], format!("/dashboard/{project_id}"));

    let (status, body) = send(
        &app,
        "POST",
        "/calc",
        Some(json!({ "projectId": project_id, "input": base_input() })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let result = &body["data"]["calculationResult"];
    assert_eq!(result["pricingVersion"], "2025-10-01");
    assert_eq!(result["basePrice"].as_f64(), Some(7_500_000.0));
    assert_eq!(result["totalPrice"].as_f64(), Some(9_300_000.0));
    assert_eq!(result["items"].as_array().unwrap().len(), 1);
    assert_eq!(result["stages"].as_array().unwrap().len(), 5);

    // selection + parameters + summary done, contacts still missing
    assert_eq!(body["data"]["progress"]["percent"].as_u64(), Some(75));
}

#[tokio::test]
async fn calc_rejects_invalid_input() {
    let app = test_app();

    let (_, body) = send(&app, "POST", "/projects", Some(json!({}))).await;
    let project_id = body["data"]["id"].as_str().unwrap().to_string();

    let mut input = base_input();
    input["area"] = json!(5.0);
    let (status, body) = send(
        &app,
        "POST",
        "/calc",
        Some(json!({ "projectId": project_id, "input": input })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["details"][0]["field"], "area");
}

#[tokio::test]
async fn calc_on_unknown_project_is_not_found() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/calc",
        Some(json!({
            "projectId": "00000000-0000-0000-0000-000000000000",
            "input": base_input()
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn patch_updates_contact_and_progress() {
    let app = test_app();

    let (_, body) = send(
        &app,
        "POST",
        "/projects",
        Some(json!({ "name": "Дом мечты" })),
    )
    .await;
    let project_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/projects/{project_id}"),
        Some(json!({ "contact": { "email": "ivan@example.com" } })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["contact"]["email"], "ivan@example.com");
    // only the contacts step is complete
    assert_eq!(body["data"]["progress"]["percent"].as_u64(), Some(25));
}

#[tokio::test]
async fn get_unknown_project_is_not_found() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "GET",
        "/projects/11111111-1111-1111-1111-111111111111",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn list_projects_returns_created_projects() {
    let app = test_app();

    for name in ["Первый", "Второй"] {
        let (status, _) = send(&app, "POST", "/projects", Some(json!({ "name": name }))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, "GET", "/projects", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn selection_is_required() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/selections",
        Some(json!({ "contactInfo": { "name": "Иван" } })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(body["message"], "Selection data is required");
}
