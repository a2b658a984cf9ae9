//! Health, liveness, and API documentation routes.

mod helpers;

use helpers::{setup_test_app, setup_test_app_with, TestAppOptions};

#[tokio::test]
async fn test_health_reports_storage() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "healthy");
}

#[tokio::test]
async fn test_health_without_bucket() {
    let app = setup_test_app_with(TestAppOptions {
        with_bucket: false,
        ..Default::default()
    })
    .await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["storage"], "not_configured");
}

#[tokio::test]
async fn test_liveness() {
    let app = setup_test_app().await;

    let response = app.client().get("/live").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_openapi_lists_snapshot_endpoints() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert!(body["paths"].get("/api/s4/aircraft/download").is_some());
    assert!(body["paths"].get("/api/s4/aircraft/prepare").is_some());
}

#[tokio::test]
async fn test_download_requires_post() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/s4/aircraft/download").await;

    assert_eq!(response.status_code(), 405);
}
