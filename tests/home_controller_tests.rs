mod common;

use axum::http::StatusCode;
use common::default_app;

#[tokio::test]
async fn root_reports_running() {
    let app = default_app();

    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "CapitalCare backend running");
}

#[tokio::test]
async fn db_health_pings_store() {
    let app = default_app();

    let (status, body) = app.get("/health/db").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["db"], "ok");
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let app = default_app();

    let (status, body) = app.get("/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}
