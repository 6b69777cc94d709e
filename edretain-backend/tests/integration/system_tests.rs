// tests/integration/system_tests.rs

use crate::common::app_helper::{get_json, setup_app};
use axum::http::StatusCode;

#[tokio::test]
async fn test_health_reports_database_connection() {
    let (_app, db) = setup_app().await;

    let (status, json) = get_json(&db, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["database"], "connected");
}

#[tokio::test]
async fn test_unknown_route_returns_not_found() {
    let (_app, db) = setup_app().await;

    let (status, _) = get_json(&db, "/tasks").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
