// tests/integration/campaign_tests.rs

use crate::common::app_helper::{get_json, setup_app};
use crate::common::test_data::{create_campaign_performance, ymd};
use axum::http::StatusCode;

#[tokio::test]
async fn test_campaign_reads_are_empty_without_rows() {
    let (_app, db) = setup_app().await;

    for uri in ["/campaigns/overview", "/campaigns/performance-comparison"] {
        let (status, json) = get_json(&db, uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(json.as_array().unwrap().len(), 0, "{}", uri);
    }
}

#[tokio::test]
async fn test_overview_scales_fractions_to_percentages() {
    let (_app, db) = setup_app().await;
    create_campaign_performance(&db.connection, ymd(2025, 1, 15), "Old Push", 0.10, 0.01).await;
    create_campaign_performance(&db.connection, ymd(2025, 2, 1), "Win-Back", 0.45, 0.12).await;

    let (status, json) = get_json(&db, "/campaigns/overview").await;

    assert_eq!(status, StatusCode::OK);
    let campaigns = json.as_array().unwrap();
    assert_eq!(campaigns.len(), 1);
    assert_eq!(campaigns[0]["campaign"], "Win-Back");
    assert_eq!(campaigns[0]["open_rate_pct"].as_f64().unwrap(), 45.0);
    assert_eq!(campaigns[0]["retention_lift_pct"].as_f64().unwrap(), 12.0);
    assert_eq!(campaigns[0]["launch_date"], "2025-01-05");
    assert_eq!(campaigns[0]["status"], "Active");
}

#[tokio::test]
async fn test_performance_comparison() {
    let (_app, db) = setup_app().await;
    create_campaign_performance(&db.connection, ymd(2025, 2, 1), "Win-Back", 0.45, 0.12).await;

    let (status, json) = get_json(&db, "/campaigns/performance-comparison").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["campaign"], "Win-Back");
    assert_eq!(json[0]["churn_rate_pct"].as_f64().unwrap(), 20.0);
    assert_eq!(json[0]["retention_lift_pct"].as_f64().unwrap(), 12.0);
}
