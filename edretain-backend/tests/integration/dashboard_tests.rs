// tests/integration/dashboard_tests.rs

use crate::common::app_helper::{get_json, setup_app};
use crate::common::test_data::{create_dashboard_metrics, create_feature_importance, ymd};
use axum::http::StatusCode;

const JANUARY: &str = "date_from=2025-01-01&date_to=2025-01-31";

#[tokio::test]
async fn test_active_premium_learners_uses_latest_row_in_range() {
    let (_app, db) = setup_app().await;
    create_dashboard_metrics(&db.connection, ymd(2025, 1, 10), 120, 30, 82.5).await;
    create_dashboard_metrics(&db.connection, ymd(2025, 1, 20), 150, 25, 84.0).await;
    create_dashboard_metrics(&db.connection, ymd(2025, 2, 5), 999, 1, 99.0).await;

    let (status, json) = get_json(
        &db,
        &format!("/dashboard/active-premium-learners?{}", JANUARY),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["active_premium_learners"], 150);
    assert!(json["active_premium_change_pct"].is_null());

    let (status, json) =
        get_json(&db, &format!("/dashboard/at-risk-learners?{}", JANUARY)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["at_risk_learners"], 25);

    let (status, json) = get_json(
        &db,
        &format!("/dashboard/average-retention-rate?{}", JANUARY),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["average_retention_rate"].as_f64().unwrap(), 84.0);
}

#[tokio::test]
async fn test_kpi_without_rows_in_range_is_not_found() {
    let (_app, db) = setup_app().await;
    create_dashboard_metrics(&db.connection, ymd(2025, 1, 10), 120, 30, 82.5).await;

    let (status, json) = get_json(
        &db,
        "/dashboard/active-premium-learners?date_from=2020-01-01&date_to=2020-01-31",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["error_type"], "not_found");
}

#[tokio::test]
async fn test_invalid_date_range_is_bad_request() {
    let (_app, db) = setup_app().await;

    let (status, _) = get_json(
        &db,
        "/dashboard/at-risk-learners?date_from=2025-02-01&date_to=2025-01-01",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = get_json(
        &db,
        "/dashboard/at-risk-learners?date_from=2025-13-45",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_retention_trend_is_ordered_and_empty_is_ok() {
    let (_app, db) = setup_app().await;
    create_dashboard_metrics(&db.connection, ymd(2025, 1, 20), 150, 25, 84.0).await;
    create_dashboard_metrics(&db.connection, ymd(2025, 1, 10), 120, 30, 82.5).await;

    let (status, json) = get_json(
        &db,
        &format!("/dashboard/retention-churn-trend?{}", JANUARY),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let points = json.as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["date"], "2025-01-10");
    assert_eq!(points[0]["month_name"], "January");
    assert_eq!(points[1]["date"], "2025-01-20");

    let (status, json) = get_json(
        &db,
        "/dashboard/retention-churn-trend?date_from=2020-01-01&date_to=2020-01-31",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_learner_segmentation_shape() {
    let (_app, db) = setup_app().await;
    create_dashboard_metrics(&db.connection, ymd(2025, 1, 10), 120, 3, 82.5).await;

    let (status, json) = get_json(
        &db,
        &format!("/dashboard/learner-segmentation?{}", JANUARY),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    for bucket in ["highly_engaged", "medium_engaged", "at_risk", "dormant"] {
        assert!(json[bucket]["count"].is_i64(), "missing count for {}", bucket);
        assert!(json[bucket]["pct"].is_f64(), "missing pct for {}", bucket);
    }
    assert_eq!(json["at_risk"]["count"], 3);
}

#[tokio::test]
async fn test_top_features_returns_five_ranked_features() {
    let (_app, db) = setup_app().await;
    create_feature_importance(
        &db.connection,
        ymd(2025, 1, 20),
        &[
            ("days_since_last_login", 0.31),
            ("active_days_last_30d", 0.22),
            ("minutes_watched", 0.15),
            ("lessons_completed", 0.12),
            ("sessions_count", 0.10),
            ("quizzes_attempted", 0.05),
        ],
    )
    .await;

    let (status, json) = get_json(
        &db,
        &format!("/dashboard/top-features-driving-churn?{}", JANUARY),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let features = json.as_array().unwrap();
    assert_eq!(features.len(), 5);
    assert_eq!(features[0]["feature_name"], "days_since_last_login");
    assert_eq!(features[0]["importance_rank"], 1);
    assert_eq!(features[4]["importance_rank"], 5);

    let (status, _) = get_json(
        &db,
        "/dashboard/top-features-driving-churn?date_from=2020-01-01&date_to=2020-01-31",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
