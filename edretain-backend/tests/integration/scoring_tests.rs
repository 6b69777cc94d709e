// tests/integration/scoring_tests.rs

use crate::common::app_helper::{get_json, json_request, send, setup_app};
use crate::common::test_data::{create_activity, create_plan, create_user, ymd};
use axum::http::StatusCode;
use chrono::Duration;
use edretain_backend::config::AppConfig;
use edretain_backend::domain::date_key::{date_key_of, today};
use edretain_backend::repository::activity_repository::ActivityRepository;
use edretain_backend::service::snapshot_scoring_service::SnapshotScoringService;
use serde_json::{json, Value};
use std::sync::Arc;

fn total_score(snapshot: &Value) -> i64 {
    ["rfm_r_score", "rfm_f_score", "rfm_m_score"]
        .iter()
        .map(|key| snapshot[*key].as_i64().unwrap_or(0))
        .sum()
}

#[tokio::test]
async fn test_run_scores_learners_and_writes_dashboard_row() {
    let (_app, db) = setup_app().await;
    let premium = create_plan(&db.connection, "PREMIUM_MONTHLY", "Premium", 29.99).await;
    let free = create_plan(&db.connection, "FREE", "Free", 0.0).await;

    let engaged = create_user(&db.connection, "USER_000001", "Japan", Some(premium)).await;
    let casual = create_user(&db.connection, "USER_000002", "Japan", Some(free)).await;
    let lapsed = create_user(&db.connection, "USER_000003", "Japan", Some(free)).await;

    let now = today();
    create_activity(&db.connection, engaged, now - Duration::days(1), Some(premium), 1, 25).await;
    create_activity(&db.connection, engaged, now, Some(premium), 0, 26).await;
    create_activity(&db.connection, casual, now - Duration::days(3), None, 5, 10).await;
    create_activity(&db.connection, lapsed, now - Duration::days(20), None, 40, 1).await;

    let (status, json) = send(&db, json_request("POST", "/snapshots/run", &json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    let summary = &json["data"];
    assert_eq!(summary["snapshot_date_key"], date_key_of(now));
    assert_eq!(summary["users_scored"], 3);
    assert_eq!(summary["rows_written"], 3);
    assert_eq!(summary["dashboard_metrics_written"], true);

    let (_, engaged_rows) = get_json(&db, &format!("/snapshots?user_key={}", engaged)).await;
    let (_, lapsed_rows) = get_json(&db, &format!("/snapshots?user_key={}", lapsed)).await;
    let engaged_snapshot = &engaged_rows[0];
    let lapsed_snapshot = &lapsed_rows[0];

    assert_eq!(engaged_snapshot["rfm_recency"], 0);
    assert_eq!(engaged_snapshot["rfm_frequency"], 26);
    assert_eq!(engaged_snapshot["rfm_segment"].as_str().unwrap().len(), 3);
    assert!(total_score(engaged_snapshot) > total_score(lapsed_snapshot));
    assert!(engaged_snapshot["churn_probability"].is_null());
    assert_eq!(engaged_snapshot["model_version"], "rfm-v1");

    // 当日のダッシュボード行が読める
    let (status, json) = get_json(&db, "/dashboard/active-premium-learners").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["active_premium_learners"], 1);
}

#[tokio::test]
async fn test_rerun_replaces_rows_for_the_same_day() {
    let (_app, db) = setup_app().await;
    let user = create_user(&db.connection, "USER_000001", "Japan", None).await;
    create_activity(&db.connection, user, today(), None, 2, 12).await;

    for _ in 0..2 {
        let (status, _) = send(&db, json_request("POST", "/snapshots/run", &json!({}))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, json) = get_json(&db, &format!("/snapshots?user_key={}", user)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_run_without_activity_writes_nothing() {
    let (_app, db) = setup_app().await;

    let (status, json) = send(&db, json_request("POST", "/snapshots/run", &json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["users_scored"], 0);
    assert_eq!(json["data"]["dashboard_metrics_written"], false);
}

#[tokio::test]
async fn test_run_for_past_date_ignores_later_activity() {
    let (_app, db) = setup_app().await;
    let user = create_user(&db.connection, "USER_000001", "Japan", None).await;
    create_activity(&db.connection, user, ymd(2025, 1, 20), None, 4, 8).await;
    create_activity(&db.connection, user, ymd(2025, 3, 1), None, 0, 30).await;

    let config = AppConfig::for_testing();
    let service = SnapshotScoringService::new(
        db.connection.clone(),
        Arc::new(ActivityRepository::new(db.connection.clone())),
        config.scoring,
    );
    let summary = service.run(ymd(2025, 2, 1)).await.unwrap();
    assert_eq!(summary.snapshot_date_key, 20250201);
    assert_eq!(summary.users_scored, 1);

    let (_, json) = get_json(&db, &format!("/snapshots?user_key={}", user)).await;
    assert_eq!(json[0]["snapshot_date_key"], 20250201);
    assert_eq!(json[0]["rfm_recency"], 4);
    assert_eq!(json[0]["rfm_frequency"], 8);
}

#[tokio::test]
async fn test_dashboard_buckets_age_stale_activity_to_snapshot_date() {
    let (_app, db) = setup_app().await;
    let premium = create_plan(&db.connection, "PREMIUM_MONTHLY", "Premium", 29.99).await;
    let user = create_user(&db.connection, "USER_000001", "Japan", Some(premium)).await;
    // 最後の行は60日前。その時点では前日にログインしていた
    create_activity(&db.connection, user, today() - Duration::days(60), Some(premium), 1, 20).await;

    let (status, json) = send(&db, json_request("POST", "/snapshots/run", &json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["dashboard_metrics_written"], true);

    let (status, json) = get_json(&db, "/dashboard/learner-segmentation").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["highly_engaged"]["count"], 0);
    assert_eq!(json["dormant"]["count"], 1);

    let (_, json) = get_json(&db, "/dashboard/active-premium-learners").await;
    assert_eq!(json["active_premium_learners"], 0);

    let (_, json) = get_json(&db, "/dashboard/retention-churn-trend").await;
    let latest = json.as_array().unwrap().last().unwrap().clone();
    assert_eq!(latest["monthly_retention_rate"], 0.0);
    assert_eq!(latest["monthly_churn_rate"], 100.0);
}
