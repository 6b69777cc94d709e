// tests/integration/high_risk_tests.rs

use crate::common::app_helper::{get_json, setup_app};
use crate::common::db::TestDatabase;
use crate::common::test_data::{
    create_churn_reason, create_plan, create_snapshot, create_user, ymd, SnapshotFixture,
};
use axum::http::StatusCode;
use chrono::Duration;
use edretain_backend::domain::date_key::today;

async fn snapshot_with_probability(
    db: &TestDatabase,
    user_key: i32,
    days_ago: i64,
    plan_key: Option<i32>,
    probability: f64,
) {
    create_snapshot(
        &db.connection,
        user_key,
        today() - Duration::days(days_ago),
        SnapshotFixture {
            plan_key,
            segment_label: Some("Inactive Learners".to_string()),
            churn_probability: Some(probability),
            ..Default::default()
        },
    )
    .await;
}

#[tokio::test]
async fn test_summary_counts_new_high_risk_against_last_week() {
    let (_app, db) = setup_app().await;
    let steady = create_user(&db.connection, "USER_000001", "Japan", None).await;
    let rising = create_user(&db.connection, "USER_000002", "Japan", None).await;
    let first_seen = create_user(&db.connection, "USER_000003", "Japan", None).await;
    let safe = create_user(&db.connection, "USER_000004", "Japan", None).await;

    snapshot_with_probability(&db, steady, 10, None, 0.9).await;
    snapshot_with_probability(&db, steady, 0, None, 0.9).await;
    snapshot_with_probability(&db, rising, 10, None, 0.2).await;
    snapshot_with_probability(&db, rising, 0, None, 0.85).await;
    snapshot_with_probability(&db, first_seen, 0, None, 0.75).await;
    snapshot_with_probability(&db, safe, 0, None, 0.3).await;

    let (status, json) = get_json(&db, "/high-risk/summary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_high_risk_learners"], 3);
    assert_eq!(json["new_high_risk_recent"], 2);

    let (status, json) = get_json(&db, "/high-risk/summary?risk_threshold=0.8").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_high_risk_learners"], 2);
}

#[tokio::test]
async fn test_learners_are_ordered_with_percentages_and_actions() {
    let (_app, db) = setup_app().await;
    let a = create_user(&db.connection, "USER_000010", "Japan", None).await;
    let b = create_user(&db.connection, "USER_000011", "Japan", None).await;
    snapshot_with_probability(&db, a, 0, None, 0.75).await;
    snapshot_with_probability(&db, b, 0, None, 0.95).await;

    let (status, json) = get_json(&db, "/high-risk/learners").await;

    assert_eq!(status, StatusCode::OK);
    let learners = json.as_array().unwrap();
    assert_eq!(learners.len(), 2);
    assert_eq!(learners[0]["name"], "USER_000011");
    assert_eq!(learners[0]["churn_probability"].as_f64().unwrap(), 95.0);
    assert_eq!(learners[0]["segment"], "Inactive Learners");
    assert!(learners[0]["suggested_action"]["channel"].is_string());
    assert!(learners[0]["suggested_action"]["offer"].is_string());

    // 同じユーザーには毎回同じ施策
    let (_, again) = get_json(&db, "/high-risk/learners").await;
    assert_eq!(again[0]["suggested_action"], learners[0]["suggested_action"]);
}

#[tokio::test]
async fn test_churn_by_tier_percentages_sum_to_hundred() {
    let (_app, db) = setup_app().await;
    let premium = create_plan(&db.connection, "PREMIUM_MONTHLY", "Premium", 29.99).await;
    let standard = create_plan(&db.connection, "STANDARD_MONTHLY", "Standard", 9.99).await;
    let free = create_plan(&db.connection, "FREE", "Free", 0.0).await;

    let plans = [premium, premium, premium, standard, standard, free, free];
    for (i, plan) in plans.iter().enumerate() {
        let user = create_user(&db.connection, &format!("USER_{:06}", i + 1), "Japan", Some(*plan)).await;
        snapshot_with_probability(&db, user, 0, Some(*plan), 0.8).await;
    }

    let (status, json) = get_json(&db, "/high-risk/churn-by-tier?risk_threshold=0.7").await;

    assert_eq!(status, StatusCode::OK);
    let tiers = json.as_array().unwrap();
    assert_eq!(tiers.len(), 3);
    assert_eq!(tiers[0]["tier"], "Premium");
    assert_eq!(tiers[0]["count"], 3);

    let total: f64 = tiers.iter().map(|t| t["pct"].as_f64().unwrap()).sum();
    assert!((total - 100.0).abs() < 0.05, "pct sum was {}", total);

    let (status, json) = get_json(
        &db,
        "/high-risk/churn-by-tier?risk_threshold=0.7&subscription_tier=Standard",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["pct"].as_f64().unwrap(), 100.0);
}

#[tokio::test]
async fn test_reasons_for_churn_reads_latest_date() {
    let (_app, db) = setup_app().await;

    let (status, json) = get_json(&db, "/high-risk/reasons-for-churn").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 0);

    create_churn_reason(&db.connection, ymd(2025, 1, 1), "price", "Too expensive", 10).await;
    create_churn_reason(&db.connection, ymd(2025, 2, 1), "price", "Too expensive", 40).await;
    create_churn_reason(&db.connection, ymd(2025, 2, 1), "content", "Not enough content", 25).await;

    let (status, json) = get_json(&db, "/high-risk/reasons-for-churn").await;
    assert_eq!(status, StatusCode::OK);
    let reasons = json.as_array().unwrap();
    assert_eq!(reasons.len(), 2);
    assert_eq!(reasons[0]["reason"], "Too expensive");
    assert_eq!(reasons[0]["count"], 40);
}

#[tokio::test]
async fn test_threshold_out_of_range_is_bad_request() {
    let (_app, db) = setup_app().await;

    let (status, _) = get_json(&db, "/high-risk/learners?risk_threshold=1.5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(&db, "/high-risk/summary?risk_threshold=high").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_finite_thresholds_are_rejected() {
    let (_app, db) = setup_app().await;

    for uri in [
        "/high-risk/summary?risk_threshold=NaN",
        "/high-risk/learners?risk_threshold=inf",
        "/count_risk_customers?threshold=NaN",
    ] {
        let (status, json) = get_json(&db, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(json["success"], false);
    }
}
