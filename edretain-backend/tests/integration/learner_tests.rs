// tests/integration/learner_tests.rs

use crate::common::app_helper::{get_json, setup_app};
use crate::common::test_data::{
    create_activity, create_plan, create_snapshot, create_user, ymd, SnapshotFixture,
};
use axum::http::StatusCode;
use chrono::Duration;
use edretain_backend::domain::date_key::today;
use serde_json::Value;

fn find_user<'a>(rows: &'a [Value], user_id: &str) -> &'a Value {
    rows.iter()
        .find(|row| row["user_id"] == user_id)
        .unwrap_or_else(|| panic!("{} not in cohort", user_id))
}

#[tokio::test]
async fn test_rfm_analysis_uses_latest_snapshot_per_user() {
    let (_app, db) = setup_app().await;
    let user = create_user(&db.connection, "USER_000001", "Japan", None).await;

    create_snapshot(
        &db.connection,
        user,
        ymd(2025, 1, 1),
        SnapshotFixture {
            scores: Some((1, 1, 1)),
            segment_label: Some("Dormant".to_string()),
            churn_probability: Some(0.9),
            ..Default::default()
        },
    )
    .await;
    create_snapshot(
        &db.connection,
        user,
        ymd(2025, 2, 1),
        SnapshotFixture {
            scores: Some((5, 4, 3)),
            segment_label: Some("Champions".to_string()),
            churn_probability: Some(0.125),
            clv_value: Some(420.5),
            ..Default::default()
        },
    )
    .await;

    let (status, json) = get_json(&db, "/learners/rfm-analysis").await;

    assert_eq!(status, StatusCode::OK);
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    let row = find_user(rows, "USER_000001");
    assert_eq!(row["segment"], "Champions");
    assert_eq!(row["rfm_score"], 12);
    assert_eq!(row["churn_risk_pct"].as_f64().unwrap(), 12.5);
    assert_eq!(row["clv"].as_f64().unwrap(), 420.5);
    assert_eq!(row["country"], "Japan");
}

#[tokio::test]
async fn test_rfm_score_treats_missing_components_as_zero() {
    let (_app, db) = setup_app().await;
    let user = create_user(&db.connection, "USER_000002", "Brazil", None).await;
    create_snapshot(
        &db.connection,
        user,
        ymd(2025, 3, 1),
        SnapshotFixture::default(),
    )
    .await;

    let (status, json) = get_json(&db, "/learners/rfm-analysis").await;

    assert_eq!(status, StatusCode::OK);
    let row = find_user(json.as_array().unwrap(), "USER_000002");
    assert_eq!(row["rfm_score"], 0);
    assert_eq!(row["segment"], "Unclassified");
    assert!(row["churn_risk_pct"].is_null());
}

#[tokio::test]
async fn test_rfm_analysis_filters_and_orders_cohort() {
    let (_app, db) = setup_app().await;
    let premium = create_plan(&db.connection, "PREMIUM_MONTHLY", "Premium", 29.99).await;
    let standard = create_plan(&db.connection, "STANDARD_MONTHLY", "Standard", 9.99).await;

    let high = create_user(&db.connection, "USER_000010", "Japan", Some(premium)).await;
    let low = create_user(&db.connection, "USER_000011", "Japan", Some(premium)).await;
    let other_country = create_user(&db.connection, "USER_000012", "India", Some(premium)).await;
    let other_tier = create_user(&db.connection, "USER_000013", "Japan", Some(standard)).await;

    for (user, plan, scores) in [
        (high, premium, (5, 5, 5)),
        (low, premium, (2, 1, 1)),
        (other_country, premium, (5, 5, 4)),
        (other_tier, standard, (4, 4, 4)),
    ] {
        create_snapshot(
            &db.connection,
            user,
            ymd(2025, 2, 1),
            SnapshotFixture {
                plan_key: Some(plan),
                scores: Some(scores),
                ..Default::default()
            },
        )
        .await;
        create_activity(&db.connection, user, ymd(2025, 2, 1), Some(plan), 2, 20).await;
    }

    let (status, json) = get_json(
        &db,
        "/learners/rfm-analysis?country=Japan&subscription_tier=premium",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["user_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["USER_000010", "USER_000011"]);
    assert_eq!(json[0]["last_active_days_ago"], 2);

    let (status, json) = get_json(&db, "/learners/rfm-analysis?limit=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["user_id"], "USER_000010");
}

#[tokio::test]
async fn test_rfm_analysis_rejects_unknown_tier() {
    let (_app, db) = setup_app().await;

    let (status, json) = get_json(&db, "/learners/rfm-analysis?subscription_tier=Platinum").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_same_day_activity_rows_resolve_to_latest_insert() {
    let (_app, db) = setup_app().await;
    let user = create_user(&db.connection, "USER_000030", "Japan", None).await;
    create_snapshot(
        &db.connection,
        user,
        today(),
        SnapshotFixture {
            scores: Some((2, 2, 2)),
            segment_label: Some("At Risk".to_string()),
            churn_probability: Some(0.8),
            ..Default::default()
        },
    )
    .await;

    // 同じユーザー・同じ日に2行。後から入った行が採用される
    let yesterday = today() - Duration::days(1);
    create_activity(&db.connection, user, yesterday, None, 3, 12).await;
    create_activity(&db.connection, user, yesterday, None, 9, 11).await;

    let (status, json) = get_json(&db, "/learners/rfm-analysis").await;
    assert_eq!(status, StatusCode::OK);
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(find_user(rows, "USER_000030")["last_active_days_ago"], 9);

    let (status, json) = get_json(&db, "/high-risk/learners").await;
    assert_eq!(status, StatusCode::OK);
    let learners = json.as_array().unwrap();
    assert_eq!(learners.len(), 1);
    assert_eq!(learners[0]["name"], "USER_000030");
    assert_eq!(learners[0]["days_inactive"], 9);
}
