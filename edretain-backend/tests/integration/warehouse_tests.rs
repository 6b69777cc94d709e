// tests/integration/warehouse_tests.rs

use crate::common::app_helper::{get_json, json_request, send, setup_app};
use crate::common::test_data::{
    create_activity, create_plan, create_snapshot, create_user, ensure_date, ymd,
    SnapshotFixture,
};
use axum::http::StatusCode;
use edretain_backend::domain::date_key::today;
use serde_json::json;

#[tokio::test]
async fn test_create_date_derives_calendar_fields() {
    let (_app, db) = setup_app().await;

    let (status, json) = send(
        &db,
        json_request("POST", "/dates", &json!({ "full_date": "2025-01-04" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["date_key"], 20250104);
    assert_eq!(json["year"], 2025);
    assert_eq!(json["quarter"], 1);
    assert_eq!(json["month_name"], "January");
    assert_eq!(json["day_of_week"], 6);
    assert_eq!(json["day_name"], "Saturday");
    assert_eq!(json["is_weekend"], true);

    let (status, _) = send(
        &db,
        json_request("POST", "/dates", &json!({ "full_date": "2025-01-04" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_date_rejects_mismatched_key() {
    let (_app, db) = setup_app().await;
    ensure_date(&db.connection, ymd(2025, 1, 4)).await;

    let (status, _) = send(
        &db,
        json_request("PUT", "/dates/20250104", &json!({ "full_date": "2025-01-05" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_user_crud_lifecycle() {
    let (_app, db) = setup_app().await;
    ensure_date(&db.connection, ymd(2025, 1, 1)).await;

    let body = json!({
        "user_id_nk": "USER_100001",
        "signup_date_key": 20250101,
        "country": "Japan",
        "current_status": "Active"
    });
    let (status, created) = send(&db, json_request("POST", "/users", &body)).await;
    assert_eq!(status, StatusCode::CREATED);
    let user_key = created["user_key"].as_i64().unwrap();
    assert_eq!(created["user_id_nk"], "USER_100001");

    let (status, _) = send(&db, json_request("POST", "/users", &body)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, fetched) = get_json(&db, &format!("/users/{}", user_key)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["country"], "Japan");

    let (status, updated) = send(
        &db,
        json_request(
            "PUT",
            &format!("/users/{}", user_key),
            &json!({ "city": "Osaka", "current_status": "Paused" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["city"], "Osaka");
    assert_eq!(updated["current_status"], "Paused");
    assert_eq!(updated["country"], "Japan");

    let (status, list) = get_json(&db, "/users?offset=0&limit=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, deleted) = send(
        &db,
        json_request("DELETE", &format!("/users/{}", user_key), &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["success"], true);
    assert!(deleted["message"].as_str().unwrap().contains("deleted"));

    let (status, _) = get_json(&db, &format!("/users/{}", user_key)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_rejects_bad_key_and_status() {
    let (_app, db) = setup_app().await;

    let (status, _) = get_json(&db, "/users/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = send(
        &db,
        json_request(
            "POST",
            "/users",
            &json!({
                "user_id_nk": "USER_100002",
                "signup_date_key": 20250101,
                "current_status": "Sleeping"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_type"], "validation_errors");
}

#[tokio::test]
async fn test_create_plan_validates_tier() {
    let (_app, db) = setup_app().await;

    let mut body = json!({
        "plan_id_nk": "GOLD_MONTHLY",
        "plan_name": "Gold",
        "tier": "Gold",
        "billing_cycle": "Monthly",
        "base_price": 19.99,
        "currency": "USD"
    });
    let (status, _) = send(&db, json_request("POST", "/plans", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    body["tier"] = json!("Premium");
    let (status, json) = send(&db, json_request("POST", "/plans", &body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["tier"], "Premium");
}

#[tokio::test]
async fn test_campaign_interaction_enforces_funnel_order() {
    let (_app, db) = setup_app().await;
    let user = create_user(&db.connection, "USER_000001", "Japan", None).await;
    ensure_date(&db.connection, ymd(2025, 1, 10)).await;

    let (status, campaign) = send(
        &db,
        json_request(
            "POST",
            "/campaigns",
            &json!({
                "campaign_id_nk": "WINBACK_Q1",
                "campaign_name": "Win-back Q1",
                "start_date_key": 20250101,
                "end_date_key": 20250331
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, channel) = send(
        &db,
        json_request("POST", "/channels", &json!({ "channel_name": "Email" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let mut body = json!({
        "user_key": user,
        "campaign_key": campaign["campaign_key"],
        "date_key": 20250110,
        "channel_key": channel["channel_key"],
        "sent_flag": true,
        "opened_flag": false,
        "clicked_flag": true
    });
    let (status, _) = send(&db, json_request("POST", "/campaign-interactions", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    body["opened_flag"] = json!(true);
    let (status, json) = send(&db, json_request("POST", "/campaign-interactions", &body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["clicked_flag"], true);
}

#[tokio::test]
async fn test_campaign_rejects_reversed_dates() {
    let (_app, db) = setup_app().await;

    let (status, _) = send(
        &db,
        json_request(
            "POST",
            "/campaigns",
            &json!({
                "campaign_id_nk": "LATE",
                "campaign_name": "Late",
                "start_date_key": 20250301,
                "end_date_key": 20250101
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_activity_requires_existing_user() {
    let (_app, db) = setup_app().await;
    ensure_date(&db.connection, ymd(2025, 1, 10)).await;

    let body = json!({ "user_key": 9999, "date_key": 20250110, "logins_count": 1 });
    let (status, _) = send(&db, json_request("POST", "/activities", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let user = create_user(&db.connection, "USER_000001", "Japan", None).await;
    let body = json!({
        "user_key": user,
        "date_key": 20250110,
        "logins_count": 2,
        "active_days_last_30d": 12,
        "days_since_last_login": 1
    });
    let (status, _) = send(&db, json_request("POST", "/activities", &body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = get_json(&db, &format!("/activities?user_key={}", user)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["logins_count"], 2);
}

#[tokio::test]
async fn test_snapshot_ingest_rejects_duplicates() {
    let (_app, db) = setup_app().await;
    let user = create_user(&db.connection, "USER_000001", "Japan", None).await;
    ensure_date(&db.connection, ymd(2025, 1, 31)).await;

    let body = json!({
        "user_key": user,
        "snapshot_date_key": 20250131,
        "rfm_r_score": 4,
        "rfm_f_score": 3,
        "rfm_m_score": 2,
        "churn_probability": 0.42,
        "model_version": "external-v2"
    });
    let (status, json) = send(&db, json_request("POST", "/snapshots", &body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["model_version"], "external-v2");

    let (status, _) = send(&db, json_request("POST", "/snapshots", &body)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let mut invalid = body.clone();
    invalid["snapshot_date_key"] = json!(20250230);
    let (status, _) = send(&db, json_request("POST", "/snapshots", &invalid)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_count_risk_customers_uses_latest_snapshot() {
    let (_app, db) = setup_app().await;
    let plan = create_plan(&db.connection, "PREMIUM_MONTHLY", "Premium", 29.99).await;
    let risky = create_user(&db.connection, "USER_000001", "Japan", Some(plan)).await;
    let recovered = create_user(&db.connection, "USER_000002", "Japan", Some(plan)).await;
    let safe = create_user(&db.connection, "USER_000003", "Japan", Some(plan)).await;

    let now = today();
    let earlier = now - chrono::Duration::days(14);
    let with_probability = |p: f64| SnapshotFixture {
        churn_probability: Some(p),
        ..Default::default()
    };
    create_snapshot(&db.connection, risky, now, with_probability(0.85)).await;
    create_snapshot(&db.connection, recovered, earlier, with_probability(0.9)).await;
    create_snapshot(&db.connection, recovered, now, with_probability(0.3)).await;
    create_snapshot(&db.connection, safe, now, with_probability(0.1)).await;

    let (status, json) = get_json(&db, "/count_risk_customers?threshold=0.7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["threshold"], 0.7);
    assert_eq!(json["count"], 1);

    let (status, json) = get_json(&db, "/count_risk_customers?threshold=0.05").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 3);

    let (status, _) = get_json(&db, "/count_risk_customers?threshold=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_referenced_date_conflicts() {
    let (_app, db) = setup_app().await;
    let user = create_user(&db.connection, "USER_000040", "Japan", None).await;
    create_activity(&db.connection, user, ymd(2025, 1, 5), None, 0, 10).await;

    let (status, json) = send(
        &db,
        json_request("DELETE", "/dates/20250105", &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error_type"], "conflict");

    // 参照元が残っているので行は消えていない
    let (status, _) = get_json(&db, "/dates/20250105").await;
    assert_eq!(status, StatusCode::OK);

    // 参照のない日付は消せる
    ensure_date(&db.connection, ymd(2025, 1, 6)).await;
    let (status, _) = send(
        &db,
        json_request("DELETE", "/dates/20250106", &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
