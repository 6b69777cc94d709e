// tests/integration/seed_tests.rs

use crate::common::app_helper::{get_json, setup_app};
use axum::http::StatusCode;
use edretain_backend::service::seed_service::{SeedOptions, SeedService};
use std::collections::HashSet;

fn small_seed(rng_seed: u64) -> SeedOptions {
    SeedOptions {
        users: 5,
        days: 40,
        campaigns: 3,
        interactions: 20,
        rng_seed: Some(rng_seed),
    }
}

fn string_set(rows: &serde_json::Value, key: &str) -> HashSet<String> {
    rows.as_array()
        .unwrap()
        .iter()
        .map(|row| row[key].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_seeding_twice_reuses_fixtures() {
    let (_app, db) = setup_app().await;
    let seeder = SeedService::new(db.connection.clone());

    let first = seeder.seed(&small_seed(1)).await.unwrap();
    assert_eq!(first.plans, 5);
    assert_eq!(first.channels, 4);
    assert!(first.reporting_rows > 0);

    let second = seeder.seed(&small_seed(2)).await.unwrap();
    assert_eq!(second.plans, 0);
    assert_eq!(second.channels, 0);
    assert_eq!(second.users, 5);
    assert_eq!(second.campaigns, 3);
    assert_eq!(second.reporting_rows, 0);

    let (status, plans) = get_json(&db, "/plans").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plans.as_array().unwrap().len(), 5);

    let (_, channels) = get_json(&db, "/channels").await;
    assert_eq!(channels.as_array().unwrap().len(), 4);

    // 2回目のキャンペーンは CAMP_0004 から続く
    let (_, campaigns) = get_json(&db, "/campaigns").await;
    let campaign_ids = string_set(&campaigns, "campaign_id_nk");
    assert_eq!(campaigns.as_array().unwrap().len(), 6);
    assert_eq!(campaign_ids.len(), 6);
    assert!(campaign_ids.contains("CAMP_0006"));

    let (_, users) = get_json(&db, "/users?offset=0&limit=100").await;
    assert_eq!(string_set(&users, "user_id_nk").len(), 10);

    let (status, features) = get_json(&db, "/dashboard/top-features-driving-churn").await;
    assert_eq!(status, StatusCode::OK);
    let names = string_set(&features, "feature_name");
    assert_eq!(features.as_array().unwrap().len(), 5);
    assert_eq!(names.len(), 5);
}
