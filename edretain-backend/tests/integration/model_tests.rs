// tests/integration/model_tests.rs

use crate::common::app_helper::{get_json, setup_app};
use crate::common::test_data::{
    create_feature_importance, create_model_performance, create_snapshot, create_user, ymd,
    SnapshotFixture,
};
use axum::http::StatusCode;

#[tokio::test]
async fn test_metric_reports_current_value_and_change() {
    let (_app, db) = setup_app().await;
    create_model_performance(&db.connection, ymd(2025, 1, 1), 0.80, 0.88).await;
    create_model_performance(&db.connection, ymd(2025, 2, 1), 0.85, 0.91).await;

    let (status, json) = get_json(&db, "/models/accuracy").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["current_accuracy"].as_f64().unwrap(), 85.0);
    assert_eq!(json["accuracy_change"].as_f64().unwrap(), 5.0);
    assert_eq!(json["has_previous"], true);

    // AUCは比率のまま
    let (status, json) = get_json(&db, "/models/auc-roc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["current_auc_roc"].as_f64().unwrap(), 0.91);
    assert_eq!(json["auc_roc_change"].as_f64().unwrap(), 0.03);
}

#[tokio::test]
async fn test_metric_without_previous_has_null_change() {
    let (_app, db) = setup_app().await;
    create_model_performance(&db.connection, ymd(2025, 2, 1), 0.85, 0.91).await;

    let (status, json) = get_json(&db, "/models/recall").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["current_recall"].as_f64().unwrap(), 75.0);
    assert!(json["recall_change"].is_null());
    assert_eq!(json["has_previous"], false);
}

#[tokio::test]
async fn test_metric_for_unknown_model_is_not_found() {
    let (_app, db) = setup_app().await;
    create_model_performance(&db.connection, ymd(2025, 2, 1), 0.85, 0.91).await;

    let (status, _) = get_json(&db, "/models/precision?model_type=clv_regression").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_roc_curve_falls_back_to_diagonal() {
    let (_app, db) = setup_app().await;

    let (status, json) = get_json(&db, "/models/roc-curve").await;

    assert_eq!(status, StatusCode::OK);
    let points = json.as_array().unwrap();
    assert_eq!(points.len(), 11);
    for point in points {
        assert_eq!(point["fpr"], point["tpr"]);
    }
}

#[tokio::test]
async fn test_roc_curve_reaches_one_with_auc() {
    let (_app, db) = setup_app().await;
    create_model_performance(&db.connection, ymd(2025, 2, 1), 0.85, 0.91).await;

    let (status, json) = get_json(&db, "/models/roc-curve").await;

    assert_eq!(status, StatusCode::OK);
    let last = &json.as_array().unwrap()[10];
    assert_eq!(last["fpr"].as_f64().unwrap(), 1.0);
    assert_eq!(last["tpr"].as_f64().unwrap(), 1.0);
}

#[tokio::test]
async fn test_survival_curve_halves_at_median() {
    let (_app, db) = setup_app().await;
    let user = create_user(&db.connection, "USER_000001", "Japan", None).await;
    create_snapshot(
        &db.connection,
        user,
        ymd(2025, 2, 1),
        SnapshotFixture {
            survival_days: Some(180),
            ..Default::default()
        },
    )
    .await;

    let (status, json) = get_json(&db, "/models/survival-curve").await;

    assert_eq!(status, StatusCode::OK);
    let points = json.as_array().unwrap();
    assert_eq!(points.len(), 9);
    let at_six = points.iter().find(|p| p["months"] == 6).unwrap();
    assert!((at_six["survival_rate_pct"].as_f64().unwrap() - 50.0).abs() < 1e-6);
    assert_eq!(points[0]["survival_rate_pct"].as_f64().unwrap(), 100.0);
}

#[tokio::test]
async fn test_segment_retention_and_feature_importance() {
    let (_app, db) = setup_app().await;
    let a = create_user(&db.connection, "USER_000001", "Japan", None).await;
    let b = create_user(&db.connection, "USER_000002", "Japan", None).await;
    for (user, probability) in [(a, 0.2), (b, 0.4)] {
        create_snapshot(
            &db.connection,
            user,
            ymd(2025, 2, 1),
            SnapshotFixture {
                segment_label: Some("At Risk".to_string()),
                churn_probability: Some(probability),
                ..Default::default()
            },
        )
        .await;
    }
    create_feature_importance(
        &db.connection,
        ymd(2025, 2, 1),
        &[("days_since_last_login", 0.4), ("minutes_watched", 0.2)],
    )
    .await;

    let (status, json) = get_json(&db, "/models/segment-retention-probability").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["segment"], "At Risk");
    assert_eq!(json[0]["retention_probability_pct"].as_f64().unwrap(), 70.0);

    let (status, json) = get_json(&db, "/models/feature-importance").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[0]["feature_name"], "days_since_last_login");
}
