// tests/common/test_data.rs

use chrono::{NaiveDate, Utc};
use edretain_backend::domain::{
    campaign_performance_model, churn_reasons_model, dashboard_metrics_model, dim_date_model,
    dim_subscription_plan_model, dim_user_model, fact_user_analytics_snapshot_model,
    fact_user_daily_activity_model, feature_importance_model, model_performance_metrics_model,
};
use edretain_backend::repository::date_repository::DateRepository;
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, Set};

// === ディメンション ===

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// 日付行を用意してキーを返す（既存なら何もしない）
pub async fn ensure_date(db: &DatabaseConnection, date: NaiveDate) -> i32 {
    let row = dim_date_model::Model::from_full_date(date);
    let key = row.date_key;
    DateRepository::insert_if_absent(db, row).await.unwrap();
    key
}

pub async fn create_plan(db: &DatabaseConnection, plan_id: &str, tier: &str, price: f64) -> i32 {
    let plan = dim_subscription_plan_model::ActiveModel {
        plan_id_nk: Set(plan_id.to_string()),
        plan_name: Set(format!("{} plan", tier)),
        tier: Set(tier.to_string()),
        billing_cycle: Set("Monthly".to_string()),
        base_price: Set(price),
        currency: Set("USD".to_string()),
        ..Default::default()
    };
    plan.insert(db).await.unwrap().subscription_plan_key
}

pub async fn create_user(
    db: &DatabaseConnection,
    user_id: &str,
    country: &str,
    plan_key: Option<i32>,
) -> i32 {
    let signup_key = ensure_date(db, ymd(2024, 1, 1)).await;
    let mut user = dim_user_model::ActiveModel::new();
    user.user_id_nk = Set(user_id.to_string());
    user.signup_date_key = Set(signup_key);
    user.country = Set(Some(country.to_string()));
    user.initial_plan_key = Set(plan_key);
    user.is_premium_ever = Set(Some(plan_key.is_some()));
    user.current_status = Set(Some("Active".to_string()));
    user.insert(db).await.unwrap().user_key
}

// === ファクト ===

/// スナップショットのテスト用入力
#[derive(Debug, Clone, Default)]
pub struct SnapshotFixture {
    pub plan_key: Option<i32>,
    pub scores: Option<(i32, i32, i32)>,
    pub segment_label: Option<String>,
    pub churn_probability: Option<f64>,
    pub clv_value: Option<f64>,
    pub survival_days: Option<i32>,
}

pub async fn create_snapshot(
    db: &DatabaseConnection,
    user_key: i32,
    date: NaiveDate,
    fixture: SnapshotFixture,
) -> fact_user_analytics_snapshot_model::Model {
    let date_key = ensure_date(db, date).await;
    let (r, f, m) = match fixture.scores {
        Some((r, f, m)) => (Some(r), Some(f), Some(m)),
        None => (None, None, None),
    };

    let snapshot = fact_user_analytics_snapshot_model::ActiveModel {
        user_key: Set(user_key),
        snapshot_date_key: Set(date_key),
        subscription_plan_key: Set(fixture.plan_key),
        rfm_r_score: Set(r),
        rfm_f_score: Set(f),
        rfm_m_score: Set(m),
        segment_label: Set(fixture.segment_label),
        churn_probability: Set(fixture.churn_probability),
        clv_value: Set(fixture.clv_value),
        survival_median_time_to_downgrade: Set(fixture.survival_days),
        model_version: Set(Some("test".to_string())),
        ..Default::default()
    };
    snapshot.insert(db).await.unwrap()
}

pub async fn create_activity(
    db: &DatabaseConnection,
    user_key: i32,
    date: NaiveDate,
    plan_key: Option<i32>,
    days_since_last_login: i32,
    active_days_last_30d: i32,
) {
    let date_key = ensure_date(db, date).await;
    let activity = fact_user_daily_activity_model::ActiveModel {
        user_key: Set(user_key),
        date_key: Set(date_key),
        subscription_plan_key: Set(plan_key),
        is_premium: Set(Some(plan_key.is_some())),
        has_active_subscription: Set(Some(plan_key.is_some())),
        logins_count: Set(Some(1)),
        active_days_last_30d: Set(Some(active_days_last_30d)),
        days_since_last_login: Set(Some(days_since_last_login)),
        is_inactive_7d_flag: Set(Some(days_since_last_login > 7)),
        ..Default::default()
    };
    activity.insert(db).await.unwrap();
}

// === レポーティング ===

pub async fn create_dashboard_metrics(
    db: &DatabaseConnection,
    date: NaiveDate,
    active_premium: i32,
    at_risk: i32,
    retention_rate: f64,
) {
    let date_key = ensure_date(db, date).await;
    let row = dashboard_metrics_model::ActiveModel {
        snapshot_date_key: Set(date_key),
        active_premium_learners: Set(active_premium),
        at_risk_learners: Set(at_risk),
        average_retention_rate: Set(retention_rate),
        total_premium_learners: Set(active_premium),
        churned_learners: Set(0),
        new_premium_learners: Set(0),
        active_premium_change_pct: Set(None),
        at_risk_change_count: Set(None),
        retention_rate_change_pct: Set(None),
        monthly_retention_rate: Set(retention_rate),
        monthly_churn_rate: Set(100.0 - retention_rate),
        highly_engaged_count: Set(2),
        highly_engaged_pct: Set(40.0),
        medium_engaged_count: Set(1),
        medium_engaged_pct: Set(20.0),
        at_risk_count: Set(at_risk),
        at_risk_pct: Set(20.0),
        dormant_count: Set(1),
        dormant_pct: Set(20.0),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    row.insert(db).await.unwrap();
}

pub async fn create_feature_importance(
    db: &DatabaseConnection,
    date: NaiveDate,
    features: &[(&str, f64)],
) {
    let date_key = ensure_date(db, date).await;
    for (rank, (name, score)) in features.iter().enumerate() {
        let row = feature_importance_model::ActiveModel {
            snapshot_date_key: Set(date_key),
            model_type: Set("churn_prediction".to_string()),
            model_version: Set(Some("test".to_string())),
            feature_name: Set(name.to_string()),
            importance_score: Set(*score),
            importance_rank: Set(rank as i32 + 1),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        row.insert(db).await.unwrap();
    }
}

pub async fn create_model_performance(
    db: &DatabaseConnection,
    date: NaiveDate,
    accuracy: f64,
    auc_roc: f64,
) {
    let date_key = ensure_date(db, date).await;
    let row = model_performance_metrics_model::ActiveModel {
        snapshot_date_key: Set(date_key),
        model_type: Set("churn_prediction".to_string()),
        model_version: Set(Some("test".to_string())),
        accuracy: Set(Some(accuracy)),
        precision: Set(Some(accuracy - 0.05)),
        recall: Set(Some(accuracy - 0.1)),
        f1_score: Set(None),
        auc_roc: Set(Some(auc_roc)),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    row.insert(db).await.unwrap();
}

pub async fn create_campaign_performance(
    db: &DatabaseConnection,
    date: NaiveDate,
    name: &str,
    open_rate: f64,
    retention_lift: f64,
) {
    let date_key = ensure_date(db, date).await;
    let row = campaign_performance_model::ActiveModel {
        snapshot_date_key: Set(date_key),
        campaign_key: Set(None),
        campaign_name: Set(name.to_string()),
        target_segment: Set(Some("At Risk".to_string())),
        launch_date: Set(Some(20250105)),
        users_sent: Set(100),
        users_opened: Set((open_rate * 100.0) as i32),
        open_rate: Set(open_rate),
        campaign_retention_rate: Set(0.8),
        control_retention_rate: Set(0.8 - retention_lift),
        retention_lift: Set(retention_lift),
        campaign_churn_rate: Set(Some(0.2)),
        control_churn_rate: Set(Some(0.2 + retention_lift)),
        campaign_size: Set(Some(100)),
        control_size: Set(Some(100)),
        status: Set("Active".to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    row.insert(db).await.unwrap();
}

pub async fn create_churn_reason(
    db: &DatabaseConnection,
    date: NaiveDate,
    category: &str,
    display_name: &str,
    count: i32,
) {
    let date_key = ensure_date(db, date).await;
    let row = churn_reasons_model::ActiveModel {
        snapshot_date_key: Set(date_key),
        reason_category: Set(category.to_string()),
        reason_display_name: Set(Some(display_name.to_string())),
        reason_count: Set(count),
        reason_pct: Set(None),
        avg_churn_probability: Set(None),
        severity_level: Set(Some("Medium".to_string())),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    row.insert(db).await.unwrap();
}
