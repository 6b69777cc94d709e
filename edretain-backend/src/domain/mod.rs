// src/domain/mod.rs
pub mod campaign_intent;
pub mod campaign_performance_model;
pub mod churn_reasons_model;
pub mod curves;
pub mod dashboard_metrics_model;
pub mod date_key;
pub mod dim_campaign_model;
pub mod dim_channel_model;
pub mod dim_date_model;
pub mod dim_subscription_plan_model;
pub mod dim_user_model;
pub mod distribution;
pub mod engagement;
pub mod fact_campaign_interaction_model;
pub mod fact_user_analytics_snapshot_model;
pub mod fact_user_daily_activity_model;
pub mod feature_importance_model;
pub mod model_performance_metrics_model;
pub mod rfm;
pub mod subscription_tier;
pub mod user_status;
