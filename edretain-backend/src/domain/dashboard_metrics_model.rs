// src/domain/dashboard_metrics_model.rs
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// ダッシュボードKPIの事前集計（スナップショット日ごとに追記）
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dashboard_metrics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub dashboard_metrics_id: i32,
    pub snapshot_date_key: i32,
    pub active_premium_learners: i32,
    pub at_risk_learners: i32,
    #[sea_orm(column_type = "Double")]
    pub average_retention_rate: f64,
    pub total_premium_learners: i32,
    pub churned_learners: i32,
    pub new_premium_learners: i32,
    #[sea_orm(column_type = "Double", nullable)]
    pub active_premium_change_pct: Option<f64>,
    pub at_risk_change_count: Option<i32>,
    #[sea_orm(column_type = "Double", nullable)]
    pub retention_rate_change_pct: Option<f64>,
    #[sea_orm(column_type = "Double")]
    pub monthly_retention_rate: f64,
    #[sea_orm(column_type = "Double")]
    pub monthly_churn_rate: f64,
    pub highly_engaged_count: i32,
    #[sea_orm(column_type = "Double")]
    pub highly_engaged_pct: f64,
    pub medium_engaged_count: i32,
    #[sea_orm(column_type = "Double")]
    pub medium_engaged_pct: f64,
    pub at_risk_count: i32,
    #[sea_orm(column_type = "Double")]
    pub at_risk_pct: f64,
    pub dormant_count: i32,
    #[sea_orm(column_type = "Double")]
    pub dormant_pct: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
