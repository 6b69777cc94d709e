// src/domain/campaign_performance_model.rs
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// キャンペーン効果の事前集計。率はすべて 0.0〜1.0 の比率
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "campaign_performance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub campaign_performance_id: i32,
    pub snapshot_date_key: i32,
    pub campaign_key: Option<i32>,
    pub campaign_name: String,
    pub target_segment: Option<String>,
    /// YYYYMMDD 形式の日付キー
    pub launch_date: Option<i32>,
    pub users_sent: i32,
    pub users_opened: i32,
    #[sea_orm(column_type = "Double")]
    pub open_rate: f64,
    #[sea_orm(column_type = "Double")]
    pub campaign_retention_rate: f64,
    #[sea_orm(column_type = "Double")]
    pub control_retention_rate: f64,
    #[sea_orm(column_type = "Double")]
    pub retention_lift: f64,
    #[sea_orm(column_type = "Double", nullable)]
    pub campaign_churn_rate: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub control_churn_rate: Option<f64>,
    pub campaign_size: Option<i32>,
    pub control_size: Option<i32>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
