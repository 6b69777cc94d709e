// src/domain/churn_reasons_model.rs
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "churn_reasons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub churn_reason_id: i32,
    pub snapshot_date_key: i32,
    pub reason_category: String,
    pub reason_display_name: Option<String>,
    pub reason_count: i32,
    #[sea_orm(column_type = "Double", nullable)]
    pub reason_pct: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub avg_churn_probability: Option<f64>,
    pub severity_level: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
