// src/domain/feature_importance_model.rs
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "feature_importance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub feature_importance_id: i32,
    pub snapshot_date_key: i32,
    pub model_type: String,
    pub model_version: Option<String>,
    pub feature_name: String,
    #[sea_orm(column_type = "Double")]
    pub importance_score: f64,
    pub importance_rank: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
