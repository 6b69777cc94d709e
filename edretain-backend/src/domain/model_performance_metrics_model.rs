// src/domain/model_performance_metrics_model.rs
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "model_performance_metrics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub model_performance_id: i32,
    pub snapshot_date_key: i32,
    pub model_type: String,
    pub model_version: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub accuracy: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub precision: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub recall: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub f1_score: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub auc_roc: Option<f64>,
    pub train_samples: Option<i32>,
    pub test_samples: Option<i32>,
    pub true_negatives: Option<i32>,
    pub false_positives: Option<i32>,
    pub false_negatives: Option<i32>,
    pub true_positives: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
