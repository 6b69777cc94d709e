// src/domain/fact_user_analytics_snapshot_model.rs
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// ユーザー×スナップショット日の分析スコア
///
/// (user_key, snapshot_date_key) は一意。スコアリングジョブのみが書き込む。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fact_user_analytics_snapshot")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub fact_user_analytics_snapshot_id: i32,
    pub user_key: i32,
    pub snapshot_date_key: i32,
    pub subscription_plan_key: Option<i32>,
    pub rfm_recency: Option<i32>,
    pub rfm_frequency: Option<i32>,
    #[sea_orm(column_type = "Double", nullable)]
    pub rfm_monetary: Option<f64>,
    pub rfm_r_score: Option<i32>,
    pub rfm_f_score: Option<i32>,
    pub rfm_m_score: Option<i32>,
    pub rfm_segment: Option<String>,
    pub segment_label: Option<String>,
    pub engagement_level: Option<String>,
    pub kmeans_cluster: Option<i32>,
    pub kmeans_segment_label: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub churn_probability: Option<f64>,
    pub churn_risk_band: Option<String>,
    pub survival_median_time_to_downgrade: Option<i32>,
    #[sea_orm(column_name = "survival_risk_90d", column_type = "Double", nullable)]
    pub survival_risk_90d: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub clv_value: Option<f64>,
    pub clv_band: Option<String>,
    pub model_version: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::dim_user_model::Entity",
        from = "Column::UserKey",
        to = "super::dim_user_model::Column::UserKey",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::dim_user_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
