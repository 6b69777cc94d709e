// src/domain/fact_user_daily_activity_model.rs
use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// ユーザー×日ごとのエンゲージメント
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fact_user_daily_activity")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub fact_user_daily_activity_id: i32,
    pub user_key: i32,
    pub date_key: i32,
    pub subscription_plan_key: Option<i32>,
    pub campaign_key: Option<i32>,
    pub is_premium: Option<bool>,
    pub has_active_subscription: Option<bool>,
    pub logins_count: Option<i32>,
    pub sessions_count: Option<i32>,
    pub minutes_watched: Option<i32>,
    pub lessons_completed: Option<i32>,
    pub quizzes_attempted: Option<i32>,
    pub distinct_courses_accessed: Option<i32>,
    #[sea_orm(column_name = "active_days_last_30d")]
    pub active_days_last_30d: Option<i32>,
    pub days_since_last_login: Option<i32>,
    #[sea_orm(column_name = "is_inactive_7d_flag")]
    pub is_inactive_7d_flag: Option<bool>,
    pub active_courses_count: Option<i32>,
    pub completed_courses_total: Option<i32>,
    pub created_at: NaiveDateTime,
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
    #[sea_orm(
        belongs_to = "super::dim_subscription_plan_model::Entity",
        from = "Column::SubscriptionPlanKey",
        to = "super::dim_subscription_plan_model::Column::SubscriptionPlanKey",
        on_delete = "SetNull"
    )]
    SubscriptionPlan,
}

impl Related<super::dim_user_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::dim_subscription_plan_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubscriptionPlan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
