// src/domain/dim_user_model.rs
use chrono::{NaiveDateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dim_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_key: i32,
    #[sea_orm(unique)]
    pub user_id_nk: String,
    pub signup_date_key: i32,
    pub birth_date: Option<NaiveDateTime>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub user_type: Option<String>,
    pub acquisition_channel: Option<String>,
    pub initial_plan_key: Option<i32>,
    pub is_premium_ever: Option<bool>,
    pub current_status: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::dim_subscription_plan_model::Entity",
        from = "Column::InitialPlanKey",
        to = "super::dim_subscription_plan_model::Column::SubscriptionPlanKey",
        on_delete = "SetNull"
    )]
    InitialPlan,
    #[sea_orm(has_many = "super::fact_user_daily_activity_model::Entity")]
    DailyActivities,
    #[sea_orm(has_many = "super::fact_user_analytics_snapshot_model::Entity")]
    Snapshots,
}

impl Related<super::dim_subscription_plan_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InitialPlan.def()
    }
}

impl Related<super::fact_user_daily_activity_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyActivities.def()
    }
}

impl Related<super::fact_user_analytics_snapshot_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Snapshots.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        let now = Utc::now().naive_utc();
        Self {
            created_at: Set(now),
            updated_at: Set(now),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            self.updated_at = Set(Utc::now().naive_utc());
        }
        Ok(self)
    }
}
