// src/repository/subscription_plan_repository.rs

use crate::domain::dim_subscription_plan_model::{
    self, ActiveModel as PlanActiveModel, Entity as PlanEntity,
};
use sea_orm::entity::*;
use sea_orm::{ConnectionTrait, DbConn, DbErr, DeleteResult, QueryFilter, QueryOrder};

#[derive(Debug, Clone)]
pub struct SubscriptionPlanRepository {
    db: DbConn,
}

impl SubscriptionPlanRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_by_key(
        &self,
        plan_key: i32,
    ) -> Result<Option<dim_subscription_plan_model::Model>, DbErr> {
        PlanEntity::find_by_id(plan_key).one(&self.db).await
    }

    pub async fn find_all(&self) -> Result<Vec<dim_subscription_plan_model::Model>, DbErr> {
        PlanEntity::find()
            .order_by_asc(dim_subscription_plan_model::Column::SubscriptionPlanKey)
            .all(&self.db)
            .await
    }

    pub async fn create(
        &self,
        plan: PlanActiveModel,
    ) -> Result<dim_subscription_plan_model::Model, DbErr> {
        plan.insert(&self.db).await
    }

    pub async fn update(
        &self,
        plan: PlanActiveModel,
    ) -> Result<dim_subscription_plan_model::Model, DbErr> {
        plan.update(&self.db).await
    }

    pub async fn delete(&self, plan_key: i32) -> Result<DeleteResult, DbErr> {
        PlanEntity::delete_by_id(plan_key).exec(&self.db).await
    }

    /// トランザクション内での挿入（シーダー用）
    pub async fn insert_with<C>(
        conn: &C,
        plan: PlanActiveModel,
    ) -> Result<dim_subscription_plan_model::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        plan.insert(conn).await
    }

    pub async fn find_by_natural_key_with<C>(
        conn: &C,
        plan_id_nk: &str,
    ) -> Result<Option<dim_subscription_plan_model::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        PlanEntity::find()
            .filter(dim_subscription_plan_model::Column::PlanIdNk.eq(plan_id_nk))
            .one(conn)
            .await
    }
}
