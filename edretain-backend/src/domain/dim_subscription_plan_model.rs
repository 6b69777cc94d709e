// src/domain/dim_subscription_plan_model.rs
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dim_subscription_plan")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub subscription_plan_key: i32,
    pub plan_id_nk: String,
    pub plan_name: String,
    pub tier: String,
    pub billing_cycle: String,
    #[sea_orm(column_type = "Double")]
    pub base_price: f64,
    pub currency: String,
    pub has_certificate: Option<bool>,
    pub has_mentoring: Option<bool>,
    pub has_downloads: Option<bool>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::dim_user_model::Entity")]
    Users,
}

impl Related<super::dim_user_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
