// src/domain/dim_campaign_model.rs
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dim_campaign")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub campaign_key: i32,
    pub campaign_id_nk: String,
    pub campaign_name: String,
    pub campaign_type: Option<String>,
    pub target_risk_segment: Option<String>,
    pub offer_type: Option<String>,
    pub default_channel: Option<String>,
    pub start_date_key: Option<i32>,
    pub end_date_key: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::fact_campaign_interaction_model::Entity")]
    Interactions,
}

impl Related<super::fact_campaign_interaction_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Interactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
