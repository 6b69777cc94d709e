// src/domain/fact_campaign_interaction_model.rs
use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fact_campaign_interaction")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub interaction_id: i32,
    pub user_key: i32,
    pub campaign_key: i32,
    pub date_key: i32,
    pub channel_key: i32,
    pub sent_flag: bool,
    pub opened_flag: bool,
    pub clicked_flag: bool,
    pub converted_flag: bool,
    pub time_to_conversion_days: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::dim_campaign_model::Entity",
        from = "Column::CampaignKey",
        to = "super::dim_campaign_model::Column::CampaignKey",
        on_delete = "Cascade"
    )]
    Campaign,
}

impl Related<super::dim_campaign_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Campaign.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// 送信→開封→クリック→コンバージョンのファネルフラグ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunnelFlags {
    pub sent: bool,
    pub opened: bool,
    pub clicked: bool,
    pub converted: bool,
}

impl FunnelFlags {
    /// converted ⟹ clicked ⟹ opened ⟹ sent を満たすか
    pub fn is_monotonic(&self) -> bool {
        (!self.converted || self.clicked)
            && (!self.clicked || self.opened)
            && (!self.opened || self.sent)
    }

    /// 違反している最初の段階を返す
    pub fn first_violation(&self) -> Option<&'static str> {
        if self.converted && !self.clicked {
            Some("converted_flag requires clicked_flag")
        } else if self.clicked && !self.opened {
            Some("clicked_flag requires opened_flag")
        } else if self.opened && !self.sent {
            Some("opened_flag requires sent_flag")
        } else {
            None
        }
    }
}

impl Model {
    pub fn funnel(&self) -> FunnelFlags {
        FunnelFlags {
            sent: self.sent_flag,
            opened: self.opened_flag,
            clicked: self.clicked_flag,
            converted: self.converted_flag,
        }
    }
}
