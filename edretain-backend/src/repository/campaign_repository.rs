// src/repository/campaign_repository.rs

use crate::domain::dim_campaign_model::{
    self, ActiveModel as CampaignActiveModel, Entity as CampaignEntity,
};
use crate::domain::dim_channel_model::{
    self, ActiveModel as ChannelActiveModel, Entity as ChannelEntity,
};
use sea_orm::entity::*;
use sea_orm::{
    ConnectionTrait, DbConn, DbErr, DeleteResult, PaginatorTrait, QueryFilter, QueryOrder,
};

/// キャンペーンとチャネルのディメンション
#[derive(Debug, Clone)]
pub struct CampaignRepository {
    db: DbConn,
}

impl CampaignRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    // --- キャンペーン ---

    pub async fn find_campaign(
        &self,
        campaign_key: i32,
    ) -> Result<Option<dim_campaign_model::Model>, DbErr> {
        CampaignEntity::find_by_id(campaign_key).one(&self.db).await
    }

    pub async fn find_all_campaigns(&self) -> Result<Vec<dim_campaign_model::Model>, DbErr> {
        CampaignEntity::find()
            .order_by_asc(dim_campaign_model::Column::CampaignKey)
            .all(&self.db)
            .await
    }

    pub async fn create_campaign(
        &self,
        campaign: CampaignActiveModel,
    ) -> Result<dim_campaign_model::Model, DbErr> {
        campaign.insert(&self.db).await
    }

    pub async fn update_campaign(
        &self,
        campaign: CampaignActiveModel,
    ) -> Result<dim_campaign_model::Model, DbErr> {
        campaign.update(&self.db).await
    }

    pub async fn delete_campaign(&self, campaign_key: i32) -> Result<DeleteResult, DbErr> {
        CampaignEntity::delete_by_id(campaign_key)
            .exec(&self.db)
            .await
    }

    // --- チャネル ---

    pub async fn find_channel(
        &self,
        channel_key: i32,
    ) -> Result<Option<dim_channel_model::Model>, DbErr> {
        ChannelEntity::find_by_id(channel_key).one(&self.db).await
    }

    pub async fn find_all_channels(&self) -> Result<Vec<dim_channel_model::Model>, DbErr> {
        ChannelEntity::find()
            .order_by_asc(dim_channel_model::Column::ChannelKey)
            .all(&self.db)
            .await
    }

    pub async fn create_channel(
        &self,
        channel: ChannelActiveModel,
    ) -> Result<dim_channel_model::Model, DbErr> {
        channel.insert(&self.db).await
    }

    pub async fn update_channel(
        &self,
        channel: ChannelActiveModel,
    ) -> Result<dim_channel_model::Model, DbErr> {
        channel.update(&self.db).await
    }

    pub async fn delete_channel(&self, channel_key: i32) -> Result<DeleteResult, DbErr> {
        ChannelEntity::delete_by_id(channel_key).exec(&self.db).await
    }

    // --- トランザクション内での挿入（シーダー用） ---

    pub async fn insert_campaign_with<C>(
        conn: &C,
        campaign: CampaignActiveModel,
    ) -> Result<dim_campaign_model::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        campaign.insert(conn).await
    }

    pub async fn insert_channel_with<C>(
        conn: &C,
        channel: ChannelActiveModel,
    ) -> Result<dim_channel_model::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        channel.insert(conn).await
    }

    pub async fn count_campaigns_with<C>(conn: &C) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        CampaignEntity::find().count(conn).await
    }

    pub async fn find_channel_by_name_with<C>(
        conn: &C,
        channel_name: &str,
    ) -> Result<Option<dim_channel_model::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        ChannelEntity::find()
            .filter(dim_channel_model::Column::ChannelName.eq(channel_name))
            .one(conn)
            .await
    }
}
