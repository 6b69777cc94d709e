use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FactCampaignInteraction::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FactCampaignInteraction::InteractionId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FactCampaignInteraction::UserKey).integer().not_null())
                    .col(
                        ColumnDef::new(FactCampaignInteraction::CampaignKey)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FactCampaignInteraction::DateKey).integer().not_null())
                    .col(
                        ColumnDef::new(FactCampaignInteraction::ChannelKey)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FactCampaignInteraction::SentFlag)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(FactCampaignInteraction::OpenedFlag)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(FactCampaignInteraction::ClickedFlag)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(FactCampaignInteraction::ConvertedFlag)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(FactCampaignInteraction::TimeToConversionDays)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FactCampaignInteraction::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // converted ⟹ clicked ⟹ opened ⟹ sent
                    .check(Expr::cust(
                        "(NOT converted_flag OR clicked_flag) \
                         AND (NOT clicked_flag OR opened_flag) \
                         AND (NOT opened_flag OR sent_flag)",
                    ))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fact_campaign_interaction_user_key")
                            .from(FactCampaignInteraction::Table, FactCampaignInteraction::UserKey)
                            .to(DimUser::Table, DimUser::UserKey)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fact_campaign_interaction_campaign_key")
                            .from(
                                FactCampaignInteraction::Table,
                                FactCampaignInteraction::CampaignKey,
                            )
                            .to(DimCampaign::Table, DimCampaign::CampaignKey)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fact_campaign_interaction_date_key")
                            .from(FactCampaignInteraction::Table, FactCampaignInteraction::DateKey)
                            .to(DimDate::Table, DimDate::DateKey)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fact_campaign_interaction_channel_key")
                            .from(
                                FactCampaignInteraction::Table,
                                FactCampaignInteraction::ChannelKey,
                            )
                            .to(DimChannel::Table, DimChannel::ChannelKey)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_fact_campaign_interaction_campaign")
                    .table(FactCampaignInteraction::Table)
                    .col(FactCampaignInteraction::CampaignKey)
                    .col(FactCampaignInteraction::DateKey)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FactCampaignInteraction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FactCampaignInteraction {
    Table,
    InteractionId,
    UserKey,
    CampaignKey,
    DateKey,
    ChannelKey,
    SentFlag,
    OpenedFlag,
    ClickedFlag,
    ConvertedFlag,
    TimeToConversionDays,
    CreatedAt,
}

#[derive(DeriveIden)]
enum DimUser {
    Table,
    UserKey,
}

#[derive(DeriveIden)]
enum DimCampaign {
    Table,
    CampaignKey,
}

#[derive(DeriveIden)]
enum DimDate {
    Table,
    DateKey,
}

#[derive(DeriveIden)]
enum DimChannel {
    Table,
    ChannelKey,
}
