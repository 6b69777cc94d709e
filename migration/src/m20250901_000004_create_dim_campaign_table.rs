use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DimCampaign::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DimCampaign::CampaignKey)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DimCampaign::CampaignIdNk)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DimCampaign::CampaignName)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(DimCampaign::CampaignType).string_len(64).null())
                    .col(
                        ColumnDef::new(DimCampaign::TargetRiskSegment)
                            .string_len(64)
                            .null(),
                    )
                    .col(ColumnDef::new(DimCampaign::OfferType).string_len(64).null())
                    .col(ColumnDef::new(DimCampaign::DefaultChannel).string_len(64).null())
                    // キャンペーン期間は日付ディメンションの生成範囲を超えることがある
                    .col(ColumnDef::new(DimCampaign::StartDateKey).integer().null())
                    .col(ColumnDef::new(DimCampaign::EndDateKey).integer().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DimCampaign::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DimCampaign {
    Table,
    CampaignKey,
    CampaignIdNk,
    CampaignName,
    CampaignType,
    TargetRiskSegment,
    OfferType,
    DefaultChannel,
    StartDateKey,
    EndDateKey,
}
