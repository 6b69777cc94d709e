use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 率はすべて 0.0〜1.0 の比率で保持する
        manager
            .create_table(
                Table::create()
                    .table(CampaignPerformance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CampaignPerformance::CampaignPerformanceId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CampaignPerformance::SnapshotDateKey)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CampaignPerformance::CampaignKey).integer().null())
                    .col(
                        ColumnDef::new(CampaignPerformance::CampaignName)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CampaignPerformance::TargetSegment)
                            .string_len(64)
                            .null(),
                    )
                    .col(ColumnDef::new(CampaignPerformance::LaunchDate).integer().null())
                    .col(
                        ColumnDef::new(CampaignPerformance::UsersSent)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CampaignPerformance::UsersOpened)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CampaignPerformance::OpenRate)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(CampaignPerformance::CampaignRetentionRate)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(CampaignPerformance::ControlRetentionRate)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(CampaignPerformance::RetentionLift)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(CampaignPerformance::CampaignChurnRate)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CampaignPerformance::ControlChurnRate)
                            .double()
                            .null(),
                    )
                    .col(ColumnDef::new(CampaignPerformance::CampaignSize).integer().null())
                    .col(ColumnDef::new(CampaignPerformance::ControlSize).integer().null())
                    .col(
                        ColumnDef::new(CampaignPerformance::Status)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CampaignPerformance::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaign_performance_snapshot_date_key")
                            .from(
                                CampaignPerformance::Table,
                                CampaignPerformance::SnapshotDateKey,
                            )
                            .to(DimDate::Table, DimDate::DateKey)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaign_performance_campaign_key")
                            .from(CampaignPerformance::Table, CampaignPerformance::CampaignKey)
                            .to(DimCampaign::Table, DimCampaign::CampaignKey)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CampaignPerformance::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CampaignPerformance {
    Table,
    CampaignPerformanceId,
    SnapshotDateKey,
    CampaignKey,
    CampaignName,
    TargetSegment,
    LaunchDate,
    UsersSent,
    UsersOpened,
    OpenRate,
    CampaignRetentionRate,
    ControlRetentionRate,
    RetentionLift,
    CampaignChurnRate,
    ControlChurnRate,
    CampaignSize,
    ControlSize,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum DimDate {
    Table,
    DateKey,
}

#[derive(DeriveIden)]
enum DimCampaign {
    Table,
    CampaignKey,
}
