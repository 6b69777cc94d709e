use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FactUserAnalyticsSnapshot::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FactUserAnalyticsSnapshot::FactUserAnalyticsSnapshotId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FactUserAnalyticsSnapshot::UserKey)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FactUserAnalyticsSnapshot::SnapshotDateKey)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FactUserAnalyticsSnapshot::SubscriptionPlanKey)
                            .integer()
                            .null(),
                    )
                    // RFM
                    .col(ColumnDef::new(FactUserAnalyticsSnapshot::RfmRecency).integer().null())
                    .col(
                        ColumnDef::new(FactUserAnalyticsSnapshot::RfmFrequency)
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(FactUserAnalyticsSnapshot::RfmMonetary).double().null())
                    .col(ColumnDef::new(FactUserAnalyticsSnapshot::RfmRScore).integer().null())
                    .col(ColumnDef::new(FactUserAnalyticsSnapshot::RfmFScore).integer().null())
                    .col(ColumnDef::new(FactUserAnalyticsSnapshot::RfmMScore).integer().null())
                    .col(
                        ColumnDef::new(FactUserAnalyticsSnapshot::RfmSegment)
                            .string_len(16)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FactUserAnalyticsSnapshot::SegmentLabel)
                            .string_len(64)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FactUserAnalyticsSnapshot::EngagementLevel)
                            .string_len(32)
                            .null(),
                    )
                    // クラスタリング
                    .col(
                        ColumnDef::new(FactUserAnalyticsSnapshot::KmeansCluster)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FactUserAnalyticsSnapshot::KmeansSegmentLabel)
                            .string_len(64)
                            .null(),
                    )
                    // 解約予測
                    .col(
                        ColumnDef::new(FactUserAnalyticsSnapshot::ChurnProbability)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FactUserAnalyticsSnapshot::ChurnRiskBand)
                            .string_len(32)
                            .null(),
                    )
                    // 生存分析
                    .col(
                        ColumnDef::new(FactUserAnalyticsSnapshot::SurvivalMedianTimeToDowngrade)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FactUserAnalyticsSnapshot::SurvivalRisk90d)
                            .double()
                            .null(),
                    )
                    // CLV
                    .col(ColumnDef::new(FactUserAnalyticsSnapshot::ClvValue).double().null())
                    .col(
                        ColumnDef::new(FactUserAnalyticsSnapshot::ClvBand)
                            .string_len(32)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FactUserAnalyticsSnapshot::ModelVersion)
                            .string_len(32)
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fact_user_analytics_snapshot_user_key")
                            .from(
                                FactUserAnalyticsSnapshot::Table,
                                FactUserAnalyticsSnapshot::UserKey,
                            )
                            .to(DimUser::Table, DimUser::UserKey)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fact_user_analytics_snapshot_date_key")
                            .from(
                                FactUserAnalyticsSnapshot::Table,
                                FactUserAnalyticsSnapshot::SnapshotDateKey,
                            )
                            .to(DimDate::Table, DimDate::DateKey)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fact_user_analytics_snapshot_plan_key")
                            .from(
                                FactUserAnalyticsSnapshot::Table,
                                FactUserAnalyticsSnapshot::SubscriptionPlanKey,
                            )
                            .to(
                                DimSubscriptionPlan::Table,
                                DimSubscriptionPlan::SubscriptionPlanKey,
                            )
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // ユーザーごとに1日1スナップショット（再実行時はupsert）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_fact_user_analytics_snapshot_user_date")
                    .table(FactUserAnalyticsSnapshot::Table)
                    .col(FactUserAnalyticsSnapshot::UserKey)
                    .col(FactUserAnalyticsSnapshot::SnapshotDateKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(FactUserAnalyticsSnapshot::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum FactUserAnalyticsSnapshot {
    Table,
    FactUserAnalyticsSnapshotId,
    UserKey,
    SnapshotDateKey,
    SubscriptionPlanKey,
    RfmRecency,
    RfmFrequency,
    RfmMonetary,
    RfmRScore,
    RfmFScore,
    RfmMScore,
    RfmSegment,
    SegmentLabel,
    EngagementLevel,
    KmeansCluster,
    KmeansSegmentLabel,
    ChurnProbability,
    ChurnRiskBand,
    SurvivalMedianTimeToDowngrade,
    #[sea_orm(iden = "survival_risk_90d")]
    SurvivalRisk90d,
    ClvValue,
    ClvBand,
    ModelVersion,
}

#[derive(DeriveIden)]
enum DimUser {
    Table,
    UserKey,
}

#[derive(DeriveIden)]
enum DimDate {
    Table,
    DateKey,
}

#[derive(DeriveIden)]
enum DimSubscriptionPlan {
    Table,
    SubscriptionPlanKey,
}
