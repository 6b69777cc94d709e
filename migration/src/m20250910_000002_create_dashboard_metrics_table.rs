use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DashboardMetrics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DashboardMetrics::DashboardMetricsId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DashboardMetrics::SnapshotDateKey)
                            .integer()
                            .not_null(),
                    )
                    // KPIカード
                    .col(int_col(DashboardMetrics::ActivePremiumLearners))
                    .col(int_col(DashboardMetrics::AtRiskLearners))
                    .col(float_col(DashboardMetrics::AverageRetentionRate))
                    .col(int_col(DashboardMetrics::TotalPremiumLearners))
                    .col(int_col(DashboardMetrics::ChurnedLearners))
                    .col(int_col(DashboardMetrics::NewPremiumLearners))
                    .col(
                        ColumnDef::new(DashboardMetrics::ActivePremiumChangePct)
                            .double()
                            .null(),
                    )
                    .col(ColumnDef::new(DashboardMetrics::AtRiskChangeCount).integer().null())
                    .col(
                        ColumnDef::new(DashboardMetrics::RetentionRateChangePct)
                            .double()
                            .null(),
                    )
                    // トレンド
                    .col(float_col(DashboardMetrics::MonthlyRetentionRate))
                    .col(float_col(DashboardMetrics::MonthlyChurnRate))
                    // セグメンテーション
                    .col(int_col(DashboardMetrics::HighlyEngagedCount))
                    .col(float_col(DashboardMetrics::HighlyEngagedPct))
                    .col(int_col(DashboardMetrics::MediumEngagedCount))
                    .col(float_col(DashboardMetrics::MediumEngagedPct))
                    .col(int_col(DashboardMetrics::AtRiskCount))
                    .col(float_col(DashboardMetrics::AtRiskPct))
                    .col(int_col(DashboardMetrics::DormantCount))
                    .col(float_col(DashboardMetrics::DormantPct))
                    .col(
                        ColumnDef::new(DashboardMetrics::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dashboard_metrics_snapshot_date_key")
                            .from(DashboardMetrics::Table, DashboardMetrics::SnapshotDateKey)
                            .to(DimDate::Table, DimDate::DateKey)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DashboardMetrics::Table).to_owned())
            .await
    }
}

fn int_col(col: DashboardMetrics) -> ColumnDef {
    ColumnDef::new(col).integer().not_null().default(0).to_owned()
}

fn float_col(col: DashboardMetrics) -> ColumnDef {
    ColumnDef::new(col).double().not_null().default(0.0).to_owned()
}

#[derive(DeriveIden)]
enum DashboardMetrics {
    Table,
    DashboardMetricsId,
    SnapshotDateKey,
    ActivePremiumLearners,
    AtRiskLearners,
    AverageRetentionRate,
    TotalPremiumLearners,
    ChurnedLearners,
    NewPremiumLearners,
    ActivePremiumChangePct,
    AtRiskChangeCount,
    RetentionRateChangePct,
    MonthlyRetentionRate,
    MonthlyChurnRate,
    HighlyEngagedCount,
    HighlyEngagedPct,
    MediumEngagedCount,
    MediumEngagedPct,
    AtRiskCount,
    AtRiskPct,
    DormantCount,
    DormantPct,
    CreatedAt,
}

#[derive(DeriveIden)]
enum DimDate {
    Table,
    DateKey,
}
