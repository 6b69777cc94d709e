use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ユーザーごとの最新アクティビティ解決用
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_fact_user_daily_activity_user_date")
                    .table(FactUserDailyActivity::Table)
                    .col(FactUserDailyActivity::UserKey)
                    .col(FactUserDailyActivity::DateKey)
                    .to_owned(),
            )
            .await?;

        // 最新スナップショット日付の探索用
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_fact_user_analytics_snapshot_date")
                    .table(FactUserAnalyticsSnapshot::Table)
                    .col(FactUserAnalyticsSnapshot::SnapshotDateKey)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_dashboard_metrics_snapshot_date")
                    .table(DashboardMetrics::Table)
                    .col(DashboardMetrics::SnapshotDateKey)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_feature_importance_model_date")
                    .table(FeatureImportance::Table)
                    .col(FeatureImportance::ModelType)
                    .col(FeatureImportance::SnapshotDateKey)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_model_performance_metrics_model_date")
                    .table(ModelPerformanceMetrics::Table)
                    .col(ModelPerformanceMetrics::ModelType)
                    .col(ModelPerformanceMetrics::SnapshotDateKey)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_churn_reasons_snapshot_date")
                    .table(ChurnReasons::Table)
                    .col(ChurnReasons::SnapshotDateKey)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_campaign_performance_snapshot_date")
                    .table(CampaignPerformance::Table)
                    .col(CampaignPerformance::SnapshotDateKey)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table) in [
            (
                "idx_fact_user_daily_activity_user_date",
                FactUserDailyActivity::Table.into_iden(),
            ),
            (
                "idx_fact_user_analytics_snapshot_date",
                FactUserAnalyticsSnapshot::Table.into_iden(),
            ),
            (
                "idx_dashboard_metrics_snapshot_date",
                DashboardMetrics::Table.into_iden(),
            ),
            (
                "idx_feature_importance_model_date",
                FeatureImportance::Table.into_iden(),
            ),
            (
                "idx_model_performance_metrics_model_date",
                ModelPerformanceMetrics::Table.into_iden(),
            ),
            (
                "idx_churn_reasons_snapshot_date",
                ChurnReasons::Table.into_iden(),
            ),
            (
                "idx_campaign_performance_snapshot_date",
                CampaignPerformance::Table.into_iden(),
            ),
        ] {
            manager
                .drop_index(Index::drop().name(name).table(table).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum FactUserDailyActivity {
    Table,
    UserKey,
    DateKey,
}

#[derive(DeriveIden)]
enum FactUserAnalyticsSnapshot {
    Table,
    SnapshotDateKey,
}

#[derive(DeriveIden)]
enum DashboardMetrics {
    Table,
    SnapshotDateKey,
}

#[derive(DeriveIden)]
enum FeatureImportance {
    Table,
    ModelType,
    SnapshotDateKey,
}

#[derive(DeriveIden)]
enum ModelPerformanceMetrics {
    Table,
    ModelType,
    SnapshotDateKey,
}

#[derive(DeriveIden)]
enum ChurnReasons {
    Table,
    SnapshotDateKey,
}

#[derive(DeriveIden)]
enum CampaignPerformance {
    Table,
    SnapshotDateKey,
}
