use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ModelPerformanceMetrics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ModelPerformanceMetrics::ModelPerformanceId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ModelPerformanceMetrics::SnapshotDateKey)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ModelPerformanceMetrics::ModelType)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ModelPerformanceMetrics::ModelVersion)
                            .string_len(32)
                            .null(),
                    )
                    .col(ColumnDef::new(ModelPerformanceMetrics::Accuracy).double().null())
                    .col(ColumnDef::new(ModelPerformanceMetrics::Precision).double().null())
                    .col(ColumnDef::new(ModelPerformanceMetrics::Recall).double().null())
                    .col(ColumnDef::new(ModelPerformanceMetrics::F1Score).double().null())
                    .col(ColumnDef::new(ModelPerformanceMetrics::AucRoc).double().null())
                    .col(ColumnDef::new(ModelPerformanceMetrics::TrainSamples).integer().null())
                    .col(ColumnDef::new(ModelPerformanceMetrics::TestSamples).integer().null())
                    .col(
                        ColumnDef::new(ModelPerformanceMetrics::TrueNegatives)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ModelPerformanceMetrics::FalsePositives)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ModelPerformanceMetrics::FalseNegatives)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ModelPerformanceMetrics::TruePositives)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ModelPerformanceMetrics::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_model_performance_metrics_snapshot_date_key")
                            .from(
                                ModelPerformanceMetrics::Table,
                                ModelPerformanceMetrics::SnapshotDateKey,
                            )
                            .to(DimDate::Table, DimDate::DateKey)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(ModelPerformanceMetrics::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum ModelPerformanceMetrics {
    Table,
    ModelPerformanceId,
    SnapshotDateKey,
    ModelType,
    ModelVersion,
    Accuracy,
    Precision,
    Recall,
    F1Score,
    AucRoc,
    TrainSamples,
    TestSamples,
    TrueNegatives,
    FalsePositives,
    FalseNegatives,
    TruePositives,
    CreatedAt,
}

#[derive(DeriveIden)]
enum DimDate {
    Table,
    DateKey,
}
