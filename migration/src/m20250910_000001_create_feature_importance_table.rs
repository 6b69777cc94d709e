use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FeatureImportance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeatureImportance::FeatureImportanceId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FeatureImportance::SnapshotDateKey)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeatureImportance::ModelType)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeatureImportance::ModelVersion).string_len(32).null())
                    .col(
                        ColumnDef::new(FeatureImportance::FeatureName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeatureImportance::ImportanceScore)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeatureImportance::ImportanceRank)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeatureImportance::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feature_importance_snapshot_date_key")
                            .from(FeatureImportance::Table, FeatureImportance::SnapshotDateKey)
                            .to(DimDate::Table, DimDate::DateKey)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FeatureImportance::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FeatureImportance {
    Table,
    FeatureImportanceId,
    SnapshotDateKey,
    ModelType,
    ModelVersion,
    FeatureName,
    ImportanceScore,
    ImportanceRank,
    CreatedAt,
}

#[derive(DeriveIden)]
enum DimDate {
    Table,
    DateKey,
}
