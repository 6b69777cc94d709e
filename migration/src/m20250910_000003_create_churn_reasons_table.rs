use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChurnReasons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChurnReasons::ChurnReasonId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ChurnReasons::SnapshotDateKey).integer().not_null())
                    .col(
                        ColumnDef::new(ChurnReasons::ReasonCategory)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChurnReasons::ReasonDisplayName)
                            .string_len(100)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ChurnReasons::ReasonCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(ChurnReasons::ReasonPct).double().null())
                    .col(ColumnDef::new(ChurnReasons::AvgChurnProbability).double().null())
                    .col(ColumnDef::new(ChurnReasons::SeverityLevel).string_len(32).null())
                    .col(
                        ColumnDef::new(ChurnReasons::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_churn_reasons_snapshot_date_key")
                            .from(ChurnReasons::Table, ChurnReasons::SnapshotDateKey)
                            .to(DimDate::Table, DimDate::DateKey)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChurnReasons::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ChurnReasons {
    Table,
    ChurnReasonId,
    SnapshotDateKey,
    ReasonCategory,
    ReasonDisplayName,
    ReasonCount,
    ReasonPct,
    AvgChurnProbability,
    SeverityLevel,
    CreatedAt,
}

#[derive(DeriveIden)]
enum DimDate {
    Table,
    DateKey,
}
