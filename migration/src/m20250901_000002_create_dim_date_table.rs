use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // date_key は YYYYMMDD の整数。サロゲートではなく日付そのものから導出する
        manager
            .create_table(
                Table::create()
                    .table(DimDate::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DimDate::DateKey)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DimDate::FullDate).date().not_null().unique_key())
                    .col(ColumnDef::new(DimDate::Year).integer().not_null())
                    .col(ColumnDef::new(DimDate::Quarter).integer().not_null())
                    .col(ColumnDef::new(DimDate::Month).integer().not_null())
                    .col(ColumnDef::new(DimDate::MonthName).string_len(16).not_null())
                    .col(ColumnDef::new(DimDate::WeekOfYear).integer().not_null())
                    .col(ColumnDef::new(DimDate::DayOfMonth).integer().not_null())
                    .col(ColumnDef::new(DimDate::DayOfWeek).integer().not_null())
                    .col(ColumnDef::new(DimDate::DayName).string_len(16).not_null())
                    .col(
                        ColumnDef::new(DimDate::IsWeekend)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DimDate::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DimDate {
    Table,
    DateKey,
    FullDate,
    Year,
    Quarter,
    Month,
    MonthName,
    WeekOfYear,
    DayOfMonth,
    DayOfWeek,
    DayName,
    IsWeekend,
}
