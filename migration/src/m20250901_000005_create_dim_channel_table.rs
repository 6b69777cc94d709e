use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DimChannel::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DimChannel::ChannelKey)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DimChannel::ChannelName)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(DimChannel::Description).text().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DimChannel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DimChannel {
    Table,
    ChannelKey,
    ChannelName,
    Description,
}
