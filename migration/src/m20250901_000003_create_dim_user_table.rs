use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DimUser::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DimUser::UserKey)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DimUser::UserIdNk)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    // サインアップ日は日付ディメンションの範囲外になりうるため外部キーにしない
                    .col(ColumnDef::new(DimUser::SignupDateKey).integer().not_null())
                    .col(ColumnDef::new(DimUser::BirthDate).timestamp().null())
                    .col(ColumnDef::new(DimUser::Gender).string_len(32).null())
                    .col(ColumnDef::new(DimUser::Country).string_len(100).null())
                    .col(ColumnDef::new(DimUser::City).string_len(100).null())
                    .col(ColumnDef::new(DimUser::UserType).string_len(32).null())
                    .col(ColumnDef::new(DimUser::AcquisitionChannel).string_len(64).null())
                    .col(ColumnDef::new(DimUser::InitialPlanKey).integer().null())
                    .col(ColumnDef::new(DimUser::IsPremiumEver).boolean().null())
                    .col(ColumnDef::new(DimUser::CurrentStatus).string_len(32).null())
                    .col(
                        ColumnDef::new(DimUser::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(DimUser::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dim_user_initial_plan_key")
                            .from(DimUser::Table, DimUser::InitialPlanKey)
                            .to(
                                DimSubscriptionPlan::Table,
                                DimSubscriptionPlan::SubscriptionPlanKey,
                            )
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_dim_user_country")
                    .table(DimUser::Table)
                    .col(DimUser::Country)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DimUser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DimUser {
    Table,
    UserKey,
    UserIdNk,
    SignupDateKey,
    BirthDate,
    Gender,
    Country,
    City,
    UserType,
    AcquisitionChannel,
    InitialPlanKey,
    IsPremiumEver,
    CurrentStatus,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum DimSubscriptionPlan {
    Table,
    SubscriptionPlanKey,
}
