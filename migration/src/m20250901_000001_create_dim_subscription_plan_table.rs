use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DimSubscriptionPlan::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DimSubscriptionPlan::SubscriptionPlanKey)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DimSubscriptionPlan::PlanIdNk)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DimSubscriptionPlan::PlanName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DimSubscriptionPlan::Tier)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DimSubscriptionPlan::BillingCycle)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DimSubscriptionPlan::BasePrice)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(DimSubscriptionPlan::Currency)
                            .string_len(3)
                            .not_null()
                            .default("USD"),
                    )
                    .col(ColumnDef::new(DimSubscriptionPlan::HasCertificate).boolean().null())
                    .col(ColumnDef::new(DimSubscriptionPlan::HasMentoring).boolean().null())
                    .col(ColumnDef::new(DimSubscriptionPlan::HasDownloads).boolean().null())
                    .to_owned(),
            )
            .await?;

        // ティア別フィルタ用
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_dim_subscription_plan_tier")
                    .table(DimSubscriptionPlan::Table)
                    .col(DimSubscriptionPlan::Tier)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DimSubscriptionPlan::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DimSubscriptionPlan {
    Table,
    SubscriptionPlanKey,
    PlanIdNk,
    PlanName,
    Tier,
    BillingCycle,
    BasePrice,
    Currency,
    HasCertificate,
    HasMentoring,
    HasDownloads,
}
