use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ユーザー×日付ごとに1行（キーでは強制しない）
        manager
            .create_table(
                Table::create()
                    .table(FactUserDailyActivity::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FactUserDailyActivity::FactUserDailyActivityId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FactUserDailyActivity::UserKey).integer().not_null())
                    .col(ColumnDef::new(FactUserDailyActivity::DateKey).integer().not_null())
                    .col(
                        ColumnDef::new(FactUserDailyActivity::SubscriptionPlanKey)
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(FactUserDailyActivity::CampaignKey).integer().null())
                    .col(ColumnDef::new(FactUserDailyActivity::IsPremium).boolean().null())
                    .col(
                        ColumnDef::new(FactUserDailyActivity::HasActiveSubscription)
                            .boolean()
                            .null(),
                    )
                    .col(ColumnDef::new(FactUserDailyActivity::LoginsCount).integer().null())
                    .col(ColumnDef::new(FactUserDailyActivity::SessionsCount).integer().null())
                    .col(ColumnDef::new(FactUserDailyActivity::MinutesWatched).integer().null())
                    .col(
                        ColumnDef::new(FactUserDailyActivity::LessonsCompleted)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FactUserDailyActivity::QuizzesAttempted)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FactUserDailyActivity::DistinctCoursesAccessed)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FactUserDailyActivity::ActiveDaysLast30d)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FactUserDailyActivity::DaysSinceLastLogin)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FactUserDailyActivity::IsInactive7dFlag)
                            .boolean()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FactUserDailyActivity::ActiveCoursesCount)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FactUserDailyActivity::CompletedCoursesTotal)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FactUserDailyActivity::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fact_user_daily_activity_user_key")
                            .from(FactUserDailyActivity::Table, FactUserDailyActivity::UserKey)
                            .to(DimUser::Table, DimUser::UserKey)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fact_user_daily_activity_date_key")
                            .from(FactUserDailyActivity::Table, FactUserDailyActivity::DateKey)
                            .to(DimDate::Table, DimDate::DateKey)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fact_user_daily_activity_plan_key")
                            .from(
                                FactUserDailyActivity::Table,
                                FactUserDailyActivity::SubscriptionPlanKey,
                            )
                            .to(
                                DimSubscriptionPlan::Table,
                                DimSubscriptionPlan::SubscriptionPlanKey,
                            )
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fact_user_daily_activity_campaign_key")
                            .from(
                                FactUserDailyActivity::Table,
                                FactUserDailyActivity::CampaignKey,
                            )
                            .to(DimCampaign::Table, DimCampaign::CampaignKey)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_fact_user_daily_activity_date_key")
                    .table(FactUserDailyActivity::Table)
                    .col(FactUserDailyActivity::DateKey)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FactUserDailyActivity::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FactUserDailyActivity {
    Table,
    FactUserDailyActivityId,
    UserKey,
    DateKey,
    SubscriptionPlanKey,
    CampaignKey,
    IsPremium,
    HasActiveSubscription,
    LoginsCount,
    SessionsCount,
    MinutesWatched,
    LessonsCompleted,
    QuizzesAttempted,
    DistinctCoursesAccessed,
    #[sea_orm(iden = "active_days_last_30d")]
    ActiveDaysLast30d,
    DaysSinceLastLogin,
    #[sea_orm(iden = "is_inactive_7d_flag")]
    IsInactive7dFlag,
    ActiveCoursesCount,
    CompletedCoursesTotal,
    CreatedAt,
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

#[derive(DeriveIden)]
enum DimCampaign {
    Table,
    CampaignKey,
}
