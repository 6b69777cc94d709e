// src/repository/activity_repository.rs

use super::latest::latest_activity_cte;
use crate::domain::engagement::LearnerState;
use crate::domain::fact_campaign_interaction_model::{
    self, ActiveModel as InteractionActiveModel, Entity as InteractionEntity,
};
use crate::domain::fact_user_daily_activity_model::{
    self, ActiveModel as ActivityActiveModel, Entity as ActivityEntity,
};
use crate::domain::rfm::ActivityObservation;
use sea_orm::entity::*;
use sea_orm::{
    ConnectionTrait, DbBackend, DbConn, DbErr, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect, Statement,
};

#[derive(Debug, FromQueryResult)]
struct ObservationRow {
    user_key: i32,
    date_key: i32,
    subscription_plan_key: Option<i32>,
    days_since_last_login: Option<i32>,
    active_days_last_30d: Option<i32>,
    base_price: Option<f64>,
}

#[derive(Debug, FromQueryResult)]
struct LearnerStateRow {
    user_key: i32,
    signup_date_key: i32,
    current_status: Option<String>,
    is_premium: Option<bool>,
    tier: Option<String>,
    date_key: i32,
    days_since_last_login: Option<i32>,
    active_days_last_30d: Option<i32>,
}

/// 日次アクティビティとキャンペーン接触のファクト
#[derive(Debug, Clone)]
pub struct ActivityRepository {
    db: DbConn,
}

impl ActivityRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        activity: ActivityActiveModel,
    ) -> Result<fact_user_daily_activity_model::Model, DbErr> {
        activity.insert(&self.db).await
    }

    /// ユーザーの履歴を新しい順に取得
    pub async fn find_by_user(
        &self,
        user_key: i32,
        limit: u64,
    ) -> Result<Vec<fact_user_daily_activity_model::Model>, DbErr> {
        ActivityEntity::find()
            .filter(fact_user_daily_activity_model::Column::UserKey.eq(user_key))
            .order_by_desc(fact_user_daily_activity_model::Column::DateKey)
            .order_by_desc(fact_user_daily_activity_model::Column::FactUserDailyActivityId)
            .limit(limit)
            .all(&self.db)
            .await
    }

    pub async fn create_interaction(
        &self,
        interaction: InteractionActiveModel,
    ) -> Result<fact_campaign_interaction_model::Model, DbErr> {
        interaction.insert(&self.db).await
    }

    /// スコアリング入力。期間内のアクティビティにプラン価格を左外部結合する
    pub async fn find_observations(
        &self,
        from_key: i32,
        to_key: i32,
    ) -> Result<Vec<ActivityObservation>, DbErr> {
        let sql = r#"
            SELECT a.user_key, a.date_key, a.subscription_plan_key,
                   a.days_since_last_login, a.active_days_last_30d, p.base_price
            FROM fact_user_daily_activity a
            LEFT JOIN dim_subscription_plan p
              ON p.subscription_plan_key = a.subscription_plan_key
            WHERE a.date_key >= $1 AND a.date_key <= $2
            ORDER BY a.user_key, a.date_key, a.fact_user_daily_activity_id
        "#;

        let rows = ObservationRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            vec![from_key.into(), to_key.into()],
        ))
        .all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ActivityObservation {
                user_key: row.user_key,
                date_key: row.date_key,
                subscription_plan_key: row.subscription_plan_key,
                days_since_last_login: row.days_since_last_login,
                active_days_last_30d: row.active_days_last_30d,
                base_price: row.base_price,
            })
            .collect())
    }

    /// 基準日時点の最新アクティビティ（ユーザー属性とプラン区分付き）
    pub async fn find_learner_states(&self, as_of_key: i32) -> Result<Vec<LearnerState>, DbErr> {
        let sql = format!(
            r#"
            WITH {latest}
            SELECT u.user_key, u.signup_date_key, u.current_status,
                   la.is_premium, p.tier, la.date_key,
                   la.days_since_last_login, la.active_days_last_30d
            FROM latest_activity la
            JOIN dim_user u ON u.user_key = la.user_key
            LEFT JOIN dim_subscription_plan p
              ON p.subscription_plan_key = la.subscription_plan_key
            ORDER BY u.user_key
            "#,
            latest = latest_activity_cte("latest_activity", 1)
        );

        let rows = LearnerStateRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            &sql,
            vec![as_of_key.into()],
        ))
        .all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| LearnerState {
                user_key: row.user_key,
                signup_date_key: row.signup_date_key,
                current_status: row.current_status,
                is_premium: row.is_premium,
                tier: row.tier,
                activity_date_key: row.date_key,
                days_since_last_login: row.days_since_last_login,
                active_days_last_30d: row.active_days_last_30d,
            })
            .collect())
    }

    /// 一括挿入（シーダー用）
    pub async fn insert_many<C>(conn: &C, rows: Vec<ActivityActiveModel>) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        if rows.is_empty() {
            return Ok(());
        }
        ActivityEntity::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }

    pub async fn insert_many_interactions<C>(
        conn: &C,
        rows: Vec<InteractionActiveModel>,
    ) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        if rows.is_empty() {
            return Ok(());
        }
        InteractionEntity::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }
}
