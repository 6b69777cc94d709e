// src/repository/snapshot_repository.rs

//! 分析スナップショットの書き込みと、最新スナップショットに対する集計クエリ

use super::latest::{latest_activity_cte, latest_snapshot_cte};
use crate::domain::fact_user_analytics_snapshot_model::{
    self, ActiveModel as SnapshotActiveModel, Column as SnapshotColumn, Entity as SnapshotEntity,
};
use sea_orm::entity::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ConnectionTrait, DbBackend, DbConn, DbErr, FromQueryResult, QueryFilter, QueryOrder, Statement,
    Value,
};

/// セグメント表示名（ラベル → クラスタ名 → RFMコード → "Unclassified"）
const SEGMENT_EXPR: &str =
    "COALESCE(ls.segment_label, ls.kmeans_segment_label, ls.rfm_segment, 'Unclassified')";

/// 最新アクティビティのプランを優先し、なければスナップショットのプラン
const PLAN_JOIN: &str = r#"
    LEFT JOIN latest_activity la ON la.user_key = ls.user_key
    LEFT JOIN dim_subscription_plan p
      ON p.subscription_plan_key = COALESCE(la.subscription_plan_key, ls.subscription_plan_key)
"#;

#[derive(Debug, Clone, FromQueryResult)]
pub struct RfmCohortRow {
    pub user_key: i32,
    pub user_id_nk: String,
    pub country: Option<String>,
    pub segment: String,
    pub rfm_r_score: Option<i32>,
    pub rfm_f_score: Option<i32>,
    pub rfm_m_score: Option<i32>,
    pub clv_value: Option<f64>,
    pub churn_probability: Option<f64>,
    pub days_since_last_login: Option<i32>,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct HighRiskRow {
    pub user_key: i32,
    pub user_id_nk: String,
    pub segment: String,
    pub days_since_last_login: Option<i32>,
    pub churn_probability: f64,
}

#[derive(Debug, Clone, Copy, FromQueryResult)]
pub struct HighRiskCountRow {
    pub total: i64,
    pub new_recent: i64,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct TierCountRow {
    pub tier: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct SegmentChurnRow {
    pub segment: String,
    pub avg_churn_probability: f64,
}

#[derive(Debug, FromQueryResult)]
struct MeanDaysRow {
    mean_days: Option<f64>,
}

#[derive(Debug, FromQueryResult)]
struct CountRow {
    count: i64,
}

/// ティア絞り込み条件（大文字小文字を区別しない）
fn tier_filter(param: usize) -> String {
    format!("(${p}::text IS NULL OR LOWER(p.tier) = LOWER(${p}))", p = param)
}

#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    db: DbConn,
}

impl SnapshotRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// (user_key, snapshot_date_key) で upsert する。同じ日の再実行は上書き
    pub async fn upsert_many<C>(conn: &C, rows: Vec<SnapshotActiveModel>) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        if rows.is_empty() {
            return Ok(0);
        }
        SnapshotEntity::insert_many(rows)
            .on_conflict(
                OnConflict::columns([SnapshotColumn::UserKey, SnapshotColumn::SnapshotDateKey])
                    .update_columns([
                        SnapshotColumn::SubscriptionPlanKey,
                        SnapshotColumn::RfmRecency,
                        SnapshotColumn::RfmFrequency,
                        SnapshotColumn::RfmMonetary,
                        SnapshotColumn::RfmRScore,
                        SnapshotColumn::RfmFScore,
                        SnapshotColumn::RfmMScore,
                        SnapshotColumn::RfmSegment,
                        SnapshotColumn::SegmentLabel,
                        SnapshotColumn::EngagementLevel,
                        SnapshotColumn::KmeansCluster,
                        SnapshotColumn::KmeansSegmentLabel,
                        SnapshotColumn::ChurnProbability,
                        SnapshotColumn::ChurnRiskBand,
                        SnapshotColumn::SurvivalMedianTimeToDowngrade,
                        SnapshotColumn::SurvivalRisk90d,
                        SnapshotColumn::ClvValue,
                        SnapshotColumn::ClvBand,
                        SnapshotColumn::ModelVersion,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await
    }

    /// 外部で計算したスコアの取り込み用
    pub async fn insert(
        &self,
        row: SnapshotActiveModel,
    ) -> Result<fact_user_analytics_snapshot_model::Model, DbErr> {
        row.insert(&self.db).await
    }

    pub async fn find_by_user(
        &self,
        user_key: i32,
    ) -> Result<Vec<fact_user_analytics_snapshot_model::Model>, DbErr> {
        SnapshotEntity::find()
            .filter(SnapshotColumn::UserKey.eq(user_key))
            .order_by_desc(SnapshotColumn::SnapshotDateKey)
            .all(&self.db)
            .await
    }

    /// 最新スナップショットのチャーン確率が閾値以上のユーザー数
    pub async fn count_at_or_above(&self, as_of_key: i32, threshold: f64) -> Result<i64, DbErr> {
        let sql = format!(
            r#"
            WITH {latest}
            SELECT COUNT(*) AS count
            FROM latest_snapshot ls
            WHERE ls.churn_probability >= $2
            "#,
            latest = latest_snapshot_cte("latest_snapshot", 1)
        );

        let row = CountRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            &sql,
            vec![as_of_key.into(), threshold.into()],
        ))
        .one(&self.db)
        .await?;

        Ok(row.map_or(0, |r| r.count))
    }

    /// RFMコホート表
    pub async fn find_rfm_cohort(
        &self,
        as_of_key: i32,
        country: Option<String>,
        tier: Option<String>,
        limit: i64,
    ) -> Result<Vec<RfmCohortRow>, DbErr> {
        let sql = format!(
            r#"
            WITH {snapshot}, {activity}
            SELECT u.user_key, u.user_id_nk, u.country,
                   {segment} AS segment,
                   ls.rfm_r_score, ls.rfm_f_score, ls.rfm_m_score,
                   ls.clv_value, ls.churn_probability,
                   la.days_since_last_login
            FROM latest_snapshot ls
            JOIN dim_user u ON u.user_key = ls.user_key
            {plan_join}
            WHERE ($2::text IS NULL OR u.country = $2)
              AND {tier_filter}
            ORDER BY COALESCE(ls.rfm_r_score, 0) + COALESCE(ls.rfm_f_score, 0)
                     + COALESCE(ls.rfm_m_score, 0) DESC,
                     u.user_key
            LIMIT $4
            "#,
            snapshot = latest_snapshot_cte("latest_snapshot", 1),
            activity = latest_activity_cte("latest_activity", 1),
            segment = SEGMENT_EXPR,
            plan_join = PLAN_JOIN,
            tier_filter = tier_filter(3),
        );

        RfmCohortRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            &sql,
            vec![
                as_of_key.into(),
                Value::from(country),
                Value::from(tier),
                limit.into(),
            ],
        ))
        .all(&self.db)
        .await
    }

    /// 閾値以上の高リスク学習者（チャーン確率の高い順）
    pub async fn find_high_risk(
        &self,
        as_of_key: i32,
        threshold: f64,
        tier: Option<String>,
    ) -> Result<Vec<HighRiskRow>, DbErr> {
        let sql = format!(
            r#"
            WITH {snapshot}, {activity}
            SELECT u.user_key, u.user_id_nk,
                   {segment} AS segment,
                   la.days_since_last_login,
                   ls.churn_probability
            FROM latest_snapshot ls
            JOIN dim_user u ON u.user_key = ls.user_key
            {plan_join}
            WHERE ls.churn_probability >= $2
              AND {tier_filter}
            ORDER BY ls.churn_probability DESC, u.user_key
            "#,
            snapshot = latest_snapshot_cte("latest_snapshot", 1),
            activity = latest_activity_cte("latest_activity", 1),
            segment = SEGMENT_EXPR,
            plan_join = PLAN_JOIN,
            tier_filter = tier_filter(3),
        );

        HighRiskRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            &sql,
            vec![as_of_key.into(), threshold.into(), Value::from(tier)],
        ))
        .all(&self.db)
        .await
    }

    /// 高リスク件数と、比較日時点では閾値未満（または未スコア）だった件数
    pub async fn count_high_risk(
        &self,
        as_of_key: i32,
        compare_key: i32,
        threshold: f64,
        tier: Option<String>,
    ) -> Result<HighRiskCountRow, DbErr> {
        let sql = format!(
            r#"
            WITH {snapshot}, {previous}, {activity}
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (
                       WHERE ps.churn_probability IS NULL OR ps.churn_probability < $3
                   ) AS new_recent
            FROM latest_snapshot ls
            LEFT JOIN previous_snapshot ps ON ps.user_key = ls.user_key
            {plan_join}
            WHERE ls.churn_probability >= $3
              AND {tier_filter}
            "#,
            snapshot = latest_snapshot_cte("latest_snapshot", 1),
            previous = latest_snapshot_cte("previous_snapshot", 2),
            activity = latest_activity_cte("latest_activity", 1),
            plan_join = PLAN_JOIN,
            tier_filter = tier_filter(4),
        );

        let row = HighRiskCountRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            &sql,
            vec![
                as_of_key.into(),
                compare_key.into(),
                threshold.into(),
                Value::from(tier),
            ],
        ))
        .one(&self.db)
        .await?;

        Ok(row.unwrap_or(HighRiskCountRow {
            total: 0,
            new_recent: 0,
        }))
    }

    /// 閾値以上のユーザーをティア別に数える
    pub async fn count_by_tier(
        &self,
        as_of_key: i32,
        threshold: f64,
        tier: Option<String>,
    ) -> Result<Vec<TierCountRow>, DbErr> {
        let sql = format!(
            r#"
            WITH {snapshot}, {activity}
            SELECT p.tier, COUNT(*) AS count
            FROM latest_snapshot ls
            {plan_join}
            WHERE ls.churn_probability >= $2
              AND {tier_filter}
            GROUP BY p.tier
            ORDER BY count DESC, p.tier
            "#,
            snapshot = latest_snapshot_cte("latest_snapshot", 1),
            activity = latest_activity_cte("latest_activity", 1),
            plan_join = PLAN_JOIN,
            tier_filter = tier_filter(3),
        );

        TierCountRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            &sql,
            vec![as_of_key.into(), threshold.into(), Value::from(tier)],
        ))
        .all(&self.db)
        .await
    }

    /// セグメントごとの平均チャーン確率（チャーン確率のある行のみ）
    pub async fn average_churn_by_segment(
        &self,
        as_of_key: i32,
    ) -> Result<Vec<SegmentChurnRow>, DbErr> {
        let sql = format!(
            r#"
            WITH {snapshot}
            SELECT {segment} AS segment,
                   AVG(ls.churn_probability) AS avg_churn_probability
            FROM latest_snapshot ls
            WHERE ls.churn_probability IS NOT NULL
            GROUP BY 1
            ORDER BY 1
            "#,
            snapshot = latest_snapshot_cte("latest_snapshot", 1),
            segment = SEGMENT_EXPR,
        );

        SegmentChurnRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            &sql,
            vec![as_of_key.into()],
        ))
        .all(&self.db)
        .await
    }

    /// 最新スナップショットのダウングレードまでの中央日数の平均
    pub async fn mean_time_to_downgrade(&self, as_of_key: i32) -> Result<Option<f64>, DbErr> {
        let sql = format!(
            r#"
            WITH {snapshot}
            SELECT AVG(ls.survival_median_time_to_downgrade)::float8 AS mean_days
            FROM latest_snapshot ls
            "#,
            snapshot = latest_snapshot_cte("latest_snapshot", 1),
        );

        let row = MeanDaysRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            &sql,
            vec![as_of_key.into()],
        ))
        .one(&self.db)
        .await?;

        Ok(row.and_then(|r| r.mean_days))
    }
}
