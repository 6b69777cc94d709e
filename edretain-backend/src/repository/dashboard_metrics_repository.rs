// src/repository/dashboard_metrics_repository.rs

use crate::domain::dashboard_metrics_model::{
    self, ActiveModel as DashboardMetricsActiveModel, Column, Entity as DashboardMetricsEntity,
};
use chrono::NaiveDate;
use sea_orm::entity::*;
use sea_orm::{
    ConnectionTrait, DbBackend, DbConn, DbErr, FromQueryResult, QueryFilter, QueryOrder, Statement,
};

/// 継続率推移の1点（日付ディメンション結合済み）
#[derive(Debug, Clone, FromQueryResult)]
pub struct TrendRow {
    pub full_date: NaiveDate,
    pub month_name: String,
    pub monthly_retention_rate: f64,
    pub monthly_churn_rate: f64,
}

#[derive(Debug, Clone)]
pub struct DashboardMetricsRepository {
    db: DbConn,
}

impl DashboardMetricsRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// 期間内（両端含む）で最新のスナップショット日の行
    pub async fn find_latest_in_range(
        &self,
        from_key: i32,
        to_key: i32,
    ) -> Result<Option<dashboard_metrics_model::Model>, DbErr> {
        DashboardMetricsEntity::find()
            .filter(Column::SnapshotDateKey.between(from_key, to_key))
            .order_by_desc(Column::SnapshotDateKey)
            .order_by_desc(Column::DashboardMetricsId)
            .one(&self.db)
            .await
    }

    /// 指定日より前で最新の行（変化量の基準）
    pub async fn find_latest_before<C>(
        conn: &C,
        snapshot_date_key: i32,
    ) -> Result<Option<dashboard_metrics_model::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        DashboardMetricsEntity::find()
            .filter(Column::SnapshotDateKey.lt(snapshot_date_key))
            .order_by_desc(Column::SnapshotDateKey)
            .order_by_desc(Column::DashboardMetricsId)
            .one(conn)
            .await
    }

    /// 期間内の全行を暦日の昇順で
    pub async fn find_trend(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<TrendRow>, DbErr> {
        let sql = r#"
            SELECT d.full_date, d.month_name,
                   dm.monthly_retention_rate, dm.monthly_churn_rate
            FROM dashboard_metrics dm
            JOIN dim_date d ON d.date_key = dm.snapshot_date_key
            WHERE d.full_date BETWEEN $1 AND $2
            ORDER BY d.full_date ASC, dm.dashboard_metrics_id ASC
        "#;

        TrendRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            vec![from.into(), to.into()],
        ))
        .all(&self.db)
        .await
    }

    pub async fn insert<C>(
        conn: &C,
        row: DashboardMetricsActiveModel,
    ) -> Result<dashboard_metrics_model::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        row.insert(conn).await
    }
}
