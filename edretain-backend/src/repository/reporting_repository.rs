// src/repository/reporting_repository.rs

//! 事前集計レポーティングファクト（特徴量重要度・チャーン理由・キャンペーン効果・モデル性能）

use crate::domain::campaign_performance_model::{
    self, ActiveModel as CampaignPerformanceActiveModel, Entity as CampaignPerformanceEntity,
};
use crate::domain::churn_reasons_model::{
    self, ActiveModel as ChurnReasonsActiveModel, Entity as ChurnReasonsEntity,
};
use crate::domain::feature_importance_model::{
    self, ActiveModel as FeatureImportanceActiveModel, Entity as FeatureImportanceEntity,
};
use crate::domain::model_performance_metrics_model::{
    self, ActiveModel as ModelPerformanceActiveModel, Entity as ModelPerformanceEntity,
};
use sea_orm::entity::*;
use sea_orm::{
    ConnectionTrait, DbConn, DbErr, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

#[derive(Debug, Clone)]
pub struct ReportingRepository {
    db: DbConn,
}

impl ReportingRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    // --- 特徴量重要度 ---

    /// モデル種別の、期間内で最新スナップショット日の特徴量（順位順）
    pub async fn find_feature_importance(
        &self,
        model_type: &str,
        from_key: i32,
        to_key: i32,
        limit: Option<u64>,
    ) -> Result<Vec<feature_importance_model::Model>, DbErr> {
        use feature_importance_model::Column;

        let latest = FeatureImportanceEntity::find()
            .filter(Column::ModelType.eq(model_type))
            .filter(Column::SnapshotDateKey.between(from_key, to_key))
            .order_by_desc(Column::SnapshotDateKey)
            .one(&self.db)
            .await?;

        let Some(latest) = latest else {
            return Ok(Vec::new());
        };

        let mut query = FeatureImportanceEntity::find()
            .filter(Column::ModelType.eq(model_type))
            .filter(Column::SnapshotDateKey.eq(latest.snapshot_date_key))
            .order_by_asc(Column::ImportanceRank)
            .order_by_asc(Column::FeatureImportanceId);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        query.all(&self.db).await
    }

    // --- チャーン理由 ---

    /// 基準日以前で最新スナップショット日の理由一覧（件数の多い順）
    pub async fn find_latest_churn_reasons(
        &self,
        as_of_key: i32,
    ) -> Result<Vec<churn_reasons_model::Model>, DbErr> {
        use churn_reasons_model::Column;

        let latest = ChurnReasonsEntity::find()
            .filter(Column::SnapshotDateKey.lte(as_of_key))
            .order_by_desc(Column::SnapshotDateKey)
            .one(&self.db)
            .await?;

        let Some(latest) = latest else {
            return Ok(Vec::new());
        };

        ChurnReasonsEntity::find()
            .filter(Column::SnapshotDateKey.eq(latest.snapshot_date_key))
            .order_by_desc(Column::ReasonCount)
            .order_by_asc(Column::ChurnReasonId)
            .all(&self.db)
            .await
    }

    // --- キャンペーン効果 ---

    /// 基準日以前で最新スナップショット日のキャンペーン効果
    pub async fn find_latest_campaign_performance(
        &self,
        as_of_key: i32,
    ) -> Result<Vec<campaign_performance_model::Model>, DbErr> {
        use campaign_performance_model::Column;

        let latest = CampaignPerformanceEntity::find()
            .filter(Column::SnapshotDateKey.lte(as_of_key))
            .order_by_desc(Column::SnapshotDateKey)
            .one(&self.db)
            .await?;

        let Some(latest) = latest else {
            return Ok(Vec::new());
        };

        CampaignPerformanceEntity::find()
            .filter(Column::SnapshotDateKey.eq(latest.snapshot_date_key))
            .order_by_desc(Column::LaunchDate)
            .order_by_asc(Column::CampaignPerformanceId)
            .all(&self.db)
            .await
    }

    // --- モデル性能 ---

    /// モデル種別の直近2件（新しい順）
    pub async fn find_recent_model_performance(
        &self,
        model_type: &str,
        as_of_key: i32,
    ) -> Result<Vec<model_performance_metrics_model::Model>, DbErr> {
        use model_performance_metrics_model::Column;

        ModelPerformanceEntity::find()
            .filter(Column::ModelType.eq(model_type))
            .filter(Column::SnapshotDateKey.lte(as_of_key))
            .order_by_desc(Column::SnapshotDateKey)
            .order_by_desc(Column::ModelPerformanceId)
            .limit(2)
            .all(&self.db)
            .await
    }

    // --- 一括挿入（シーダー用） ---

    /// その日付のモデル性能行が既にあるか
    pub async fn has_fixtures_for_date<C>(conn: &C, snapshot_date_key: i32) -> Result<bool, DbErr>
    where
        C: ConnectionTrait,
    {
        let rows = ModelPerformanceEntity::find()
            .filter(model_performance_metrics_model::Column::SnapshotDateKey.eq(snapshot_date_key))
            .count(conn)
            .await?;
        Ok(rows > 0)
    }

    pub async fn insert_feature_importance<C>(
        conn: &C,
        rows: Vec<FeatureImportanceActiveModel>,
    ) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        if rows.is_empty() {
            return Ok(());
        }
        FeatureImportanceEntity::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }

    pub async fn insert_churn_reasons<C>(
        conn: &C,
        rows: Vec<ChurnReasonsActiveModel>,
    ) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        if rows.is_empty() {
            return Ok(());
        }
        ChurnReasonsEntity::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }

    pub async fn insert_campaign_performance<C>(
        conn: &C,
        rows: Vec<CampaignPerformanceActiveModel>,
    ) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        if rows.is_empty() {
            return Ok(());
        }
        CampaignPerformanceEntity::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }

    pub async fn insert_model_performance<C>(
        conn: &C,
        rows: Vec<ModelPerformanceActiveModel>,
    ) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        if rows.is_empty() {
            return Ok(());
        }
        ModelPerformanceEntity::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }
}
