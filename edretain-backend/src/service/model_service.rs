// edretain-backend/src/service/model_service.rs

//! モデル性能・特徴量重要度・ROC/生存曲線

use crate::api::dto::common::DEFAULT_MODEL_TYPE;
use crate::api::dto::model_dto::{
    FeatureImportanceDto, ModelMetric, ModelMetricDto, SegmentRetentionDto,
};
use crate::domain::curves::{roc_curve, survival_curve, RocPoint, SurvivalPoint};
use crate::domain::date_key::today_key;
use crate::domain::distribution::metric_delta;
use crate::error::AppResult;
use crate::repository::reporting_repository::ReportingRepository;
use crate::repository::snapshot_repository::{SegmentChurnRow, SnapshotRepository};
use crate::utils::error_helper::not_found_error;
use crate::utils::rounding::round2;
use std::sync::Arc;
use tracing::info;

pub struct ModelService {
    reporting_repo: Arc<ReportingRepository>,
    snapshot_repo: Arc<SnapshotRepository>,
}

impl ModelService {
    pub fn new(
        reporting_repo: Arc<ReportingRepository>,
        snapshot_repo: Arc<SnapshotRepository>,
    ) -> Self {
        Self {
            reporting_repo,
            snapshot_repo,
        }
    }

    /// 直近2件から最新値と前回比を求める。行がなければ 404
    pub async fn metric(&self, metric: ModelMetric, model_type: &str) -> AppResult<ModelMetricDto> {
        let rows = self
            .reporting_repo
            .find_recent_model_performance(model_type, today_key())
            .await?;

        let latest = rows
            .first()
            .ok_or_else(|| not_found_error("Model performance", model_type, metric.key()))?;
        let previous = rows.get(1);

        Ok(ModelMetricDto {
            metric,
            model_type: model_type.to_string(),
            delta: metric_delta(
                metric.value_of(latest),
                previous.and_then(|row| metric.value_of(row)),
                metric.scale(),
            ),
            has_previous: previous.is_some(),
        })
    }

    pub async fn feature_importance(&self) -> AppResult<Vec<FeatureImportanceDto>> {
        let rows = self
            .reporting_repo
            .find_feature_importance(DEFAULT_MODEL_TYPE, 0, today_key(), None)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| FeatureImportanceDto {
                feature_name: row.feature_name,
                importance_score: row.importance_score,
            })
            .collect())
    }

    /// 最新のAUCによる近似ROC。性能行が無いときは対角線
    pub async fn roc_curve(&self, model_type: &str) -> AppResult<Vec<RocPoint>> {
        let rows = self
            .reporting_repo
            .find_recent_model_performance(model_type, today_key())
            .await?;
        let auc = rows.first().and_then(|row| row.auc_roc);

        info!(model_type = %model_type, auc = ?auc, "ROC curve requested");
        Ok(roc_curve(auc))
    }

    pub async fn segment_retention_probability(&self) -> AppResult<Vec<SegmentRetentionDto>> {
        let rows = self
            .snapshot_repo
            .average_churn_by_segment(today_key())
            .await?;
        Ok(rows.into_iter().map(to_retention_dto).collect())
    }

    pub async fn survival_curve(&self) -> AppResult<Vec<SurvivalPoint>> {
        let mean_days = self.snapshot_repo.mean_time_to_downgrade(today_key()).await?;
        Ok(survival_curve(mean_days))
    }
}

fn to_retention_dto(row: SegmentChurnRow) -> SegmentRetentionDto {
    SegmentRetentionDto {
        segment: row.segment,
        retention_probability_pct: round2((1.0 - row.avg_churn_probability) * 100.0),
    }
}
