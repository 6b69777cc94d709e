// edretain-backend/src/service/dashboard_service.rs

use crate::api::dto::common::{DateRangeQuery, DEFAULT_MODEL_TYPE};
use crate::api::dto::dashboard_dto::{
    ActivePremiumLearnersDto, AtRiskLearnersDto, AverageRetentionRateDto, ChurnFeatureDto,
    LearnerSegmentationDto, RetentionChurnPointDto,
};
use crate::domain::dashboard_metrics_model;
use crate::error::AppResult;
use crate::repository::dashboard_metrics_repository::DashboardMetricsRepository;
use crate::repository::reporting_repository::ReportingRepository;
use crate::utils::error_helper::not_found_error;
use std::sync::Arc;
use tracing::info;

/// ダッシュボードで表示する上位特徴量の件数
const TOP_FEATURE_COUNT: u64 = 5;

pub struct DashboardService {
    metrics_repo: Arc<DashboardMetricsRepository>,
    reporting_repo: Arc<ReportingRepository>,
}

impl DashboardService {
    pub fn new(
        metrics_repo: Arc<DashboardMetricsRepository>,
        reporting_repo: Arc<ReportingRepository>,
    ) -> Self {
        Self {
            metrics_repo,
            reporting_repo,
        }
    }

    /// 期間内で最新のダッシュボード指標。無ければ 404
    async fn latest_metrics(
        &self,
        range: &DateRangeQuery,
        context: &str,
    ) -> AppResult<dashboard_metrics_model::Model> {
        let (from_key, to_key) = range.resolve_keys();
        self.metrics_repo
            .find_latest_in_range(from_key, to_key)
            .await?
            .ok_or_else(|| {
                not_found_error(
                    "Dashboard metrics",
                    &format!("{}..{}", from_key, to_key),
                    context,
                )
            })
    }

    pub async fn active_premium_learners(
        &self,
        range: &DateRangeQuery,
    ) -> AppResult<ActivePremiumLearnersDto> {
        let row = self.latest_metrics(range, "active_premium_learners").await?;
        Ok(ActivePremiumLearnersDto::from(&row))
    }

    pub async fn at_risk_learners(&self, range: &DateRangeQuery) -> AppResult<AtRiskLearnersDto> {
        let row = self.latest_metrics(range, "at_risk_learners").await?;
        Ok(AtRiskLearnersDto::from(&row))
    }

    pub async fn average_retention_rate(
        &self,
        range: &DateRangeQuery,
    ) -> AppResult<AverageRetentionRateDto> {
        let row = self.latest_metrics(range, "average_retention_rate").await?;
        Ok(AverageRetentionRateDto::from(&row))
    }

    pub async fn learner_segmentation(
        &self,
        range: &DateRangeQuery,
    ) -> AppResult<LearnerSegmentationDto> {
        let row = self.latest_metrics(range, "learner_segmentation").await?;
        Ok(LearnerSegmentationDto::from(&row))
    }

    /// 期間内の全行を暦日の昇順で返す。無ければ空
    pub async fn retention_churn_trend(
        &self,
        range: &DateRangeQuery,
    ) -> AppResult<Vec<RetentionChurnPointDto>> {
        let (from, to) = range.resolve();
        let rows = self.metrics_repo.find_trend(from, to).await?;

        info!(
            date_from = %from,
            date_to = %to,
            points = rows.len(),
            "Retention trend loaded"
        );

        Ok(rows.into_iter().map(RetentionChurnPointDto::from).collect())
    }

    pub async fn top_features_driving_churn(
        &self,
        range: &DateRangeQuery,
    ) -> AppResult<Vec<ChurnFeatureDto>> {
        let (from_key, to_key) = range.resolve_keys();
        let features = self
            .reporting_repo
            .find_feature_importance(DEFAULT_MODEL_TYPE, from_key, to_key, Some(TOP_FEATURE_COUNT))
            .await?;

        if features.is_empty() {
            return Err(not_found_error(
                "Feature importance",
                &format!("{}..{}", from_key, to_key),
                "top_features_driving_churn",
            ));
        }

        Ok(features.into_iter().map(ChurnFeatureDto::from).collect())
    }
}
