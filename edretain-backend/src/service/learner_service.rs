// edretain-backend/src/service/learner_service.rs

use crate::api::dto::learner_dto::{RfmAnalysisQuery, RfmLearnerDto};
use crate::domain::date_key::today_key;
use crate::domain::subscription_tier::SubscriptionTier;
use crate::error::AppResult;
use crate::repository::snapshot_repository::SnapshotRepository;
use std::sync::Arc;
use tracing::info;

pub struct LearnerService {
    snapshot_repo: Arc<SnapshotRepository>,
}

impl LearnerService {
    pub fn new(snapshot_repo: Arc<SnapshotRepository>) -> Self {
        Self { snapshot_repo }
    }

    /// 今日時点の最新スナップショットによるRFMコホート（スコア合計の降順）
    pub async fn rfm_analysis(&self, query: &RfmAnalysisQuery) -> AppResult<Vec<RfmLearnerDto>> {
        let tier = query
            .subscription_tier
            .as_deref()
            .and_then(SubscriptionTier::from_str)
            .map(|t| t.as_str().to_string());

        let rows = self
            .snapshot_repo
            .find_rfm_cohort(today_key(), query.country.clone(), tier, query.limit)
            .await?;

        info!(
            country = ?query.country,
            subscription_tier = ?query.subscription_tier,
            learners = rows.len(),
            "RFM cohort loaded"
        );

        Ok(rows.into_iter().map(RfmLearnerDto::from).collect())
    }
}
