// edretain-backend/src/service/high_risk_service.rs

use crate::api::dto::high_risk_dto::{
    ChurnReasonDto, HighRiskLearnerDto, HighRiskQuery, HighRiskSummaryDto, TierChurnDto,
};
use crate::domain::campaign_intent::{suggest_action, CampaignIntent, SuggestedAction};
use crate::domain::date_key::{date_key_of, days_before, today};
use crate::domain::distribution::shares;
use crate::domain::subscription_tier::SubscriptionTier;
use crate::error::AppResult;
use crate::repository::reporting_repository::ReportingRepository;
use crate::repository::snapshot_repository::{HighRiskRow, SnapshotRepository};
use crate::utils::error_helper::internal_server_error;
use crate::utils::rounding::fraction_to_pct;
use std::sync::Arc;
use tracing::info;

/// 「新規」高リスクの比較対象（何日前の状態と比べるか）
const NEW_HIGH_RISK_LOOKBACK_DAYS: i64 = 7;

fn canonical_tier(tier: Option<&str>) -> Option<String> {
    tier.and_then(SubscriptionTier::from_str)
        .map(|t| t.as_str().to_string())
}

pub struct HighRiskService {
    snapshot_repo: Arc<SnapshotRepository>,
    reporting_repo: Arc<ReportingRepository>,
}

impl HighRiskService {
    pub fn new(
        snapshot_repo: Arc<SnapshotRepository>,
        reporting_repo: Arc<ReportingRepository>,
    ) -> Self {
        Self {
            snapshot_repo,
            reporting_repo,
        }
    }

    pub async fn summary(&self, query: &HighRiskQuery) -> AppResult<HighRiskSummaryDto> {
        let now = today();
        let counts = self
            .snapshot_repo
            .count_high_risk(
                date_key_of(now),
                days_before(now, NEW_HIGH_RISK_LOOKBACK_DAYS),
                query.risk_threshold,
                canonical_tier(query.subscription_tier.as_deref()),
            )
            .await?;

        Ok(HighRiskSummaryDto {
            total_high_risk_learners: counts.total,
            new_high_risk_recent: counts.new_recent,
        })
    }

    pub async fn learners(&self, query: &HighRiskQuery) -> AppResult<Vec<HighRiskLearnerDto>> {
        let rows = self
            .snapshot_repo
            .find_high_risk(
                date_key_of(today()),
                query.risk_threshold,
                canonical_tier(query.subscription_tier.as_deref()),
            )
            .await?;

        info!(
            risk_threshold = query.risk_threshold,
            subscription_tier = ?query.subscription_tier,
            learners = rows.len(),
            "High-risk learners loaded"
        );

        rows.into_iter().map(to_learner_dto).collect()
    }

    pub async fn reasons_for_churn(&self) -> AppResult<Vec<ChurnReasonDto>> {
        let rows = self
            .reporting_repo
            .find_latest_churn_reasons(date_key_of(today()))
            .await?;
        Ok(rows.into_iter().map(ChurnReasonDto::from).collect())
    }

    /// 閾値以上のユーザーのティア別件数と割合
    pub async fn churn_by_tier(&self, query: &HighRiskQuery) -> AppResult<Vec<TierChurnDto>> {
        let rows = self
            .snapshot_repo
            .count_by_tier(
                date_key_of(today()),
                query.risk_threshold,
                canonical_tier(query.subscription_tier.as_deref()),
            )
            .await?;

        Ok(shares(rows.into_iter().map(|r| (r.tier, r.count)).collect())
            .into_iter()
            .map(TierChurnDto::from)
            .collect())
    }
}

fn to_learner_dto(row: HighRiskRow) -> AppResult<HighRiskLearnerDto> {
    let intent = CampaignIntent::for_segment(Some(&row.segment));
    let suggested_action: SuggestedAction = suggest_action(row.user_key, intent).ok_or_else(|| {
        internal_server_error(
            format!("no action configured for {}", intent.as_str()),
            "high_risk_learners",
            "Failed to resolve suggested action",
        )
    })?;

    Ok(HighRiskLearnerDto {
        name: row.user_id_nk,
        segment: row.segment,
        days_inactive: row.days_since_last_login,
        churn_probability: fraction_to_pct(row.churn_probability),
        suggested_action,
    })
}
