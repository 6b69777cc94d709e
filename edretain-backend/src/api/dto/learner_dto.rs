// edretain-backend/src/api/dto/learner_dto.rs

use crate::domain::rfm::total_score;
use crate::repository::snapshot_repository::RfmCohortRow;
use crate::utils::rounding::fraction_to_pct;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct RfmAnalysisQuery {
    #[validate(length(min = 1, max = 100, message = "country must be 1-100 characters"))]
    pub country: Option<String>,
    #[validate(custom(function = "crate::api::dto::warehouse_dto::validate_tier"))]
    pub subscription_tier: Option<String>,
    #[serde(default = "default_cohort_limit")]
    #[validate(range(min = 1, max = 1000, message = "limit must be between 1 and 1000"))]
    pub limit: i64,
}

fn default_cohort_limit() -> i64 {
    100
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RfmLearnerDto {
    pub user_id: String,
    pub country: Option<String>,
    pub segment: String,
    pub rfm_score: i32,
    pub clv: Option<f64>,
    pub churn_risk_pct: Option<f64>,
    pub last_active_days_ago: Option<i32>,
}

impl From<RfmCohortRow> for RfmLearnerDto {
    fn from(row: RfmCohortRow) -> Self {
        Self {
            user_id: row.user_id_nk,
            country: row.country,
            segment: row.segment,
            rfm_score: total_score(row.rfm_r_score, row.rfm_f_score, row.rfm_m_score),
            clv: row.clv_value,
            churn_risk_pct: row.churn_probability.map(fraction_to_pct),
            last_active_days_ago: row.days_since_last_login,
        }
    }
}
