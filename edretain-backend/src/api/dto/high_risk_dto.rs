// edretain-backend/src/api/dto/high_risk_dto.rs

use super::common::default_risk_threshold;
use crate::domain::campaign_intent::SuggestedAction;
use crate::domain::churn_reasons_model;
use crate::domain::distribution::GroupShare;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 範囲検査をすり抜ける NaN と無限大を弾く
fn validate_finite_threshold(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        let mut error = ValidationError::new("finite");
        error.message = Some("threshold must be a finite number".into());
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct HighRiskQuery {
    #[serde(default = "default_risk_threshold")]
    #[validate(
        custom(function = "validate_finite_threshold"),
        range(min = 0.0, max = 1.0, message = "risk_threshold must be between 0 and 1")
    )]
    pub risk_threshold: f64,
    #[validate(custom(function = "crate::api::dto::warehouse_dto::validate_tier"))]
    pub subscription_tier: Option<String>,
}

impl Default for HighRiskQuery {
    fn default() -> Self {
        Self {
            risk_threshold: default_risk_threshold(),
            subscription_tier: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct RiskThresholdQuery {
    #[serde(default = "default_risk_threshold")]
    #[validate(
        custom(function = "validate_finite_threshold"),
        range(min = 0.0, max = 1.0, message = "threshold must be between 0 and 1")
    )]
    pub threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighRiskSummaryDto {
    pub total_high_risk_learners: i64,
    pub new_high_risk_recent: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HighRiskLearnerDto {
    pub name: String,
    pub segment: String,
    pub days_inactive: Option<i32>,
    /// 百分率
    pub churn_probability: f64,
    pub suggested_action: SuggestedAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChurnReasonDto {
    pub reason: String,
    pub count: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierChurnDto {
    pub tier: String,
    pub count: i64,
    pub pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskCountDto {
    pub threshold: f64,
    pub count: i64,
}

impl From<churn_reasons_model::Model> for ChurnReasonDto {
    fn from(row: churn_reasons_model::Model) -> Self {
        Self {
            reason: row.reason_display_name.unwrap_or(row.reason_category),
            count: row.reason_count,
        }
    }
}

impl From<GroupShare> for TierChurnDto {
    fn from(share: GroupShare) -> Self {
        Self {
            tier: share.group,
            count: share.count,
            pct: share.pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_bounds() {
        assert!(HighRiskQuery::default().validate().is_ok());
        let invalid = HighRiskQuery {
            risk_threshold: 1.5,
            subscription_tier: None,
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_non_finite_thresholds_are_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let query = HighRiskQuery {
                risk_threshold: value,
                subscription_tier: None,
            };
            assert!(query.validate().is_err());
            assert!(RiskThresholdQuery { threshold: value }.validate().is_err());
        }
    }

    #[test]
    fn test_unknown_tier_is_rejected() {
        let invalid = HighRiskQuery {
            risk_threshold: 0.7,
            subscription_tier: Some("Platinum".to_string()),
        };
        assert!(invalid.validate().is_err());
    }
}
