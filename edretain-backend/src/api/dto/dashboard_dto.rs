// edretain-backend/src/api/dto/dashboard_dto.rs

use crate::domain::dashboard_metrics_model;
use crate::domain::engagement::BucketCount;
use crate::domain::feature_importance_model;
use crate::repository::dashboard_metrics_repository::TrendRow;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivePremiumLearnersDto {
    pub active_premium_learners: i32,
    pub active_premium_change_pct: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtRiskLearnersDto {
    pub at_risk_learners: i32,
    pub at_risk_change_count: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AverageRetentionRateDto {
    pub average_retention_rate: f64,
    pub retention_rate_change_pct: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionChurnPointDto {
    /// YYYY-MM-DD
    pub date: String,
    pub month_name: String,
    pub monthly_retention_rate: f64,
    pub monthly_churn_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LearnerSegmentationDto {
    pub highly_engaged: BucketCount,
    pub medium_engaged: BucketCount,
    pub at_risk: BucketCount,
    pub dormant: BucketCount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChurnFeatureDto {
    pub feature_name: String,
    pub importance_score: f64,
    pub importance_rank: i32,
}

impl From<&dashboard_metrics_model::Model> for ActivePremiumLearnersDto {
    fn from(row: &dashboard_metrics_model::Model) -> Self {
        Self {
            active_premium_learners: row.active_premium_learners,
            active_premium_change_pct: row.active_premium_change_pct,
        }
    }
}

impl From<&dashboard_metrics_model::Model> for AtRiskLearnersDto {
    fn from(row: &dashboard_metrics_model::Model) -> Self {
        Self {
            at_risk_learners: row.at_risk_learners,
            at_risk_change_count: row.at_risk_change_count,
        }
    }
}

impl From<&dashboard_metrics_model::Model> for AverageRetentionRateDto {
    fn from(row: &dashboard_metrics_model::Model) -> Self {
        Self {
            average_retention_rate: row.average_retention_rate,
            retention_rate_change_pct: row.retention_rate_change_pct,
        }
    }
}

impl From<&dashboard_metrics_model::Model> for LearnerSegmentationDto {
    fn from(row: &dashboard_metrics_model::Model) -> Self {
        Self {
            highly_engaged: BucketCount {
                count: row.highly_engaged_count,
                pct: row.highly_engaged_pct,
            },
            medium_engaged: BucketCount {
                count: row.medium_engaged_count,
                pct: row.medium_engaged_pct,
            },
            at_risk: BucketCount {
                count: row.at_risk_count,
                pct: row.at_risk_pct,
            },
            dormant: BucketCount {
                count: row.dormant_count,
                pct: row.dormant_pct,
            },
        }
    }
}

impl From<TrendRow> for RetentionChurnPointDto {
    fn from(row: TrendRow) -> Self {
        Self {
            date: row.full_date.format("%Y-%m-%d").to_string(),
            month_name: row.month_name,
            monthly_retention_rate: row.monthly_retention_rate,
            monthly_churn_rate: row.monthly_churn_rate,
        }
    }
}

impl From<feature_importance_model::Model> for ChurnFeatureDto {
    fn from(row: feature_importance_model::Model) -> Self {
        Self {
            feature_name: row.feature_name,
            importance_score: row.importance_score,
            importance_rank: row.importance_rank,
        }
    }
}
