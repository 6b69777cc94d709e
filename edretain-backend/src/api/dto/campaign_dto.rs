// edretain-backend/src/api/dto/campaign_dto.rs

use crate::domain::campaign_performance_model;
use crate::domain::date_key::format_date_key;
use crate::utils::rounding::fraction_to_pct;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignOverviewDto {
    pub campaign: String,
    pub target_segment: Option<String>,
    /// YYYY-MM-DD
    pub launch_date: Option<String>,
    pub open_rate_pct: f64,
    pub retention_lift_pct: f64,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignComparisonDto {
    pub campaign: String,
    pub churn_rate_pct: Option<f64>,
    pub retention_lift_pct: f64,
}

impl From<&campaign_performance_model::Model> for CampaignOverviewDto {
    fn from(row: &campaign_performance_model::Model) -> Self {
        Self {
            campaign: row.campaign_name.clone(),
            target_segment: row.target_segment.clone(),
            launch_date: row.launch_date.and_then(format_date_key),
            open_rate_pct: fraction_to_pct(row.open_rate),
            retention_lift_pct: fraction_to_pct(row.retention_lift),
            status: row.status.clone(),
        }
    }
}

impl From<&campaign_performance_model::Model> for CampaignComparisonDto {
    fn from(row: &campaign_performance_model::Model) -> Self {
        Self {
            campaign: row.campaign_name.clone(),
            churn_rate_pct: row.campaign_churn_rate.map(fraction_to_pct),
            retention_lift_pct: fraction_to_pct(row.retention_lift),
        }
    }
}
