// edretain-backend/src/api/dto/warehouse_dto.rs

//! ディメンション・ファクトのCRUD用DTO

use crate::domain::date_key::date_from_key;
use crate::domain::fact_campaign_interaction_model::FunnelFlags;
use crate::domain::subscription_tier::SubscriptionTier;
use crate::domain::user_status::UserStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// --- カスタムバリデーション ---

pub fn validate_tier(tier: &str) -> Result<(), ValidationError> {
    if SubscriptionTier::from_str(tier).is_none() {
        let mut error = ValidationError::new("subscription_tier");
        error.message = Some("subscription_tier must be one of Free, Standard, Premium".into());
        return Err(error);
    }
    Ok(())
}

pub fn validate_status(status: &str) -> Result<(), ValidationError> {
    if UserStatus::from_str(status).is_none() {
        let mut error = ValidationError::new("current_status");
        error.message = Some(
            "current_status must be one of Active, Cancelled, Paused, Downgraded, Inactive, Churned"
                .into(),
        );
        return Err(error);
    }
    Ok(())
}

pub fn validate_date_key(key: i32) -> Result<(), ValidationError> {
    if date_from_key(key).is_none() {
        let mut error = ValidationError::new("date_key");
        error.message = Some("date key must be a valid YYYYMMDD date".into());
        return Err(error);
    }
    Ok(())
}

// --- ユーザー ---

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 50, message = "user_id_nk must be 1-50 characters"))]
    pub user_id_nk: String,
    #[validate(custom(function = "validate_date_key"))]
    pub signup_date_key: i32,
    pub birth_date: Option<NaiveDate>,
    #[validate(length(max = 20, message = "gender must not exceed 20 characters"))]
    pub gender: Option<String>,
    #[validate(length(max = 100, message = "country must not exceed 100 characters"))]
    pub country: Option<String>,
    #[validate(length(max = 100, message = "city must not exceed 100 characters"))]
    pub city: Option<String>,
    #[validate(length(max = 50, message = "user_type must not exceed 50 characters"))]
    pub user_type: Option<String>,
    #[validate(length(max = 100, message = "acquisition_channel must not exceed 100 characters"))]
    pub acquisition_channel: Option<String>,
    pub initial_plan_key: Option<i32>,
    pub is_premium_ever: Option<bool>,
    #[validate(custom(function = "validate_status"))]
    pub current_status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateUserRequest {
    pub birth_date: Option<NaiveDate>,
    #[validate(length(max = 20, message = "gender must not exceed 20 characters"))]
    pub gender: Option<String>,
    #[validate(length(max = 100, message = "country must not exceed 100 characters"))]
    pub country: Option<String>,
    #[validate(length(max = 100, message = "city must not exceed 100 characters"))]
    pub city: Option<String>,
    #[validate(length(max = 50, message = "user_type must not exceed 50 characters"))]
    pub user_type: Option<String>,
    #[validate(length(max = 100, message = "acquisition_channel must not exceed 100 characters"))]
    pub acquisition_channel: Option<String>,
    pub initial_plan_key: Option<i32>,
    pub is_premium_ever: Option<bool>,
    #[validate(custom(function = "validate_status"))]
    pub current_status: Option<String>,
}

// --- サブスクリプションプラン ---

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreatePlanRequest {
    #[validate(length(min = 1, max = 50, message = "plan_id_nk must be 1-50 characters"))]
    pub plan_id_nk: String,
    #[validate(length(min = 1, max = 100, message = "plan_name must be 1-100 characters"))]
    pub plan_name: String,
    #[validate(custom(function = "validate_tier"))]
    pub tier: String,
    #[validate(length(min = 1, max = 20, message = "billing_cycle must be 1-20 characters"))]
    pub billing_cycle: String,
    #[validate(range(min = 0.0, message = "base_price must not be negative"))]
    pub base_price: f64,
    #[validate(length(equal = 3, message = "currency must be a 3-letter code"))]
    pub currency: String,
    pub has_certificate: Option<bool>,
    pub has_mentoring: Option<bool>,
    pub has_downloads: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdatePlanRequest {
    #[validate(length(min = 1, max = 100, message = "plan_name must be 1-100 characters"))]
    pub plan_name: Option<String>,
    #[validate(custom(function = "validate_tier"))]
    pub tier: Option<String>,
    #[validate(length(min = 1, max = 20, message = "billing_cycle must be 1-20 characters"))]
    pub billing_cycle: Option<String>,
    #[validate(range(min = 0.0, message = "base_price must not be negative"))]
    pub base_price: Option<f64>,
    #[validate(length(equal = 3, message = "currency must be a 3-letter code"))]
    pub currency: Option<String>,
    pub has_certificate: Option<bool>,
    pub has_mentoring: Option<bool>,
    pub has_downloads: Option<bool>,
}

// --- 日付 ---

/// 派生列はすべて full_date から計算する
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct DateRequest {
    pub full_date: NaiveDate,
}

// --- キャンペーン・チャネル ---

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[validate(schema(function = "validate_campaign_dates"))]
pub struct CampaignRequest {
    #[validate(length(min = 1, max = 50, message = "campaign_id_nk must be 1-50 characters"))]
    pub campaign_id_nk: String,
    #[validate(length(min = 1, max = 200, message = "campaign_name must be 1-200 characters"))]
    pub campaign_name: String,
    pub campaign_type: Option<String>,
    pub target_risk_segment: Option<String>,
    pub offer_type: Option<String>,
    pub default_channel: Option<String>,
    #[validate(custom(function = "validate_date_key"))]
    pub start_date_key: Option<i32>,
    #[validate(custom(function = "validate_date_key"))]
    pub end_date_key: Option<i32>,
}

fn validate_campaign_dates(request: &CampaignRequest) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (request.start_date_key, request.end_date_key) {
        if start > end {
            let mut error = ValidationError::new("campaign_dates");
            error.message = Some("start_date_key must not be after end_date_key".into());
            return Err(error);
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ChannelRequest {
    #[validate(length(min = 1, max = 50, message = "channel_name must be 1-50 characters"))]
    pub channel_name: String,
    #[validate(length(max = 1000, message = "description must not exceed 1000 characters"))]
    pub description: Option<String>,
}

// --- ファクト ---

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateActivityRequest {
    pub user_key: i32,
    #[validate(custom(function = "validate_date_key"))]
    pub date_key: i32,
    pub subscription_plan_key: Option<i32>,
    pub campaign_key: Option<i32>,
    pub is_premium: Option<bool>,
    pub has_active_subscription: Option<bool>,
    #[validate(range(min = 0, message = "logins_count must not be negative"))]
    pub logins_count: Option<i32>,
    #[validate(range(min = 0, message = "sessions_count must not be negative"))]
    pub sessions_count: Option<i32>,
    #[validate(range(min = 0, message = "minutes_watched must not be negative"))]
    pub minutes_watched: Option<i32>,
    #[validate(range(min = 0, message = "lessons_completed must not be negative"))]
    pub lessons_completed: Option<i32>,
    #[validate(range(min = 0, message = "quizzes_attempted must not be negative"))]
    pub quizzes_attempted: Option<i32>,
    #[validate(range(min = 0, message = "distinct_courses_accessed must not be negative"))]
    pub distinct_courses_accessed: Option<i32>,
    #[validate(range(min = 0, max = 30, message = "active_days_last_30d must be between 0 and 30"))]
    pub active_days_last_30d: Option<i32>,
    #[validate(range(min = 0, message = "days_since_last_login must not be negative"))]
    pub days_since_last_login: Option<i32>,
    pub is_inactive_7d_flag: Option<bool>,
    #[validate(range(min = 0, message = "active_courses_count must not be negative"))]
    pub active_courses_count: Option<i32>,
    #[validate(range(min = 0, message = "completed_courses_total must not be negative"))]
    pub completed_courses_total: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ActivityQuery {
    pub user_key: i32,
    #[serde(default = "default_activity_limit")]
    #[validate(range(min = 1, max = 1000, message = "limit must be between 1 and 1000"))]
    pub limit: u64,
}

fn default_activity_limit() -> u64 {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[validate(schema(function = "validate_funnel"))]
pub struct CreateInteractionRequest {
    pub user_key: i32,
    pub campaign_key: i32,
    #[validate(custom(function = "validate_date_key"))]
    pub date_key: i32,
    pub channel_key: i32,
    pub sent_flag: bool,
    #[serde(default)]
    pub opened_flag: bool,
    #[serde(default)]
    pub clicked_flag: bool,
    #[serde(default)]
    pub converted_flag: bool,
    #[validate(range(min = 0, message = "time_to_conversion_days must not be negative"))]
    pub time_to_conversion_days: Option<i32>,
}

impl CreateInteractionRequest {
    pub fn funnel(&self) -> FunnelFlags {
        FunnelFlags {
            sent: self.sent_flag,
            opened: self.opened_flag,
            clicked: self.clicked_flag,
            converted: self.converted_flag,
        }
    }
}

fn validate_funnel(request: &CreateInteractionRequest) -> Result<(), ValidationError> {
    if let Some(violation) = request.funnel().first_violation() {
        let mut error = ValidationError::new("funnel");
        error.message = Some(violation.into());
        return Err(error);
    }
    Ok(())
}

// --- スナップショット取り込み ---

/// 外部で計算したスコアの取り込み
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct IngestSnapshotRequest {
    pub user_key: i32,
    #[validate(custom(function = "validate_date_key"))]
    pub snapshot_date_key: i32,
    pub subscription_plan_key: Option<i32>,
    #[validate(range(min = 0, message = "rfm_recency must not be negative"))]
    pub rfm_recency: Option<i32>,
    #[validate(range(min = 0, message = "rfm_frequency must not be negative"))]
    pub rfm_frequency: Option<i32>,
    pub rfm_monetary: Option<f64>,
    #[validate(range(min = 1, max = 5, message = "rfm_r_score must be between 1 and 5"))]
    pub rfm_r_score: Option<i32>,
    #[validate(range(min = 1, max = 5, message = "rfm_f_score must be between 1 and 5"))]
    pub rfm_f_score: Option<i32>,
    #[validate(range(min = 1, max = 5, message = "rfm_m_score must be between 1 and 5"))]
    pub rfm_m_score: Option<i32>,
    #[validate(length(max = 10, message = "rfm_segment must not exceed 10 characters"))]
    pub rfm_segment: Option<String>,
    #[validate(length(max = 100, message = "segment_label must not exceed 100 characters"))]
    pub segment_label: Option<String>,
    #[validate(length(max = 50, message = "engagement_level must not exceed 50 characters"))]
    pub engagement_level: Option<String>,
    pub kmeans_cluster: Option<i32>,
    #[validate(length(max = 100, message = "kmeans_segment_label must not exceed 100 characters"))]
    pub kmeans_segment_label: Option<String>,
    #[validate(range(min = 0.0, max = 1.0, message = "churn_probability must be between 0 and 1"))]
    pub churn_probability: Option<f64>,
    #[validate(length(max = 20, message = "churn_risk_band must not exceed 20 characters"))]
    pub churn_risk_band: Option<String>,
    #[validate(range(min = 0, message = "survival_median_time_to_downgrade must not be negative"))]
    pub survival_median_time_to_downgrade: Option<i32>,
    #[validate(range(min = 0.0, max = 1.0, message = "survival_risk_90d must be between 0 and 1"))]
    pub survival_risk_90d: Option<f64>,
    #[validate(range(min = 0.0, message = "clv_value must not be negative"))]
    pub clv_value: Option<f64>,
    #[validate(length(max = 20, message = "clv_band must not exceed 20 characters"))]
    pub clv_band: Option<String>,
    #[validate(length(max = 50, message = "model_version must not exceed 50 characters"))]
    pub model_version: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SnapshotQuery {
    pub user_key: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interaction(
        sent: bool,
        opened: bool,
        clicked: bool,
        converted: bool,
    ) -> CreateInteractionRequest {
        CreateInteractionRequest {
            user_key: 1,
            campaign_key: 1,
            date_key: 20250101,
            channel_key: 1,
            sent_flag: sent,
            opened_flag: opened,
            clicked_flag: clicked,
            converted_flag: converted,
            time_to_conversion_days: None,
        }
    }

    #[test]
    fn test_funnel_validation() {
        assert!(interaction(true, true, true, true).validate().is_ok());
        assert!(interaction(true, false, false, false).validate().is_ok());
        assert!(interaction(true, false, true, false).validate().is_err());
        assert!(interaction(false, true, false, false).validate().is_err());
    }

    #[test]
    fn test_status_and_tier_vocabulary() {
        assert!(validate_status("churned").is_ok());
        assert!(validate_status("Deleted").is_err());
        assert!(validate_tier("Premium").is_ok());
        assert!(validate_tier("Gold").is_err());
    }

    #[test]
    fn test_date_key_validation() {
        assert!(validate_date_key(20250228).is_ok());
        assert!(validate_date_key(20250230).is_err());
    }

    #[test]
    fn test_ingested_probability_bounds() {
        let mut request = IngestSnapshotRequest {
            user_key: 1,
            snapshot_date_key: 20250301,
            churn_probability: Some(0.82),
            ..Default::default()
        };
        assert!(request.validate().is_ok());

        request.churn_probability = Some(1.2);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_campaign_dates_must_be_ordered() {
        let request = CampaignRequest {
            campaign_id_nk: "CAMP_0001".to_string(),
            campaign_name: "Win back".to_string(),
            campaign_type: None,
            target_risk_segment: None,
            offer_type: None,
            default_channel: None,
            start_date_key: Some(20250301),
            end_date_key: Some(20250201),
        };
        assert!(request.validate().is_err());
    }
}
