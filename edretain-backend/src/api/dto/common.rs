// edretain-backend/src/api/dto/common.rs

use crate::domain::date_key::{date_key_of, today};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 統一API成功レスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

/// 削除などデータを返さない操作の結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult {
    pub success: bool,
    pub message: String,
}

impl OperationResult {
    pub fn deleted(resource: &str, key: i32) -> Self {
        Self {
            success: true,
            message: format!("{} {} deleted", resource, key),
        }
    }
}

/// オフセット方式の一覧取得パラメータ
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct PaginationQuery {
    #[serde(default)]
    #[validate(range(min = 0, message = "offset must not be negative"))]
    pub offset: i64,
    #[serde(default = "default_page_limit")]
    #[validate(range(min = 1, max = 1000, message = "limit must be between 1 and 1000"))]
    pub limit: i64,
}

fn default_page_limit() -> i64 {
    100
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: default_page_limit(),
        }
    }
}

/// ダッシュボードの期間パラメータ（両端含む）
///
/// 省略時は今日までの30日間。
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[validate(schema(function = "validate_date_range"))]
pub struct DateRangeQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

const DEFAULT_RANGE_DAYS: i64 = 30;

impl DateRangeQuery {
    pub fn resolve(&self) -> (NaiveDate, NaiveDate) {
        let to = self.date_to.unwrap_or_else(today);
        let from = self
            .date_from
            .unwrap_or_else(|| to - chrono::Duration::days(DEFAULT_RANGE_DAYS));
        (from, to)
    }

    /// (開始日キー, 終了日キー)
    pub fn resolve_keys(&self) -> (i32, i32) {
        let (from, to) = self.resolve();
        (date_key_of(from), date_key_of(to))
    }
}

fn validate_date_range(query: &DateRangeQuery) -> Result<(), ValidationError> {
    let (from, to) = query.resolve();
    if from > to {
        let mut error = ValidationError::new("date_range");
        error.message = Some("date_from must not be after date_to".into());
        return Err(error);
    }
    Ok(())
}

pub const DEFAULT_MODEL_TYPE: &str = "churn_prediction";

fn default_model_type() -> String {
    DEFAULT_MODEL_TYPE.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ModelTypeQuery {
    #[serde(default = "default_model_type")]
    #[validate(length(min = 1, max = 64, message = "model_type must be 1-64 characters"))]
    pub model_type: String,
}

impl Default for ModelTypeQuery {
    fn default() -> Self {
        Self {
            model_type: default_model_type(),
        }
    }
}

pub const DEFAULT_RISK_THRESHOLD: f64 = 0.7;

pub fn default_risk_threshold() -> f64 {
    DEFAULT_RISK_THRESHOLD
}
