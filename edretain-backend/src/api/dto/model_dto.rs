// edretain-backend/src/api/dto/model_dto.rs

use crate::domain::distribution::MetricDelta;
use crate::domain::model_performance_metrics_model;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

/// 性能指標の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelMetric {
    Accuracy,
    Precision,
    Recall,
    AucRoc,
}

impl ModelMetric {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Accuracy => "accuracy",
            Self::Precision => "precision",
            Self::Recall => "recall",
            Self::AucRoc => "auc_roc",
        }
    }

    /// AUCは比率のまま、それ以外は百分率で返す
    pub fn scale(&self) -> f64 {
        match self {
            Self::AucRoc => 1.0,
            _ => 100.0,
        }
    }

    pub fn value_of(&self, row: &model_performance_metrics_model::Model) -> Option<f64> {
        match self {
            Self::Accuracy => row.accuracy,
            Self::Precision => row.precision,
            Self::Recall => row.recall,
            Self::AucRoc => row.auc_roc,
        }
    }
}

/// `{current_<metric>, <metric>_change, has_previous}` 形式のレスポンス
#[derive(Debug, Clone, PartialEq)]
pub struct ModelMetricDto {
    pub metric: ModelMetric,
    pub model_type: String,
    pub delta: MetricDelta,
    pub has_previous: bool,
}

impl Serialize for ModelMetricDto {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let key = self.metric.key();
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("model_type", &self.model_type)?;
        map.serialize_entry(&format!("current_{}", key), &self.delta.current)?;
        map.serialize_entry(&format!("{}_change", key), &self.delta.change)?;
        map.serialize_entry("has_previous", &self.has_previous)?;
        map.end()
    }
}

#[derive(Debug, Clone, serde::Serialize, Deserialize)]
pub struct FeatureImportanceDto {
    pub feature_name: String,
    pub importance_score: f64,
}

#[derive(Debug, Clone, serde::Serialize, Deserialize)]
pub struct SegmentRetentionDto {
    pub segment: String,
    pub retention_probability_pct: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_serializes_with_dynamic_keys() {
        let dto = ModelMetricDto {
            metric: ModelMetric::Accuracy,
            model_type: "churn_prediction".to_string(),
            delta: MetricDelta {
                current: Some(87.0),
                change: None,
            },
            has_previous: false,
        };

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["current_accuracy"], 87.0);
        assert!(json["accuracy_change"].is_null());
        assert_eq!(json["has_previous"], false);
    }

    #[test]
    fn test_auc_is_not_scaled() {
        assert_eq!(ModelMetric::AucRoc.scale(), 1.0);
        assert_eq!(ModelMetric::Recall.scale(), 100.0);
    }
}
