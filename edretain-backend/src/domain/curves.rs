// src/domain/curves.rs

//! 要約統計量から求める ROC / 生存曲線の近似

use serde::Serialize;

const ROC_STEPS: usize = 10;
const SURVIVAL_STEP_MONTHS: i32 = 3;
const SURVIVAL_MAX_MONTHS: i32 = 24;
/// 平均日数が得られないときの中央値（日）
pub const FALLBACK_MEDIAN_DAYS: f64 = 180.0;
const DAYS_PER_MONTH: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RocPoint {
    pub fpr: f64,
    pub tpr: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurvivalPoint {
    pub months: i32,
    pub survival_rate_pct: f64,
}

/// fpr = 0.0, 0.1, … 1.0 の11点
///
/// tpr = clamp(sqrt(fpr) * (2 * AUC - 1 + 1), 0, 1)。AUCがなければ対角線。
pub fn roc_curve(auc: Option<f64>) -> Vec<RocPoint> {
    (0..=ROC_STEPS)
        .map(|i| {
            let fpr = i as f64 / ROC_STEPS as f64;
            let tpr = match auc {
                Some(auc) => (fpr.sqrt() * (2.0 * auc - 1.0 + 1.0)).clamp(0.0, 1.0),
                None => fpr,
            };
            RocPoint { fpr, tpr }
        })
        .collect()
}

/// 月 0, 3, … 24 の9点
///
/// S(m) = 0.5^(m / median_months)、median_months = 平均日数 / 30。
/// 平均がない、または0以下のときは180日を使う。
pub fn survival_curve(mean_days_to_downgrade: Option<f64>) -> Vec<SurvivalPoint> {
    let median_days = mean_days_to_downgrade
        .filter(|d| d.is_finite() && *d > 0.0)
        .unwrap_or(FALLBACK_MEDIAN_DAYS);
    let median_months = median_days / DAYS_PER_MONTH;

    (0..=SURVIVAL_MAX_MONTHS)
        .step_by(SURVIVAL_STEP_MONTHS as usize)
        .map(|months| {
            let rate = 0.5_f64
                .powf(f64::from(months) / median_months)
                .clamp(0.0, 1.0);
            SurvivalPoint {
                months,
                survival_rate_pct: rate * 100.0,
            }
        })
        .collect()
}
