// edretain-backend/src/utils/rounding.rs

/// 小数第2位で四捨五入
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 分母0を1として扱う百分率
pub fn percentage(count: i64, total: i64) -> f64 {
    let denominator = if total == 0 { 1 } else { total };
    round2(count as f64 * 100.0 / denominator as f64)
}

/// 0.0〜1.0 の比率を百分率にする
pub fn fraction_to_pct(value: f64) -> f64 {
    round2(value * 100.0)
}
