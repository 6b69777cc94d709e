// src/domain/distribution.rs

use crate::utils::rounding::{percentage, round2};
use serde::Serialize;

/// 区分が不明な行のラベル
pub const UNKNOWN_GROUP: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupShare {
    pub group: String,
    pub count: i64,
    pub pct: f64,
}

/// グループごとの件数から構成比を計算する（合計0は1として扱う）
pub fn shares(counts: Vec<(Option<String>, i64)>) -> Vec<GroupShare> {
    let total: i64 = counts.iter().map(|(_, c)| *c).sum();

    counts
        .into_iter()
        .map(|(group, count)| GroupShare {
            group: group.unwrap_or_else(|| UNKNOWN_GROUP.to_string()),
            count,
            pct: percentage(count, total),
        })
        .collect()
}

/// 最新値と前回値の差分
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricDelta {
    pub current: Option<f64>,
    pub change: Option<f64>,
}

/// 新しい順の値から最新値と差分を求める。前回値がなければ差分はNone
pub fn metric_delta(latest: Option<f64>, previous: Option<f64>, scale: f64) -> MetricDelta {
    let current = latest.map(|v| round2(v * scale));
    let change = match (latest, previous) {
        (Some(l), Some(p)) => Some(round2((l - p) * scale)),
        _ => None,
    };
    MetricDelta { current, change }
}
