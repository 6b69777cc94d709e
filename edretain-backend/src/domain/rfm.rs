// src/domain/rfm.rs

//! RFM（Recency / Frequency / Monetary）集計とクインタイルスコア

use std::collections::BTreeMap;

/// スコアリング入力となるアクティビティ1行（プランは左外部結合）
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityObservation {
    pub user_key: i32,
    pub date_key: i32,
    pub subscription_plan_key: Option<i32>,
    pub days_since_last_login: Option<i32>,
    pub active_days_last_30d: Option<i32>,
    pub base_price: Option<f64>,
}

/// ユーザーごとの集計値。全行がNULLの成分はNULLのまま
#[derive(Debug, Clone, PartialEq)]
pub struct RfmAggregate {
    pub user_key: i32,
    /// min(days_since_last_login)
    pub recency: Option<i32>,
    /// max(active_days_last_30d)
    pub frequency: Option<i32>,
    /// max(base_price)
    pub monetary: Option<f64>,
    /// 最新日のアクティビティに記録されたプラン
    pub latest_plan_key: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RfmScore {
    pub aggregate: RfmAggregate,
    pub r_score: Option<i32>,
    pub f_score: Option<i32>,
    pub m_score: Option<i32>,
    pub segment: Option<String>,
}

/// ユーザー単位に集計する（結果は user_key 昇順）
pub fn aggregate(observations: &[ActivityObservation]) -> Vec<RfmAggregate> {
    let mut by_user: BTreeMap<i32, (RfmAggregate, i32)> = BTreeMap::new();

    for row in observations {
        let (agg, latest_date) = by_user.entry(row.user_key).or_insert_with(|| {
            (
                RfmAggregate {
                    user_key: row.user_key,
                    recency: None,
                    frequency: None,
                    monetary: None,
                    latest_plan_key: None,
                },
                i32::MIN,
            )
        });

        agg.recency = min_opt(agg.recency, row.days_since_last_login);
        agg.frequency = max_opt(agg.frequency, row.active_days_last_30d);
        agg.monetary = match (agg.monetary, row.base_price) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };

        if row.date_key >= *latest_date {
            *latest_date = row.date_key;
            agg.latest_plan_key = row.subscription_plan_key;
        }
    }

    by_user.into_values().map(|(agg, _)| agg).collect()
}

fn min_opt(a: Option<i32>, b: Option<i32>) -> Option<i32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

fn max_opt(a: Option<i32>, b: Option<i32>) -> Option<i32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

/// 順位ベースのクインタイルスコア（1〜5）
///
/// `higher_is_better` のとき、自分より小さい値の数を順位とする。そうでなければ大きい値の数。
/// 同値は同じスコアになる。NULLはNULLのまま。
pub fn quintile_scores(values: &[Option<f64>], higher_is_better: bool) -> Vec<Option<i32>> {
    let mut sorted: Vec<f64> = values.iter().flatten().copied().collect();
    sorted.sort_unstable_by(f64::total_cmp);
    let n = sorted.len();

    values
        .iter()
        .map(|value| {
            let v = (*value)?;
            let rank = if higher_is_better {
                sorted.partition_point(|other| other.total_cmp(&v).is_lt())
            } else {
                n - sorted.partition_point(|other| other.total_cmp(&v).is_le())
            };
            Some(((rank * 5 / n) + 1).min(5) as i32)
        })
        .collect()
}

/// 集計値からスコアとセグメントコードを計算する
pub fn score(aggregates: Vec<RfmAggregate>) -> Vec<RfmScore> {
    let recency: Vec<Option<f64>> = aggregates
        .iter()
        .map(|a| a.recency.map(f64::from))
        .collect();
    let frequency: Vec<Option<f64>> = aggregates
        .iter()
        .map(|a| a.frequency.map(f64::from))
        .collect();
    let monetary: Vec<Option<f64>> = aggregates.iter().map(|a| a.monetary).collect();

    let r_scores = quintile_scores(&recency, false);
    let f_scores = quintile_scores(&frequency, true);
    let m_scores = quintile_scores(&monetary, true);

    aggregates
        .into_iter()
        .enumerate()
        .map(|(i, aggregate)| {
            let (r, f, m) = (r_scores[i], f_scores[i], m_scores[i]);
            RfmScore {
                aggregate,
                r_score: r,
                f_score: f,
                m_score: m,
                segment: segment_code(r, f, m),
            }
        })
        .collect()
}

/// 3成分が揃っているときの "RFM" コード（例: "545"）
pub fn segment_code(r: Option<i32>, f: Option<i32>, m: Option<i32>) -> Option<String> {
    match (r, f, m) {
        (Some(r), Some(f), Some(m)) => Some(format!("{}{}{}", r, f, m)),
        _ => None,
    }
}

/// 合計RFMスコア。NULL成分は0
pub fn total_score(r: Option<i32>, f: Option<i32>, m: Option<i32>) -> i32 {
    r.unwrap_or(0) + f.unwrap_or(0) + m.unwrap_or(0)
}
