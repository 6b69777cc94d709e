// src/domain/engagement.rs

//! エンゲージメント区分とダッシュボードKPIの計算

use super::date_key::date_from_key;
use super::subscription_tier::SubscriptionTier;
use super::user_status::UserStatus;
use crate::utils::rounding::{percentage, round2};
use serde::Serialize;

const HIGHLY_ENGAGED_MAX_DAYS: i32 = 3;
const HIGHLY_ENGAGED_MIN_ACTIVE_DAYS: i32 = 15;
const MEDIUM_ENGAGED_MAX_DAYS: i32 = 7;
const AT_RISK_MAX_DAYS: i32 = 30;
/// 新規プレミアムとみなすサインアップからの日数
pub const NEW_PREMIUM_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EngagementBucket {
    HighlyEngaged,
    MediumEngaged,
    AtRisk,
    Dormant,
}

impl EngagementBucket {
    /// 最終ログインからの日数と直近30日のアクティブ日数で分類する
    pub fn classify(days_since_last_login: Option<i32>, active_days_last_30d: Option<i32>) -> Self {
        match days_since_last_login {
            Some(days)
                if days <= HIGHLY_ENGAGED_MAX_DAYS
                    && active_days_last_30d.unwrap_or(0) >= HIGHLY_ENGAGED_MIN_ACTIVE_DAYS =>
            {
                Self::HighlyEngaged
            }
            Some(days) if days <= MEDIUM_ENGAGED_MAX_DAYS => Self::MediumEngaged,
            Some(days) if days <= AT_RISK_MAX_DAYS => Self::AtRisk,
            _ => Self::Dormant,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::HighlyEngaged => "Highly Engaged",
            Self::MediumEngaged => "Medium Engaged",
            Self::AtRisk => "At-Risk",
            Self::Dormant => "Dormant",
        }
    }

    /// 直近30日以内にログインしているか
    pub fn is_retained(&self) -> bool {
        !matches!(self, Self::Dormant)
    }
}

/// 最新アクティビティ1行（ユーザー属性とプランを結合済み）
#[derive(Debug, Clone, PartialEq)]
pub struct LearnerState {
    pub user_key: i32,
    pub signup_date_key: i32,
    pub current_status: Option<String>,
    pub is_premium: Option<bool>,
    pub tier: Option<String>,
    /// この行のアクティビティ日
    pub activity_date_key: i32,
    pub days_since_last_login: Option<i32>,
    pub active_days_last_30d: Option<i32>,
}

impl LearnerState {
    /// 基準日時点の最終ログインからの日数（行の日付から基準日までの経過日数を加算）
    pub fn days_since_last_login_as_of(&self, as_of_key: i32) -> Option<i32> {
        let age = match (date_from_key(self.activity_date_key), date_from_key(as_of_key)) {
            (Some(activity), Some(as_of)) => (as_of - activity).num_days().max(0) as i32,
            _ => 0,
        };
        self.days_since_last_login.map(|days| days.saturating_add(age))
    }

    pub fn bucket(&self, as_of_key: i32) -> EngagementBucket {
        EngagementBucket::classify(
            self.days_since_last_login_as_of(as_of_key),
            self.active_days_last_30d,
        )
    }

    pub fn is_premium(&self) -> bool {
        self.is_premium.unwrap_or(false)
            || self.tier.as_deref().and_then(SubscriptionTier::from_str)
                == Some(SubscriptionTier::Premium)
    }

    pub fn is_churned(&self) -> bool {
        self.current_status
            .as_deref()
            .and_then(UserStatus::from_str)
            .is_some_and(|s| s.is_churned())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BucketCount {
    pub count: i32,
    pub pct: f64,
}

/// スナップショット日の KPI 一式（変化量は前回行との差分）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardFigures {
    pub active_premium_learners: i32,
    pub at_risk_learners: i32,
    pub average_retention_rate: f64,
    pub total_premium_learners: i32,
    pub churned_learners: i32,
    pub new_premium_learners: i32,
    pub active_premium_change_pct: Option<f64>,
    pub at_risk_change_count: Option<i32>,
    pub retention_rate_change_pct: Option<f64>,
    pub monthly_retention_rate: f64,
    pub monthly_churn_rate: f64,
    pub highly_engaged: BucketCount,
    pub medium_engaged: BucketCount,
    pub at_risk: BucketCount,
    pub dormant: BucketCount,
}

/// 前回のKPI（変化量の計算用）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviousFigures {
    pub active_premium_learners: i32,
    pub at_risk_learners: i32,
    pub average_retention_rate: f64,
}

/// 最新アクティビティの集合からKPIを計算する
///
/// - アクティブプレミアム: プレミアムかつ最終ログインが7日以内
/// - 平均継続率: 離脱状態（Cancelled / Churned）でないユーザーの割合
/// - 月次継続率: 30日以内にログインしたユーザーの割合。解約率はその残り
pub fn compute_dashboard_figures(
    learners: &[LearnerState],
    snapshot_date_key: i32,
    new_premium_cutoff_key: i32,
    previous: Option<PreviousFigures>,
) -> DashboardFigures {
    let total = learners.len() as i64;
    let mut counts = [0i64; 4];
    let mut figures = DashboardFigures::default();

    for learner in learners {
        let bucket = learner.bucket(snapshot_date_key);
        counts[bucket_index(bucket)] += 1;

        if learner.is_premium() {
            figures.total_premium_learners += 1;
            if matches!(
                bucket,
                EngagementBucket::HighlyEngaged | EngagementBucket::MediumEngaged
            ) {
                figures.active_premium_learners += 1;
            }
            if learner.signup_date_key >= new_premium_cutoff_key
                && learner.signup_date_key <= snapshot_date_key
            {
                figures.new_premium_learners += 1;
            }
        }
        if learner.is_churned() {
            figures.churned_learners += 1;
        }
    }

    let bucket_count = |i: usize| BucketCount {
        count: counts[i] as i32,
        pct: percentage(counts[i], total),
    };
    figures.highly_engaged = bucket_count(0);
    figures.medium_engaged = bucket_count(1);
    figures.at_risk = bucket_count(2);
    figures.dormant = bucket_count(3);
    figures.at_risk_learners = figures.at_risk.count;

    figures.average_retention_rate = if total == 0 {
        0.0
    } else {
        percentage(total - figures.churned_learners as i64, total)
    };
    let retained = learners
        .iter()
        .filter(|learner| learner.bucket(snapshot_date_key).is_retained())
        .count() as i64;
    figures.monthly_retention_rate = if total == 0 {
        0.0
    } else {
        percentage(retained, total)
    };
    figures.monthly_churn_rate = if total == 0 {
        0.0
    } else {
        round2(100.0 - figures.monthly_retention_rate)
    };

    if let Some(prev) = previous {
        figures.active_premium_change_pct = if prev.active_premium_learners == 0 {
            None
        } else {
            Some(round2(
                (figures.active_premium_learners - prev.active_premium_learners) as f64 * 100.0
                    / prev.active_premium_learners as f64,
            ))
        };
        figures.at_risk_change_count = Some(figures.at_risk_learners - prev.at_risk_learners);
        figures.retention_rate_change_pct = Some(round2(
            figures.average_retention_rate - prev.average_retention_rate,
        ));
    }

    figures
}

fn bucket_index(bucket: EngagementBucket) -> usize {
    match bucket {
        EngagementBucket::HighlyEngaged => 0,
        EngagementBucket::MediumEngaged => 1,
        EngagementBucket::AtRisk => 2,
        EngagementBucket::Dormant => 3,
    }
}
