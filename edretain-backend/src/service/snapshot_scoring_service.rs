// edretain-backend/src/service/snapshot_scoring_service.rs

//! 日次スナップショットのスコアリング
//!
//! アクティビティからRFMを集計してユーザーごとのスナップショット行を書き込み、
//! 同じ日付のダッシュボード指標を1行追加する。

use crate::config::ScoringConfig;
use crate::db::DbPool;
use crate::domain::date_key::{date_key_of, days_before, today};
use crate::domain::dim_date_model;
use crate::domain::engagement::{
    compute_dashboard_figures, DashboardFigures, PreviousFigures, NEW_PREMIUM_WINDOW_DAYS,
};
use crate::domain::rfm::{self, RfmScore};
use crate::domain::{dashboard_metrics_model, fact_user_analytics_snapshot_model};
use crate::error::AppResult;
use crate::log_with_context;
use crate::repository::activity_repository::ActivityRepository;
use crate::repository::dashboard_metrics_repository::DashboardMetricsRepository;
use crate::repository::date_repository::DateRepository;
use crate::repository::snapshot_repository::SnapshotRepository;
use chrono::{NaiveDate, Utc};
use sea_orm::{Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// 1回あたりの upsert 件数（バインド変数の上限対策）
const UPSERT_CHUNK_SIZE: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRunSummary {
    pub snapshot_date_key: i32,
    pub users_scored: usize,
    pub rows_written: u64,
    pub dashboard_metrics_written: bool,
}

pub struct SnapshotScoringService {
    db: DbPool,
    activity_repo: Arc<ActivityRepository>,
    config: ScoringConfig,
}

impl SnapshotScoringService {
    pub fn new(db: DbPool, activity_repo: Arc<ActivityRepository>, config: ScoringConfig) -> Self {
        Self {
            db,
            activity_repo,
            config,
        }
    }

    pub async fn run_today(&self) -> AppResult<SnapshotRunSummary> {
        self.run(today()).await
    }

    /// 指定日のスナップショットを作る。同じ日の再実行はその日の行を置き換える
    pub async fn run(&self, snapshot_date: NaiveDate) -> AppResult<SnapshotRunSummary> {
        let snapshot_date_key = date_key_of(snapshot_date);
        let from_key = self.window_start(snapshot_date);

        info!(
            snapshot_date_key,
            window_start_key = from_key,
            window_days = self.config.rfm_window_days,
            "Starting snapshot scoring"
        );

        let observations = self
            .activity_repo
            .find_observations(from_key, snapshot_date_key)
            .await?;
        let scores = rfm::score(rfm::aggregate(&observations));
        let users_scored = scores.len();

        let learners = self
            .activity_repo
            .find_learner_states(snapshot_date_key)
            .await?;
        let new_premium_cutoff = days_before(snapshot_date, NEW_PREMIUM_WINDOW_DAYS);

        let txn = self.db.begin().await?;

        DateRepository::insert_if_absent(&txn, dim_date_model::Model::from_full_date(snapshot_date))
            .await?;

        let mut rows_written = 0u64;
        let rows: Vec<_> = scores
            .into_iter()
            .map(|score| self.snapshot_row(snapshot_date_key, score))
            .collect();
        for chunk in rows.chunks(UPSERT_CHUNK_SIZE) {
            rows_written += SnapshotRepository::upsert_many(&txn, chunk.to_vec()).await?;
        }

        let dashboard_metrics_written = if learners.is_empty() {
            false
        } else {
            let previous = DashboardMetricsRepository::find_latest_before(&txn, snapshot_date_key)
                .await?
                .map(|row| PreviousFigures {
                    active_premium_learners: row.active_premium_learners,
                    at_risk_learners: row.at_risk_learners,
                    average_retention_rate: row.average_retention_rate,
                });
            let figures = compute_dashboard_figures(
                &learners,
                snapshot_date_key,
                new_premium_cutoff,
                previous,
            );
            DashboardMetricsRepository::insert(&txn, dashboard_row(snapshot_date_key, figures))
                .await?;
            true
        };

        txn.commit().await?;

        log_with_context!(
            tracing::Level::INFO,
            "Snapshot scoring completed",
            "snapshot_date_key" => snapshot_date_key,
            "users_scored" => users_scored,
            "rows_written" => rows_written,
            "learners" => learners.len()
        );

        Ok(SnapshotRunSummary {
            snapshot_date_key,
            users_scored,
            rows_written,
            dashboard_metrics_written,
        })
    }

    /// 集計対象の開始日キー。0日なら全期間
    fn window_start(&self, snapshot_date: NaiveDate) -> i32 {
        match self.config.rfm_window_days {
            0 => 0,
            days => days_before(snapshot_date, i64::from(days) - 1),
        }
    }

    /// 未計算のスコアは明示的に NULL を書く（upsert で前回値を残さない）
    fn snapshot_row(
        &self,
        snapshot_date_key: i32,
        score: RfmScore,
    ) -> fact_user_analytics_snapshot_model::ActiveModel {
        fact_user_analytics_snapshot_model::ActiveModel {
            user_key: Set(score.aggregate.user_key),
            snapshot_date_key: Set(snapshot_date_key),
            subscription_plan_key: Set(score.aggregate.latest_plan_key),
            rfm_recency: Set(score.aggregate.recency),
            rfm_frequency: Set(score.aggregate.frequency),
            rfm_monetary: Set(score.aggregate.monetary),
            rfm_r_score: Set(score.r_score),
            rfm_f_score: Set(score.f_score),
            rfm_m_score: Set(score.m_score),
            rfm_segment: Set(score.segment),
            segment_label: Set(None),
            engagement_level: Set(None),
            kmeans_cluster: Set(None),
            kmeans_segment_label: Set(None),
            churn_probability: Set(None),
            churn_risk_band: Set(None),
            survival_median_time_to_downgrade: Set(None),
            survival_risk_90d: Set(None),
            clv_value: Set(None),
            clv_band: Set(None),
            model_version: Set(Some(self.config.model_version.clone())),
            ..Default::default()
        }
    }
}

fn dashboard_row(
    snapshot_date_key: i32,
    figures: DashboardFigures,
) -> dashboard_metrics_model::ActiveModel {
    dashboard_metrics_model::ActiveModel {
        snapshot_date_key: Set(snapshot_date_key),
        active_premium_learners: Set(figures.active_premium_learners),
        at_risk_learners: Set(figures.at_risk_learners),
        average_retention_rate: Set(figures.average_retention_rate),
        total_premium_learners: Set(figures.total_premium_learners),
        churned_learners: Set(figures.churned_learners),
        new_premium_learners: Set(figures.new_premium_learners),
        active_premium_change_pct: Set(figures.active_premium_change_pct),
        at_risk_change_count: Set(figures.at_risk_change_count),
        retention_rate_change_pct: Set(figures.retention_rate_change_pct),
        monthly_retention_rate: Set(figures.monthly_retention_rate),
        monthly_churn_rate: Set(figures.monthly_churn_rate),
        highly_engaged_count: Set(figures.highly_engaged.count),
        highly_engaged_pct: Set(figures.highly_engaged.pct),
        medium_engaged_count: Set(figures.medium_engaged.count),
        medium_engaged_pct: Set(figures.medium_engaged.pct),
        at_risk_count: Set(figures.at_risk.count),
        at_risk_pct: Set(figures.at_risk.pct),
        dormant_count: Set(figures.dormant.count),
        dormant_pct: Set(figures.dormant.pct),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
}
