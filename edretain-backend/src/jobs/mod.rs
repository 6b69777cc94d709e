// edretain-backend/src/jobs/mod.rs

//! 日次スナップショットの定期実行

use crate::config::SchedulerConfig;
use crate::log_with_context;
use crate::service::snapshot_scoring_service::SnapshotScoringService;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio_cron_scheduler::{Job, JobScheduler};

/// 1回のスコアリングに許す最大時間（5分）
const JOB_TIMEOUT: Duration = Duration::from_secs(300);

/// シャットダウン前に実行中のジョブを待つ時間
#[cfg(test)]
const DRAIN_TIMEOUT: Duration = Duration::from_millis(10);
#[cfg(not(test))]
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

const JOB_NAME: &str = "snapshot_scoring";

pub type SchedulerResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub struct SnapshotScheduler {
    service: Arc<SnapshotScoringService>,
    config: SchedulerConfig,
    shutdown_rx: broadcast::Receiver<()>,
}

impl SnapshotScheduler {
    pub fn new(
        service: Arc<SnapshotScoringService>,
        config: SchedulerConfig,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Self {
        Self {
            service,
            config,
            shutdown_rx,
        }
    }

    /// シャットダウン通知を受けるまでスケジューラを動かす
    pub async fn start(mut self) -> SchedulerResult<()> {
        if !self.config.enabled {
            tracing::info!("Snapshot scheduler disabled; skipping startup");
            return Ok(());
        }

        let mut scheduler = JobScheduler::new().await?;
        let job = build_job(&self.config.snapshot_cron, self.service.clone())?;
        scheduler.add(job).await?;
        scheduler.start().await?;

        tracing::info!(cron = %self.config.snapshot_cron, "Snapshot scheduler started");
        let _ = self.shutdown_rx.recv().await;

        tracing::info!(
            "Snapshot scheduler shutting down, draining for {}s",
            DRAIN_TIMEOUT.as_secs()
        );
        tokio::time::sleep(DRAIN_TIMEOUT).await;
        let _ = scheduler.shutdown().await;
        Ok(())
    }
}

/// 前回の実行が終わっていなければ今回はスキップする
fn build_job(cron: &str, service: Arc<SnapshotScoringService>) -> SchedulerResult<Job> {
    let running = Arc::new(AtomicBool::new(false));

    let job = Job::new_async(cron, move |_uuid, _lock| {
        let guard = running.clone();

        if guard
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!(
                job = JOB_NAME,
                "Skipping snapshot run: previous run still in progress"
            );
            return Box::pin(async {});
        }

        let service = service.clone();
        Box::pin(async move {
            match tokio::time::timeout(JOB_TIMEOUT, service.run_today()).await {
                Ok(Ok(summary)) => {
                    log_with_context!(
                        tracing::Level::INFO,
                        "Scheduled snapshot completed",
                        "snapshot_date_key" => summary.snapshot_date_key,
                        "users_scored" => summary.users_scored
                    );
                }
                Ok(Err(err)) => {
                    log_with_context!(
                        tracing::Level::ERROR,
                        "Scheduled snapshot failed",
                        "job" => JOB_NAME,
                        "error" => &err
                    );
                }
                Err(_) => {
                    tracing::error!(
                        job = JOB_NAME,
                        timeout_secs = JOB_TIMEOUT.as_secs(),
                        "Snapshot run timed out"
                    );
                }
            }
            guard.store(false, Ordering::SeqCst);
        })
    })?;

    Ok(job)
}
