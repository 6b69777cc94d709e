// src/bin/run_snapshot.rs
//! スコアリングジョブを1回だけ実行する
//!
//! 使い方: `run-snapshot [YYYY-MM-DD]`（省略時は今日）

use chrono::NaiveDate;
use edretain_backend::config::AppConfig;
use edretain_backend::db::create_db_pool;
use edretain_backend::logging::init_tracing;
use edretain_backend::repository::activity_repository::ActivityRepository;
use edretain_backend::service::snapshot_scoring_service::SnapshotScoringService;
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let snapshot_date = match env::args().nth(1) {
        Some(raw) => match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                eprintln!("Error: invalid date '{}', expected YYYY-MM-DD", raw);
                std::process::exit(2);
            }
        },
        None => None,
    };

    if let Err(e) = run(snapshot_date).await {
        eprintln!("Error running snapshot: {}", e);
        std::process::exit(1);
    }
}

async fn run(snapshot_date: Option<NaiveDate>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    let db = create_db_pool(&config.database).await?;

    let service = SnapshotScoringService::new(
        db.clone(),
        Arc::new(ActivityRepository::new(db.clone())),
        config.scoring.clone(),
    );
    let summary = match snapshot_date {
        Some(date) => service.run(date).await?,
        None => service.run_today().await?,
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    db.close().await?;
    Ok(())
}
