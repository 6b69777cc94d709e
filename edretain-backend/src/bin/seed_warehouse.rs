// src/bin/seed_warehouse.rs
//! 合成データでウェアハウスを埋める
//!
//! 使い方: `seed-warehouse [--users N] [--days N] [--campaigns N] [--interactions N] [--seed N] [--snapshot]`

use edretain_backend::config::AppConfig;
use edretain_backend::db::create_db_pool;
use edretain_backend::logging::init_tracing;
use edretain_backend::repository::activity_repository::ActivityRepository;
use edretain_backend::service::seed_service::{SeedOptions, SeedService};
use edretain_backend::service::snapshot_scoring_service::SnapshotScoringService;
use migration::{Migrator, MigratorTrait};
use std::env;
use std::sync::Arc;

#[derive(Debug, Default)]
struct SeedArgs {
    options: SeedOptions,
    run_snapshot: bool,
}

fn parse_args(args: &[String]) -> Result<SeedArgs, String> {
    let mut parsed = SeedArgs::default();
    let mut iter = args.iter();

    while let Some(flag) = iter.next() {
        if flag == "--snapshot" {
            parsed.run_snapshot = true;
            continue;
        }

        let value = iter
            .next()
            .ok_or_else(|| format!("Missing value for {}", flag))?;
        let number = |name: &str| -> Result<u64, String> {
            value
                .parse::<u64>()
                .map_err(|_| format!("Invalid value for {}: '{}'", name, value))
        };

        match flag.as_str() {
            "--users" => parsed.options.users = number(flag.as_str())? as usize,
            "--days" => parsed.options.days = number(flag.as_str())? as u32,
            "--campaigns" => parsed.options.campaigns = number(flag.as_str())? as usize,
            "--interactions" => parsed.options.interactions = number(flag.as_str())? as usize,
            "--seed" => parsed.options.rng_seed = Some(number(flag.as_str())?),
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    if parsed.options.days == 0 {
        return Err("--days must be at least 1".to_string());
    }
    Ok(parsed)
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let parsed = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(parsed).await {
        eprintln!("Error seeding warehouse: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: SeedArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    let db = create_db_pool(&config.database).await?;
    if config.database.run_migrations {
        Migrator::up(&db, None).await?;
    }

    let summary = SeedService::new(db.clone()).seed(&args.options).await?;
    println!("\n=== Warehouse Seeded ===");
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if args.run_snapshot {
        let scoring = SnapshotScoringService::new(
            db.clone(),
            Arc::new(ActivityRepository::new(db.clone())),
            config.scoring.clone(),
        );
        let run = scoring.run_today().await?;
        println!("\n=== Snapshot Scored ===");
        println!("{}", serde_json::to_string_pretty(&run)?);
    }

    db.close().await?;
    Ok(())
}
