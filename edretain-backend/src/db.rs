// src/db.rs
use crate::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;

pub type DbPool = DatabaseConnection;

/// 設定からコネクションプールを作成する
pub async fn create_db_pool(config: &DatabaseConfig) -> Result<DbPool, DbErr> {
    let mut opt = ConnectOptions::new(config.url.clone());

    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(60))
        .max_lifetime(Duration::from_secs(30 * 60))
        .sqlx_logging(false);

    Database::connect(opt).await
}

// ヘルスチェック用
pub async fn ping(db: &DbPool) -> Result<(), DbErr> {
    db.ping().await
}
