// src/main.rs
use edretain_backend::api::{create_router, AppState};
use edretain_backend::config::AppConfig;
use edretain_backend::db::create_db_pool;
use edretain_backend::domain::campaign_intent::validate_intent_table;
use edretain_backend::jobs::SnapshotScheduler;
use edretain_backend::logging::{init_tracing, inject_request_context, logging_middleware};
use edretain_backend::middleware::cors::cors_layer;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing();

    tracing::info!("Starting EdRetain analytics server...");

    // 設定を読み込む
    let app_config = AppConfig::from_env()?;
    tracing::info!(
        environment = %app_config.environment,
        addr = %app_config.server_addr(),
        "Configuration loaded"
    );

    // セグメント→施策テーブルの整合性
    validate_intent_table()?;

    // データベース接続を作成
    let db_pool = create_db_pool(&app_config.database).await?;
    tracing::info!("Database pool created successfully.");

    if app_config.database.run_migrations {
        Migrator::up(&db_pool, None).await?;
        tracing::info!("Migrations applied");
    }

    let app_state = AppState::new(db_pool.clone(), &app_config);

    // スコアリングジョブ
    let (shutdown_tx, _) = broadcast::channel::<()>(8);
    let scheduler = SnapshotScheduler::new(
        Arc::clone(&app_state.snapshot_service),
        app_config.scheduler.clone(),
        shutdown_tx.subscribe(),
    );
    let scheduler_handle = tokio::spawn(async move {
        if let Err(e) = scheduler.start().await {
            tracing::error!(error = %e, "Snapshot scheduler failed");
        }
    });

    // ルーターの設定
    let app_router = create_router(app_state)
        .layer(axum::middleware::from_fn(logging_middleware))
        .layer(axum::middleware::from_fn(inject_request_context))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&app_config.cors_allowed_origins));

    // サーバーの起動
    let listener = TcpListener::bind(app_config.server_addr()).await?;
    tracing::info!("Router configured. Server listening on {}", app_config.server_addr());

    let server = axum::serve(listener, app_router.into_make_service())
        .with_graceful_shutdown(shutdown_signal(shutdown_tx.clone()));
    if let Err(e) = server.await {
        tracing::error!(error = %e, "HTTP server crashed");
    }

    // スケジューラの終了を待ってからプールを閉じる
    let _ = shutdown_tx.send(());
    if let Err(e) = scheduler_handle.await {
        tracing::error!(error = %e, "Snapshot scheduler task panicked");
    }

    if let Err(e) = db_pool.close().await {
        tracing::error!(error = %e, "Failed to close database pool");
    }
    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal(shutdown_tx: broadcast::Sender<()>) {
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("Shutdown signal received");
    let _ = shutdown_tx.send(());
}
