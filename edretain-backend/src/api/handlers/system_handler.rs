// edretain-backend/src/api/handlers/system_handler.rs
use crate::api::dto::common::ApiResponse;
use crate::api::AppState;
use crate::db;
use crate::error::AppResult;
use crate::utils::error_helper::internal_server_error;
use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
    pub database: String,
}

/// 生存確認とDB疎通
pub async fn health_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<ApiResponse<HealthResponse>>> {
    db::ping(&app_state.db).await.map_err(|e| {
        internal_server_error(e, "health_check", "Database is unreachable")
    })?;

    Ok(Json(ApiResponse::success(
        "Service is healthy",
        HealthResponse {
            status: "ok".to_string(),
            environment: app_state.config.environment.clone(),
            database: "connected".to_string(),
        },
    )))
}

pub fn system_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_state)
}
