// edretain-backend/src/api/handlers/campaign_handler.rs
use crate::api::dto::campaign_dto::{CampaignComparisonDto, CampaignOverviewDto};
use crate::api::AppState;
use crate::error::AppResult;
use axum::{extract::State, routing::get, Json, Router};

pub async fn overview_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<Vec<CampaignOverviewDto>>> {
    let campaigns = app_state.campaign_service.overview().await?;
    Ok(Json(campaigns))
}

pub async fn performance_comparison_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<Vec<CampaignComparisonDto>>> {
    let campaigns = app_state.campaign_service.performance_comparison().await?;
    Ok(Json(campaigns))
}

/// 静的セグメントは `/campaigns/{campaign_key}` より優先される
pub fn campaign_router(app_state: AppState) -> Router {
    Router::new()
        .route("/campaigns/overview", get(overview_handler))
        .route(
            "/campaigns/performance-comparison",
            get(performance_comparison_handler),
        )
        .with_state(app_state)
}
