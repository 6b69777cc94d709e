// edretain-backend/src/api/handlers/high_risk_handler.rs
use crate::api::dto::high_risk_dto::{
    ChurnReasonDto, HighRiskLearnerDto, HighRiskQuery, HighRiskSummaryDto, TierChurnDto,
};
use crate::api::AppState;
use crate::error::AppResult;
use crate::extractors::ValidatedQuery;
use axum::{extract::State, routing::get, Json, Router};

pub async fn summary_handler(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<HighRiskQuery>,
) -> AppResult<Json<HighRiskSummaryDto>> {
    let summary = app_state.high_risk_service.summary(&query).await?;
    Ok(Json(summary))
}

pub async fn learners_handler(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<HighRiskQuery>,
) -> AppResult<Json<Vec<HighRiskLearnerDto>>> {
    let learners = app_state.high_risk_service.learners(&query).await?;
    Ok(Json(learners))
}

pub async fn reasons_for_churn_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<Vec<ChurnReasonDto>>> {
    let reasons = app_state.high_risk_service.reasons_for_churn().await?;
    Ok(Json(reasons))
}

pub async fn churn_by_tier_handler(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<HighRiskQuery>,
) -> AppResult<Json<Vec<TierChurnDto>>> {
    let tiers = app_state.high_risk_service.churn_by_tier(&query).await?;
    Ok(Json(tiers))
}

pub fn high_risk_router(app_state: AppState) -> Router {
    Router::new()
        .route("/high-risk/summary", get(summary_handler))
        .route("/high-risk/learners", get(learners_handler))
        .route("/high-risk/reasons-for-churn", get(reasons_for_churn_handler))
        .route("/high-risk/churn-by-tier", get(churn_by_tier_handler))
        .with_state(app_state)
}
