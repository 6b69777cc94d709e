// edretain-backend/src/api/handlers/dashboard_handler.rs
use crate::api::dto::common::DateRangeQuery;
use crate::api::dto::dashboard_dto::{
    ActivePremiumLearnersDto, AtRiskLearnersDto, AverageRetentionRateDto, ChurnFeatureDto,
    LearnerSegmentationDto, RetentionChurnPointDto,
};
use crate::api::AppState;
use crate::error::AppResult;
use crate::extractors::ValidatedQuery;
use axum::{extract::State, routing::get, Json, Router};

// --- KPIカード ---

pub async fn active_premium_learners_handler(
    State(app_state): State<AppState>,
    ValidatedQuery(range): ValidatedQuery<DateRangeQuery>,
) -> AppResult<Json<ActivePremiumLearnersDto>> {
    let dto = app_state
        .dashboard_service
        .active_premium_learners(&range)
        .await?;
    Ok(Json(dto))
}

pub async fn at_risk_learners_handler(
    State(app_state): State<AppState>,
    ValidatedQuery(range): ValidatedQuery<DateRangeQuery>,
) -> AppResult<Json<AtRiskLearnersDto>> {
    let dto = app_state.dashboard_service.at_risk_learners(&range).await?;
    Ok(Json(dto))
}

pub async fn average_retention_rate_handler(
    State(app_state): State<AppState>,
    ValidatedQuery(range): ValidatedQuery<DateRangeQuery>,
) -> AppResult<Json<AverageRetentionRateDto>> {
    let dto = app_state
        .dashboard_service
        .average_retention_rate(&range)
        .await?;
    Ok(Json(dto))
}

// --- チャート ---

pub async fn retention_churn_trend_handler(
    State(app_state): State<AppState>,
    ValidatedQuery(range): ValidatedQuery<DateRangeQuery>,
) -> AppResult<Json<Vec<RetentionChurnPointDto>>> {
    let points = app_state
        .dashboard_service
        .retention_churn_trend(&range)
        .await?;
    Ok(Json(points))
}

pub async fn learner_segmentation_handler(
    State(app_state): State<AppState>,
    ValidatedQuery(range): ValidatedQuery<DateRangeQuery>,
) -> AppResult<Json<LearnerSegmentationDto>> {
    let dto = app_state
        .dashboard_service
        .learner_segmentation(&range)
        .await?;
    Ok(Json(dto))
}

pub async fn top_features_driving_churn_handler(
    State(app_state): State<AppState>,
    ValidatedQuery(range): ValidatedQuery<DateRangeQuery>,
) -> AppResult<Json<Vec<ChurnFeatureDto>>> {
    let features = app_state
        .dashboard_service
        .top_features_driving_churn(&range)
        .await?;
    Ok(Json(features))
}

pub fn dashboard_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/dashboard/active-premium-learners",
            get(active_premium_learners_handler),
        )
        .route("/dashboard/at-risk-learners", get(at_risk_learners_handler))
        .route(
            "/dashboard/average-retention-rate",
            get(average_retention_rate_handler),
        )
        .route(
            "/dashboard/retention-churn-trend",
            get(retention_churn_trend_handler),
        )
        .route(
            "/dashboard/learner-segmentation",
            get(learner_segmentation_handler),
        )
        .route(
            "/dashboard/top-features-driving-churn",
            get(top_features_driving_churn_handler),
        )
        .with_state(app_state)
}
