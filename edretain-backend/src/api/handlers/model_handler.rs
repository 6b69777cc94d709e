// edretain-backend/src/api/handlers/model_handler.rs
use crate::api::dto::common::ModelTypeQuery;
use crate::api::dto::model_dto::{
    FeatureImportanceDto, ModelMetric, ModelMetricDto, SegmentRetentionDto,
};
use crate::api::AppState;
use crate::domain::curves::{RocPoint, SurvivalPoint};
use crate::error::AppResult;
use crate::extractors::ValidatedQuery;
use axum::{extract::State, routing::get, Json, Router};

async fn metric_response(
    app_state: &AppState,
    metric: ModelMetric,
    query: &ModelTypeQuery,
) -> AppResult<Json<ModelMetricDto>> {
    let dto = app_state
        .model_service
        .metric(metric, &query.model_type)
        .await?;
    Ok(Json(dto))
}

pub async fn accuracy_handler(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ModelTypeQuery>,
) -> AppResult<Json<ModelMetricDto>> {
    metric_response(&app_state, ModelMetric::Accuracy, &query).await
}

pub async fn precision_handler(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ModelTypeQuery>,
) -> AppResult<Json<ModelMetricDto>> {
    metric_response(&app_state, ModelMetric::Precision, &query).await
}

pub async fn recall_handler(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ModelTypeQuery>,
) -> AppResult<Json<ModelMetricDto>> {
    metric_response(&app_state, ModelMetric::Recall, &query).await
}

pub async fn auc_roc_handler(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ModelTypeQuery>,
) -> AppResult<Json<ModelMetricDto>> {
    metric_response(&app_state, ModelMetric::AucRoc, &query).await
}

pub async fn feature_importance_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<Vec<FeatureImportanceDto>>> {
    let features = app_state.model_service.feature_importance().await?;
    Ok(Json(features))
}

pub async fn roc_curve_handler(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ModelTypeQuery>,
) -> AppResult<Json<Vec<RocPoint>>> {
    let points = app_state.model_service.roc_curve(&query.model_type).await?;
    Ok(Json(points))
}

pub async fn segment_retention_probability_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<Vec<SegmentRetentionDto>>> {
    let segments = app_state
        .model_service
        .segment_retention_probability()
        .await?;
    Ok(Json(segments))
}

pub async fn survival_curve_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<Vec<SurvivalPoint>>> {
    let points = app_state.model_service.survival_curve().await?;
    Ok(Json(points))
}

pub fn model_router(app_state: AppState) -> Router {
    Router::new()
        .route("/models/accuracy", get(accuracy_handler))
        .route("/models/precision", get(precision_handler))
        .route("/models/recall", get(recall_handler))
        .route("/models/auc-roc", get(auc_roc_handler))
        .route("/models/feature-importance", get(feature_importance_handler))
        .route("/models/roc-curve", get(roc_curve_handler))
        .route(
            "/models/segment-retention-probability",
            get(segment_retention_probability_handler),
        )
        .route("/models/survival-curve", get(survival_curve_handler))
        .with_state(app_state)
}
