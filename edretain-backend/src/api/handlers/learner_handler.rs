// edretain-backend/src/api/handlers/learner_handler.rs
use crate::api::dto::learner_dto::{RfmAnalysisQuery, RfmLearnerDto};
use crate::api::AppState;
use crate::error::AppResult;
use crate::extractors::ValidatedQuery;
use axum::{extract::State, routing::get, Json, Router};

pub async fn rfm_analysis_handler(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<RfmAnalysisQuery>,
) -> AppResult<Json<Vec<RfmLearnerDto>>> {
    let learners = app_state.learner_service.rfm_analysis(&query).await?;
    Ok(Json(learners))
}

pub fn learner_router(app_state: AppState) -> Router {
    Router::new()
        .route("/learners/rfm-analysis", get(rfm_analysis_handler))
        .with_state(app_state)
}
