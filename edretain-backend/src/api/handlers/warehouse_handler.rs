// edretain-backend/src/api/handlers/warehouse_handler.rs
use crate::api::dto::common::{ApiResponse, DateRangeQuery, OperationResult, PaginationQuery};
use crate::api::dto::high_risk_dto::{RiskCountDto, RiskThresholdQuery};
use crate::api::dto::warehouse_dto::{
    ActivityQuery, CampaignRequest, ChannelRequest, CreateActivityRequest,
    CreateInteractionRequest, CreatePlanRequest, CreateUserRequest, DateRequest,
    IngestSnapshotRequest, SnapshotQuery, UpdatePlanRequest, UpdateUserRequest,
};
use crate::api::AppState;
use crate::domain::{
    dim_campaign_model, dim_channel_model, dim_date_model, dim_subscription_plan_model,
    dim_user_model, fact_campaign_interaction_model, fact_user_analytics_snapshot_model,
    fact_user_daily_activity_model,
};
use crate::error::AppResult;
use crate::extractors::{KeyPath, ValidatedJson, ValidatedQuery};
use crate::service::snapshot_scoring_service::SnapshotRunSummary;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::info;

// --- ユーザー ---

pub async fn list_users_handler(
    State(app_state): State<AppState>,
    ValidatedQuery(page): ValidatedQuery<PaginationQuery>,
) -> AppResult<Json<Vec<dim_user_model::Model>>> {
    let users = app_state
        .warehouse_service
        .list_users(page.offset as u64, page.limit as u64)
        .await?;
    Ok(Json(users))
}

pub async fn create_user_handler(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<dim_user_model::Model>)> {
    let user = app_state.warehouse_service.create_user(payload).await?;
    info!(user_key = user.user_key, user_id_nk = %user.user_id_nk, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user_handler(
    State(app_state): State<AppState>,
    KeyPath(user_key): KeyPath,
) -> AppResult<Json<dim_user_model::Model>> {
    Ok(Json(app_state.warehouse_service.get_user(user_key).await?))
}

pub async fn update_user_handler(
    State(app_state): State<AppState>,
    KeyPath(user_key): KeyPath,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<dim_user_model::Model>> {
    let user = app_state
        .warehouse_service
        .update_user(user_key, payload)
        .await?;
    Ok(Json(user))
}

pub async fn delete_user_handler(
    State(app_state): State<AppState>,
    KeyPath(user_key): KeyPath,
) -> AppResult<Json<OperationResult>> {
    app_state.warehouse_service.delete_user(user_key).await?;
    info!(user_key, "User deleted");
    Ok(Json(OperationResult::deleted("User", user_key)))
}

// --- プラン ---

pub async fn list_plans_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<Vec<dim_subscription_plan_model::Model>>> {
    Ok(Json(app_state.warehouse_service.list_plans().await?))
}

pub async fn create_plan_handler(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreatePlanRequest>,
) -> AppResult<(StatusCode, Json<dim_subscription_plan_model::Model>)> {
    let plan = app_state.warehouse_service.create_plan(payload).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

pub async fn get_plan_handler(
    State(app_state): State<AppState>,
    KeyPath(plan_key): KeyPath,
) -> AppResult<Json<dim_subscription_plan_model::Model>> {
    Ok(Json(app_state.warehouse_service.get_plan(plan_key).await?))
}

pub async fn update_plan_handler(
    State(app_state): State<AppState>,
    KeyPath(plan_key): KeyPath,
    ValidatedJson(payload): ValidatedJson<UpdatePlanRequest>,
) -> AppResult<Json<dim_subscription_plan_model::Model>> {
    let plan = app_state
        .warehouse_service
        .update_plan(plan_key, payload)
        .await?;
    Ok(Json(plan))
}

pub async fn delete_plan_handler(
    State(app_state): State<AppState>,
    KeyPath(plan_key): KeyPath,
) -> AppResult<Json<OperationResult>> {
    app_state.warehouse_service.delete_plan(plan_key).await?;
    Ok(Json(OperationResult::deleted("Subscription plan", plan_key)))
}

// --- 日付 ---

pub async fn list_dates_handler(
    State(app_state): State<AppState>,
    ValidatedQuery(range): ValidatedQuery<DateRangeQuery>,
) -> AppResult<Json<Vec<dim_date_model::Model>>> {
    let (from_key, to_key) = range.resolve_keys();
    let dates = app_state
        .warehouse_service
        .list_dates(from_key, to_key)
        .await?;
    Ok(Json(dates))
}

pub async fn create_date_handler(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<DateRequest>,
) -> AppResult<(StatusCode, Json<dim_date_model::Model>)> {
    let date = app_state.warehouse_service.create_date(payload).await?;
    Ok((StatusCode::CREATED, Json(date)))
}

pub async fn get_date_handler(
    State(app_state): State<AppState>,
    KeyPath(date_key): KeyPath,
) -> AppResult<Json<dim_date_model::Model>> {
    Ok(Json(app_state.warehouse_service.get_date(date_key).await?))
}

pub async fn update_date_handler(
    State(app_state): State<AppState>,
    KeyPath(date_key): KeyPath,
    ValidatedJson(payload): ValidatedJson<DateRequest>,
) -> AppResult<Json<dim_date_model::Model>> {
    let date = app_state
        .warehouse_service
        .update_date(date_key, payload)
        .await?;
    Ok(Json(date))
}

pub async fn delete_date_handler(
    State(app_state): State<AppState>,
    KeyPath(date_key): KeyPath,
) -> AppResult<Json<OperationResult>> {
    app_state.warehouse_service.delete_date(date_key).await?;
    Ok(Json(OperationResult::deleted("Date", date_key)))
}

// --- キャンペーン ---

pub async fn list_campaigns_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<Vec<dim_campaign_model::Model>>> {
    Ok(Json(app_state.warehouse_service.list_campaigns().await?))
}

pub async fn create_campaign_handler(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CampaignRequest>,
) -> AppResult<(StatusCode, Json<dim_campaign_model::Model>)> {
    let campaign = app_state.warehouse_service.create_campaign(payload).await?;
    Ok((StatusCode::CREATED, Json(campaign)))
}

pub async fn get_campaign_handler(
    State(app_state): State<AppState>,
    KeyPath(campaign_key): KeyPath,
) -> AppResult<Json<dim_campaign_model::Model>> {
    Ok(Json(
        app_state.warehouse_service.get_campaign(campaign_key).await?,
    ))
}

pub async fn update_campaign_handler(
    State(app_state): State<AppState>,
    KeyPath(campaign_key): KeyPath,
    ValidatedJson(payload): ValidatedJson<CampaignRequest>,
) -> AppResult<Json<dim_campaign_model::Model>> {
    let campaign = app_state
        .warehouse_service
        .update_campaign(campaign_key, payload)
        .await?;
    Ok(Json(campaign))
}

pub async fn delete_campaign_handler(
    State(app_state): State<AppState>,
    KeyPath(campaign_key): KeyPath,
) -> AppResult<Json<OperationResult>> {
    app_state
        .warehouse_service
        .delete_campaign(campaign_key)
        .await?;
    Ok(Json(OperationResult::deleted("Campaign", campaign_key)))
}

// --- チャネル ---

pub async fn list_channels_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<Vec<dim_channel_model::Model>>> {
    Ok(Json(app_state.warehouse_service.list_channels().await?))
}

pub async fn create_channel_handler(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ChannelRequest>,
) -> AppResult<(StatusCode, Json<dim_channel_model::Model>)> {
    let channel = app_state.warehouse_service.create_channel(payload).await?;
    Ok((StatusCode::CREATED, Json(channel)))
}

pub async fn get_channel_handler(
    State(app_state): State<AppState>,
    KeyPath(channel_key): KeyPath,
) -> AppResult<Json<dim_channel_model::Model>> {
    Ok(Json(
        app_state.warehouse_service.get_channel(channel_key).await?,
    ))
}

pub async fn update_channel_handler(
    State(app_state): State<AppState>,
    KeyPath(channel_key): KeyPath,
    ValidatedJson(payload): ValidatedJson<ChannelRequest>,
) -> AppResult<Json<dim_channel_model::Model>> {
    let channel = app_state
        .warehouse_service
        .update_channel(channel_key, payload)
        .await?;
    Ok(Json(channel))
}

pub async fn delete_channel_handler(
    State(app_state): State<AppState>,
    KeyPath(channel_key): KeyPath,
) -> AppResult<Json<OperationResult>> {
    app_state.warehouse_service.delete_channel(channel_key).await?;
    Ok(Json(OperationResult::deleted("Channel", channel_key)))
}

// --- ファクト ---

pub async fn create_activity_handler(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateActivityRequest>,
) -> AppResult<(StatusCode, Json<fact_user_daily_activity_model::Model>)> {
    let activity = app_state.warehouse_service.record_activity(payload).await?;
    Ok((StatusCode::CREATED, Json(activity)))
}

pub async fn list_activities_handler(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ActivityQuery>,
) -> AppResult<Json<Vec<fact_user_daily_activity_model::Model>>> {
    let activities = app_state
        .warehouse_service
        .list_activities(query.user_key, query.limit)
        .await?;
    Ok(Json(activities))
}

pub async fn create_interaction_handler(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateInteractionRequest>,
) -> AppResult<(StatusCode, Json<fact_campaign_interaction_model::Model>)> {
    let interaction = app_state
        .warehouse_service
        .record_interaction(payload)
        .await?;
    Ok((StatusCode::CREATED, Json(interaction)))
}

pub async fn ingest_snapshot_handler(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<IngestSnapshotRequest>,
) -> AppResult<(StatusCode, Json<fact_user_analytics_snapshot_model::Model>)> {
    let snapshot = app_state.warehouse_service.ingest_snapshot(payload).await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

pub async fn list_snapshots_handler(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<SnapshotQuery>,
) -> AppResult<Json<Vec<fact_user_analytics_snapshot_model::Model>>> {
    let snapshots = app_state
        .warehouse_service
        .list_snapshots(query.user_key)
        .await?;
    Ok(Json(snapshots))
}

// --- スコアリング ---

pub async fn count_risk_customers_handler(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<RiskThresholdQuery>,
) -> AppResult<Json<RiskCountDto>> {
    let count = app_state
        .warehouse_service
        .count_risk_customers(query.threshold)
        .await?;
    Ok(Json(RiskCountDto {
        threshold: query.threshold,
        count,
    }))
}

/// スコアリングジョブを同期実行する
pub async fn run_snapshot_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<ApiResponse<SnapshotRunSummary>>> {
    let summary = app_state.snapshot_service.run_today().await?;
    Ok(Json(ApiResponse::success(
        "Snapshot scoring completed",
        summary,
    )))
}

pub fn warehouse_router(app_state: AppState) -> Router {
    Router::new()
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route(
            "/users/{user_key}",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
        .route("/plans", get(list_plans_handler).post(create_plan_handler))
        .route(
            "/plans/{subscription_plan_key}",
            get(get_plan_handler)
                .put(update_plan_handler)
                .delete(delete_plan_handler),
        )
        .route("/dates", get(list_dates_handler).post(create_date_handler))
        .route(
            "/dates/{date_key}",
            get(get_date_handler)
                .put(update_date_handler)
                .delete(delete_date_handler),
        )
        .route(
            "/campaigns",
            get(list_campaigns_handler).post(create_campaign_handler),
        )
        .route(
            "/campaigns/{campaign_key}",
            get(get_campaign_handler)
                .put(update_campaign_handler)
                .delete(delete_campaign_handler),
        )
        .route(
            "/channels",
            get(list_channels_handler).post(create_channel_handler),
        )
        .route(
            "/channels/{channel_key}",
            put(update_channel_handler)
                .get(get_channel_handler)
                .delete(delete_channel_handler),
        )
        .route(
            "/activities",
            get(list_activities_handler).post(create_activity_handler),
        )
        .route("/campaign-interactions", post(create_interaction_handler))
        .route(
            "/snapshots",
            get(list_snapshots_handler).post(ingest_snapshot_handler),
        )
        .route("/snapshots/run", post(run_snapshot_handler))
        .route("/count_risk_customers", get(count_risk_customers_handler))
        .with_state(app_state)
}
