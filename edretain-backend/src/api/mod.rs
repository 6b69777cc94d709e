// edretain-backend/src/api/mod.rs
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::repository::{
    activity_repository::ActivityRepository, campaign_repository::CampaignRepository,
    dashboard_metrics_repository::DashboardMetricsRepository, date_repository::DateRepository,
    reporting_repository::ReportingRepository, snapshot_repository::SnapshotRepository,
    subscription_plan_repository::SubscriptionPlanRepository, user_repository::UserRepository,
};
use crate::service::{
    campaign_service::CampaignService, dashboard_service::DashboardService,
    high_risk_service::HighRiskService, learner_service::LearnerService,
    model_service::ModelService, snapshot_scoring_service::SnapshotScoringService,
    warehouse_service::WarehouseService,
};
use axum::Router;
use std::sync::Arc;

pub mod dto;
pub mod handlers;

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<AppConfig>,
    pub warehouse_service: Arc<WarehouseService>,
    pub snapshot_service: Arc<SnapshotScoringService>,
    pub dashboard_service: Arc<DashboardService>,
    pub learner_service: Arc<LearnerService>,
    pub high_risk_service: Arc<HighRiskService>,
    pub campaign_service: Arc<CampaignService>,
    pub model_service: Arc<ModelService>,
}

impl AppState {
    /// プールからリポジトリとサービスを組み立てる
    pub fn new(db: DbPool, config: &AppConfig) -> Self {
        let user_repo = Arc::new(UserRepository::new(db.clone()));
        let plan_repo = Arc::new(SubscriptionPlanRepository::new(db.clone()));
        let date_repo = Arc::new(DateRepository::new(db.clone()));
        let campaign_repo = Arc::new(CampaignRepository::new(db.clone()));
        let activity_repo = Arc::new(ActivityRepository::new(db.clone()));
        let snapshot_repo = Arc::new(SnapshotRepository::new(db.clone()));
        let metrics_repo = Arc::new(DashboardMetricsRepository::new(db.clone()));
        let reporting_repo = Arc::new(ReportingRepository::new(db.clone()));

        Self {
            warehouse_service: Arc::new(WarehouseService::new(
                user_repo,
                plan_repo,
                date_repo,
                campaign_repo,
                activity_repo.clone(),
                snapshot_repo.clone(),
            )),
            snapshot_service: Arc::new(SnapshotScoringService::new(
                db.clone(),
                activity_repo,
                config.scoring.clone(),
            )),
            dashboard_service: Arc::new(DashboardService::new(
                metrics_repo,
                reporting_repo.clone(),
            )),
            learner_service: Arc::new(LearnerService::new(snapshot_repo.clone())),
            high_risk_service: Arc::new(HighRiskService::new(
                snapshot_repo.clone(),
                reporting_repo.clone(),
            )),
            campaign_service: Arc::new(CampaignService::new(reporting_repo.clone())),
            model_service: Arc::new(ModelService::new(reporting_repo, snapshot_repo)),
            config: Arc::new(config.clone()),
            db,
        }
    }
}

/// 全機能のルーターを束ねる（ミドルウェアは呼び出し側で付与する）
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .merge(handlers::dashboard_handler::dashboard_router(app_state.clone()))
        .merge(handlers::learner_handler::learner_router(app_state.clone()))
        .merge(handlers::high_risk_handler::high_risk_router(app_state.clone()))
        .merge(handlers::campaign_handler::campaign_router(app_state.clone()))
        .merge(handlers::model_handler::model_router(app_state.clone()))
        .merge(handlers::warehouse_handler::warehouse_router(app_state.clone()))
        .merge(handlers::system_handler::system_router(app_state))
}
