// src/repository/mod.rs
pub mod activity_repository;
pub mod campaign_repository;
pub mod dashboard_metrics_repository;
pub mod date_repository;
pub mod latest;
pub mod reporting_repository;
pub mod snapshot_repository;
pub mod subscription_plan_repository;
pub mod user_repository;
