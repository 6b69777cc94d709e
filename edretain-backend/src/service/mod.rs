// src/service/mod.rs
pub mod campaign_service;
pub mod dashboard_service;
pub mod high_risk_service;
pub mod learner_service;
pub mod model_service;
pub mod seed_service;
pub mod snapshot_scoring_service;
pub mod warehouse_service;
