// src/api/handlers/mod.rs
pub mod campaign_handler;
pub mod dashboard_handler;
pub mod high_risk_handler;
pub mod learner_handler;
pub mod model_handler;
pub mod system_handler;
pub mod warehouse_handler;
