// src/api/dto/mod.rs
pub mod campaign_dto;
pub mod common;
pub mod dashboard_dto;
pub mod high_risk_dto;
pub mod learner_dto;
pub mod model_dto;
pub mod warehouse_dto;

// Re-export common response types
pub use common::{ApiResponse, OperationResult};
