// tests/integration/mod.rs

pub mod campaign_tests;
pub mod dashboard_tests;
pub mod high_risk_tests;
pub mod learner_tests;
pub mod model_tests;
pub mod scoring_tests;
pub mod seed_tests;
pub mod system_tests;
pub mod warehouse_tests;
