// tests/integration_tests.rs
//! PostgreSQL コンテナを使う統合テスト

mod common;
mod integration;
