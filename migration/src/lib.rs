// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// ディメンションテーブル
mod m20250901_000001_create_dim_subscription_plan_table;
mod m20250901_000002_create_dim_date_table;
mod m20250901_000003_create_dim_user_table;
mod m20250901_000004_create_dim_campaign_table;
mod m20250901_000005_create_dim_channel_table;

// ファクトテーブル
mod m20250902_000001_create_fact_user_daily_activity_table;
mod m20250902_000002_create_fact_campaign_interaction_table;
mod m20250902_000003_create_fact_user_analytics_snapshot_table;

// レポーティング用ファクト
mod m20250910_000001_create_feature_importance_table;
mod m20250910_000002_create_dashboard_metrics_table;
mod m20250910_000003_create_churn_reasons_table;
mod m20250910_000004_create_campaign_performance_table;
mod m20250910_000005_create_model_performance_metrics_table;

// 最新行解決用インデックス
mod m20250915_000001_add_latest_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. 依存関係のないディメンション
            Box::new(m20250901_000001_create_dim_subscription_plan_table::Migration),
            Box::new(m20250901_000002_create_dim_date_table::Migration),
            Box::new(m20250901_000005_create_dim_channel_table::Migration),
            // 2. 他ディメンションを参照するディメンション
            Box::new(m20250901_000003_create_dim_user_table::Migration),
            Box::new(m20250901_000004_create_dim_campaign_table::Migration),
            // 3. ファクト
            Box::new(m20250902_000001_create_fact_user_daily_activity_table::Migration),
            Box::new(m20250902_000002_create_fact_campaign_interaction_table::Migration),
            Box::new(m20250902_000003_create_fact_user_analytics_snapshot_table::Migration),
            // 4. レポーティング
            Box::new(m20250910_000001_create_feature_importance_table::Migration),
            Box::new(m20250910_000002_create_dashboard_metrics_table::Migration),
            Box::new(m20250910_000003_create_churn_reasons_table::Migration),
            Box::new(m20250910_000004_create_campaign_performance_table::Migration),
            Box::new(m20250910_000005_create_model_performance_metrics_table::Migration),
            // 5. インデックス
            Box::new(m20250915_000001_add_latest_lookup_indexes::Migration),
        ]
    }
}
