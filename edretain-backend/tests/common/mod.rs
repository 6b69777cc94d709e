// tests/common/mod.rs
pub mod app_helper;
pub mod db;
pub mod test_data;

use std::sync::Once;

// テスト環境の初期化を一度だけ実行
static INIT: Once = Once::new();

/// テスト環境を初期化
pub fn init_test_env() {
    INIT.call_once(|| {
        if std::path::Path::new(".env.test").exists() {
            dotenvy::from_filename(".env.test").ok();
        } else if std::path::Path::new("../.env.test").exists() {
            // edretain-backendディレクトリから実行される場合
            dotenvy::from_filename("../.env.test").ok();
        }

        // テスト用のログ設定
        let _ = tracing_subscriber::fmt()
            .with_env_filter("edretain_backend=debug,tower_http=debug")
            .with_test_writer()
            .try_init();
    });
}
