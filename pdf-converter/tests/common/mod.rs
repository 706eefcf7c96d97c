pub mod mock_converter;

use std::sync::Once;

// テスト環境の初期化を一度だけ実行
static INIT: Once = Once::new();

/// テスト環境を初期化
pub fn init_test_env() {
    INIT.call_once(|| {
        // .env.testファイルから環境変数を読み込む
        if std::path::Path::new(".env.test").exists() {
            dotenvy::from_filename(".env.test").ok();
        } else if std::path::Path::new("../.env.test").exists() {
            // pdf-converterディレクトリから実行される場合
            dotenvy::from_filename("../.env.test").ok();
        }

        // テスト用のログ設定
        let _ = tracing_subscriber::fmt()
            .with_env_filter("pdf_converter=debug,tower_http=debug")
            .with_test_writer()
            .try_init();
    });
}
