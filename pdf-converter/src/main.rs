// src/main.rs
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pdf_converter::api::{create_app, AppState};
use pdf_converter::config::AppConfig;
use pdf_converter::service::conversion_service::ConversionService;
use pdf_converter::service::converter::CommandConverter;
use pdf_converter::service::scratch::ScratchDir;

/// SIGTERM または Ctrl+C を待つ
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf_converter=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting PDF to DOCX Converter server...");

    // 設定を読み込む
    let app_config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded: {:?}", app_config);

    // スクラッチディレクトリを作成（存在しなければ）
    let scratch = ScratchDir::new(app_config.scratch_dir.clone());
    scratch.ensure().await?;
    tracing::info!("Scratch directory ready: {}", scratch.root().display());

    let converter = Arc::new(
        CommandConverter::from_command_line(&app_config.converter.command)
            .ok_or("CONVERTER_COMMAND must not be empty")?,
    );
    tracing::info!("Using converter program: {}", converter.program());

    let conversion_service = Arc::new(ConversionService::new(
        scratch.clone(),
        converter,
        app_config.server.max_upload_size,
    ));

    // ルーターの設定
    let app_router = create_app(AppState::new(conversion_service, &app_config));

    // サーバーの起動
    let server_addr = app_config.server_addr();
    tracing::info!("Router configured. Server listening on {}", server_addr);

    let listener = TcpListener::bind(&server_addr).await?;
    axum::serve(listener, app_router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 残っている一時ファイルを削除
    scratch.purge().await;
    tracing::info!("Server stopped");

    Ok(())
}
