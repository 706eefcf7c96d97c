// pdf-converter/src/api/mod.rs
use axum::http::HeaderValue;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::AppConfig;
use crate::logging::{inject_request_context, logging_middleware};
use crate::service::conversion_service::ConversionService;

pub mod dto;
pub mod handlers;

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub conversion_service: Arc<ConversionService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(conversion_service: Arc<ConversionService>, app_config: &AppConfig) -> Self {
        Self {
            conversion_service,
            config: Arc::new(app_config.clone()),
        }
    }
}

/// アプリケーション全体のルーターを構築
pub fn create_app(app_state: AppState) -> Router {
    let max_upload_size = app_state.conversion_service.max_upload_size();
    let cors = cors_layer(&app_state.config.cors_allowed_origins);

    Router::new()
        .merge(handlers::system_handler::system_routes())
        .merge(handlers::conversion_handler::conversion_routes(
            max_upload_size,
        ))
        .with_state(app_state)
        .layer(axum::middleware::from_fn(logging_middleware))
        .layer(axum::middleware::from_fn(inject_request_context))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// CORS ミドルウェア設定
///
/// `*` はリクエストのOriginをそのまま返す（credentials許可と両立させるため）。
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_origin = if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true) // Cookie送信を許可
        .max_age(std::time::Duration::from_secs(3600)) // プリフライトリクエストのキャッシュ時間
}
