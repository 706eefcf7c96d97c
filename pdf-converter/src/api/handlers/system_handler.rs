use axum::{routing::get, Json, Router};

use crate::api::dto::{HealthResponse, ServiceInfoResponse};
use crate::api::AppState;

pub async fn root_handler() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse::running())
}

pub async fn health_check_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

pub fn system_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check_handler))
}
