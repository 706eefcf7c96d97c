use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use crate::common::app_helper::setup_app;
use crate::common::mock_converter::MockBehavior;
use crate::common::request::{body_json, create_get_request};

#[tokio::test]
async fn test_root_returns_service_info() {
    let app = setup_app(MockBehavior::Succeed);

    let response = app.router.oneshot(create_get_request("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["service"], "PDF to DOCX Converter");
    assert_eq!(json["status"], "running");
    assert_eq!(json["version"], "1.0.0");
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_app(MockBehavior::Succeed);

    let response = app
        .router
        .oneshot(create_get_request("/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = setup_app(MockBehavior::Succeed);

    let response = app
        .router
        .oneshot(create_get_request("/health"))
        .await
        .unwrap();

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header should be set")
        .to_str()
        .unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[tokio::test]
async fn test_cors_preflight_mirrors_origin() {
    let app = setup_app(MockBehavior::Succeed);

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/convert/pdf-to-docx")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = setup_app(MockBehavior::Succeed);

    let response = app
        .router
        .oneshot(create_get_request("/convert/docx-to-pdf"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
