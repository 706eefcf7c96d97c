// pdf-converter/src/api/handlers/conversion_handler.rs

use axum::body::Body;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{ExtensionRejection, QueryRejection};
use axum::extract::DefaultBodyLimit;
use axum::{
    extract::{Extension, Multipart, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::api::dto::PageRangeQuery;
use crate::api::AppState;
use crate::error::{AppError, AppResult};
use crate::logging::RequestContext;
use crate::service::conversion_service::{ConversionRequest, ConversionService};
use crate::service::converter::PageRange;
use crate::utils::error_helper::{internal_server_error, invalid_input_error};
use crate::utils::file_name::content_disposition;

/// multipartの境界やヘッダー分の余裕
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

const FILE_FIELD: &str = "file";

/// PDF→DOCX変換ハンドラー
pub async fn convert_pdf_to_docx_handler(
    State(app_state): State<AppState>,
    request_context: Result<Extension<RequestContext>, ExtensionRejection>,
    query: Result<Query<PageRangeQuery>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Response> {
    let service = &app_state.conversion_service;
    let request_id = request_id_from(request_context);

    let Query(query) = query.map_err(|e| {
        invalid_input_error(&e.body_text(), "conversion_handler::page_range_query")
    })?;
    let pages = PageRange::from(query);

    let mut multipart = multipart.map_err(|e| {
        invalid_input_error(&e.body_text(), "conversion_handler::multipart")
    })?;

    // multipartデータを処理
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(service, e))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        // ファイル名を取得して、読み込み前に検証する
        let file_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                invalid_input_error("File name is required", "conversion_handler::file_name")
            })?
            .to_string();
        service.validate_file_name(&file_name)?;
        service.validate_page_range(pages)?;

        if let Some(content_type) = field.content_type() {
            if content_type.parse::<mime::Mime>().ok() != Some(mime::APPLICATION_PDF) {
                debug!(
                    file_name = %file_name,
                    content_type = %content_type,
                    "Declared content type is not application/pdf"
                );
            }
        }

        // 上限を超えた時点で読み込みを打ち切る
        let mut data = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| multipart_error(service, e))?
        {
            if data.len() + chunk.len() > service.max_upload_size() {
                return Err(service.file_too_large_error());
            }
            data.extend_from_slice(&chunk);
        }

        info!(
            request_id = %request_id,
            file_name = %file_name,
            size = data.len(),
            pages = %pages,
            "Starting PDF conversion"
        );

        let document = service
            .convert(ConversionRequest {
                request_id,
                file_name,
                data,
                pages,
            })
            .await?;

        // ヘッダーを設定
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(document.content_type()),
        );
        headers.insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_str(&content_disposition(&document.file_name)).map_err(|e| {
                internal_server_error(
                    e,
                    "conversion_handler::content_disposition",
                    "Failed to build response headers",
                )
            })?,
        );

        return Ok((StatusCode::OK, headers, Body::from(document.data)).into_response());
    }

    Err(invalid_input_error(
        "No file provided",
        "conversion_handler::multipart",
    ))
}

// X-Request-Idと一時ファイル名・ログのrequest_idを揃える
fn request_id_from(context: Result<Extension<RequestContext>, ExtensionRejection>) -> Uuid {
    context
        .ok()
        .and_then(|Extension(context)| Uuid::parse_str(&context.request_id).ok())
        .unwrap_or_else(Uuid::new_v4)
}

// ボディ上限超過はサイズ超過エラーとして扱う
fn multipart_error(service: &ConversionService, error: MultipartError) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return service.file_too_large_error();
    }
    invalid_input_error(
        &format!("Failed to read multipart data: {}", error.body_text()),
        "conversion_handler::multipart",
    )
}

/// 変換関連のルーティング設定
pub fn conversion_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new().route(
        "/convert/pdf-to-docx",
        post(convert_pdf_to_docx_handler)
            // 実際のサイズ制限はハンドラー内で行う
            .layer(DefaultBodyLimit::max(
                max_upload_size.saturating_add(MULTIPART_OVERHEAD),
            )),
    )
}
