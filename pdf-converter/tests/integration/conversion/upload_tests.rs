// tests/integration/conversion/upload_tests.rs

use axum::http::{header, StatusCode};
use tower::ServiceExt;

use crate::common::app_helper::setup_app;
use crate::common::mock_converter::{MockBehavior, MOCK_DOCX_BYTES};
use crate::common::request::{
    body_bytes, create_multipart_request, create_upload_request, multipart_body, SAMPLE_PDF,
};
use pdf_converter::service::converter::PageRange;

const CONVERT_URI: &str = "/convert/pdf-to-docx";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// 正常系テスト: PDFを変換してDOCXを返す
#[tokio::test]
async fn test_convert_pdf_success() {
    // Arrange
    let app = setup_app(MockBehavior::Succeed);

    // Act
    let response = app
        .router
        .clone()
        .oneshot(create_upload_request(CONVERT_URI, "report.pdf", SAMPLE_PDF))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        DOCX_MIME
    );
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"report_converted.docx\""
    );
    assert_eq!(body_bytes(response).await, MOCK_DOCX_BYTES);

    // コンバーターにはアップロードされたバイト列がそのまま渡される
    let calls = app.converter.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].input_bytes, SAMPLE_PDF);
    assert_eq!(calls[0].pages, PageRange::new(0, None));
}

/// 正常系テスト: 拡張子の大文字小文字は区別しない
#[tokio::test]
async fn test_convert_uppercase_extension() {
    let app = setup_app(MockBehavior::Succeed);

    let response = app
        .router
        .oneshot(create_upload_request(CONVERT_URI, "Scan.PDF", SAMPLE_PDF))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"Scan_converted.docx\""
    );
}

/// 正常系テスト: 非ASCIIファイル名はfilename*で返す
#[tokio::test]
async fn test_convert_non_ascii_file_name() {
    let app = setup_app(MockBehavior::Succeed);

    let response = app
        .router
        .oneshot(create_upload_request(CONVERT_URI, "請求書.pdf", SAMPLE_PDF))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; "));
    assert!(disposition.contains("filename*=UTF-8''%E8%AB%8B%E6%B1%82%E6%9B%B8_converted.docx"));
}

/// 正常系テスト: ページ範囲クエリがコンバーターに渡される
#[tokio::test]
async fn test_convert_with_page_range() {
    let app = setup_app(MockBehavior::Succeed);

    let response = app
        .router
        .clone()
        .oneshot(create_upload_request(
            &format!("{}?start=1&end=3", CONVERT_URI),
            "report.pdf",
            SAMPLE_PDF,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.converter.calls()[0].pages, PageRange::new(1, Some(3)));
}

/// 正常系テスト: file以外のフィールドは無視される
#[tokio::test]
async fn test_extra_fields_are_ignored() {
    let app = setup_app(MockBehavior::Succeed);

    let mut body = multipart_body("note", "note.txt", b"hello", "text/plain");
    // 先頭フィールドの終端境界を取り除いて2つ目のフィールドを続ける
    let closing = format!("\r\n--{}--\r\n", crate::common::request::BOUNDARY);
    body.truncate(body.len() - closing.len());
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(&multipart_body("file", "doc.pdf", SAMPLE_PDF, "application/pdf"));

    let response = app
        .router
        .oneshot(create_multipart_request(CONVERT_URI, body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"doc_converted.docx\""
    );
}

/// 同時リクエストでスクラッチパスが衝突しない
#[tokio::test]
async fn test_concurrent_requests_use_distinct_scratch_paths() {
    let converter = crate::common::mock_converter::MockConverter::new(MockBehavior::Succeed)
        .with_delay(std::time::Duration::from_millis(50));
    let app = crate::common::app_helper::setup_app_with_converter(converter, None);

    let mut handles = Vec::new();
    for i in 0..8 {
        let router = app.router.clone();
        handles.push(tokio::spawn(async move {
            router
                .oneshot(create_upload_request(
                    CONVERT_URI,
                    &format!("file{}.pdf", i),
                    format!("%PDF-{}", i).as_bytes(),
                ))
                .await
                .unwrap()
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap().status(), StatusCode::OK);
    }

    let calls = app.converter.calls();
    assert_eq!(calls.len(), 8);
    let mut inputs: Vec<_> = calls.iter().map(|c| c.input.clone()).collect();
    let mut outputs: Vec<_> = calls.iter().map(|c| c.output.clone()).collect();
    inputs.sort();
    inputs.dedup();
    outputs.sort();
    outputs.dedup();
    assert_eq!(inputs.len(), 8);
    assert_eq!(outputs.len(), 8);

    // 各リクエストは自分のアップロード内容を受け取っている
    for call in &calls {
        assert!(call.input_bytes.starts_with(b"%PDF-"));
    }
    assert!(app.scratch_files().is_empty());
}

/// 正常系テスト: X-Request-Idと一時ファイル名のIDが一致する
#[tokio::test]
async fn test_request_id_header_matches_scratch_files() {
    let app = setup_app(MockBehavior::Succeed);

    let response = app
        .router
        .clone()
        .oneshot(create_upload_request(CONVERT_URI, "report.pdf", SAMPLE_PDF))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let request_id = response
        .headers()
        .get("x-request-id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let calls = app.converter.calls();
    assert_eq!(
        calls[0].input.file_name().unwrap().to_str().unwrap(),
        format!("{}_input.pdf", request_id)
    );
    assert_eq!(
        calls[0].output.file_name().unwrap().to_str().unwrap(),
        format!("{}_output.docx", request_id)
    );
}
