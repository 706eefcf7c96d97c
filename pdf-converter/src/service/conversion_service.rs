// pdf-converter/src/service/conversion_service.rs

use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::service::converter::{DocumentConverter, PageRange};
use crate::service::scratch::{ScratchDir, ScratchPaths};
use crate::utils::error_helper::{
    classify_conversion_failure, internal_server_error, invalid_input_error,
};
use crate::utils::file_name::{converted_file_name, is_pdf_file_name};

pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const MEGABYTE: usize = 1024 * 1024;

pub const NO_OUTPUT_MESSAGE: &str = "Conversion failed - no output file generated";

/// アップロードされた変換リクエスト
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// 一時ファイル名とログに使うID（X-Request-Idと同じ値）
    pub request_id: Uuid,
    pub file_name: String,
    pub data: Vec<u8>,
    pub pages: PageRange,
}

/// 変換結果
#[derive(Debug, Clone)]
pub struct ConvertedDocument {
    pub request_id: Uuid,
    pub file_name: String,
    pub data: Vec<u8>,
}

impl ConvertedDocument {
    pub fn content_type(&self) -> &'static str {
        DOCX_MIME_TYPE
    }
}

pub struct ConversionService {
    scratch: ScratchDir,
    converter: Arc<dyn DocumentConverter>,
    max_upload_size: usize,
}

impl ConversionService {
    pub fn new(
        scratch: ScratchDir,
        converter: Arc<dyn DocumentConverter>,
        max_upload_size: usize,
    ) -> Self {
        Self {
            scratch,
            converter,
            max_upload_size,
        }
    }

    pub fn scratch(&self) -> &ScratchDir {
        &self.scratch
    }

    pub fn max_upload_size(&self) -> usize {
        self.max_upload_size
    }

    pub fn validate_file_name(&self, file_name: &str) -> AppResult<()> {
        if !is_pdf_file_name(file_name) {
            return Err(invalid_input_error(
                "Only PDF files are allowed",
                "conversion_service::validate_file_name",
            ));
        }
        Ok(())
    }

    pub fn validate_size(&self, size: usize) -> AppResult<()> {
        if size > self.max_upload_size {
            return Err(self.file_too_large_error());
        }
        Ok(())
    }

    pub fn validate_page_range(&self, pages: PageRange) -> AppResult<()> {
        if !pages.is_valid() {
            return Err(invalid_input_error(
                "Invalid page range",
                "conversion_service::validate_page_range",
            ));
        }
        Ok(())
    }

    pub fn file_too_large_error(&self) -> AppError {
        // MB単位で割り切れない上限はバイト数で示す
        let limit = if self.max_upload_size % MEGABYTE == 0 {
            format!("{}MB", self.max_upload_size / MEGABYTE)
        } else {
            format!("{} bytes", self.max_upload_size)
        };
        invalid_input_error(
            &format!("File size too large. Maximum {} allowed.", limit),
            "conversion_service::validate_size",
        )
    }

    /// PDFをDOCXに変換する
    ///
    /// 一時ファイルは成功・失敗にかかわらず削除される。
    pub async fn convert(&self, request: ConversionRequest) -> AppResult<ConvertedDocument> {
        self.validate_file_name(&request.file_name)?;
        self.validate_size(request.data.len())?;
        self.validate_page_range(request.pages)?;

        let request_id = request.request_id;
        let paths = self.scratch.paths_for(&request_id);

        let result = self.run_conversion(&request_id, &paths, &request).await;

        self.scratch
            .remove_files(&[paths.input.as_path(), paths.output.as_path()])
            .await;

        let data = result?;
        let file_name = converted_file_name(&request.file_name);

        info!(
            request_id = %request_id,
            file_name = %file_name,
            size = data.len(),
            "Conversion completed"
        );

        Ok(ConvertedDocument {
            request_id,
            file_name,
            data,
        })
    }

    async fn run_conversion(
        &self,
        request_id: &Uuid,
        paths: &ScratchPaths,
        request: &ConversionRequest,
    ) -> AppResult<Vec<u8>> {
        tokio::fs::write(&paths.input, &request.data)
            .await
            .map_err(|e| {
                internal_server_error(
                    e,
                    "conversion_service::write_input",
                    "Failed to store uploaded file",
                )
            })?;

        info!(
            request_id = %request_id,
            path = %paths.input.display(),
            size = request.data.len(),
            "Saved PDF file"
        );

        if let Err(e) = self
            .converter
            .convert(&paths.input, &paths.output, request.pages)
            .await
        {
            error!(request_id = %request_id, error = %e, "Conversion error");
            return Err(classify_conversion_failure(&e.to_string()));
        }

        let exists = tokio::fs::try_exists(&paths.output).await.unwrap_or(false);
        if !exists {
            error!(
                request_id = %request_id,
                path = %paths.output.display(),
                "Converter produced no output file"
            );
            return Err(AppError::ConversionFailure(NO_OUTPUT_MESSAGE.to_string()));
        }

        tokio::fs::read(&paths.output).await.map_err(|e| {
            internal_server_error(
                e,
                "conversion_service::read_output",
                "Failed to read converted file",
            )
        })
    }
}
