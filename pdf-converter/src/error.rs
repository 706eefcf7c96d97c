// src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PASSWORD_PROTECTED_MESSAGE: &str =
    "PDF appears to be password protected. Please provide an unlocked PDF.";
pub const CORRUPT_INPUT_MESSAGE: &str = "PDF file appears to be corrupted or invalid.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{}", PASSWORD_PROTECTED_MESSAGE)]
    PasswordProtected,

    #[error("{}", CORRUPT_INPUT_MESSAGE)]
    CorruptInput,

    #[error("{0}")]
    ConversionFailure(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::PasswordProtected | AppError::CorruptInput => {
                StatusCode::BAD_REQUEST
            }
            AppError::ConversionFailure(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::PasswordProtected => "password_protected",
            AppError::CorruptInput => "corrupt_input",
            AppError::ConversionFailure(_) => "conversion_failure",
            AppError::InternalServerError(_) => "internal_server_error",
        }
    }
}

// axum でエラーをHTTPレスポンスに変換するための実装
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_type = self.error_type().to_string();

        let detail = match self {
            AppError::InvalidInput(message) | AppError::ConversionFailure(message) => message,
            AppError::PasswordProtected => PASSWORD_PROTECTED_MESSAGE.to_string(),
            AppError::CorruptInput => CORRUPT_INPUT_MESSAGE.to_string(),
            AppError::InternalServerError(message) => {
                // サーバーログには詳細を出し、クライアントには汎用メッセージを返す
                tracing::error!(error = %message, "Internal server error");
                "An internal server error occurred".to_string()
            }
        };

        (status, Json(ErrorResponse { detail, error_type })).into_response()
    }
}

// Result 型のエイリアス
pub type AppResult<T> = Result<T, AppError>;

/// 統一的なエラーレスポンス構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub error_type: String,
}
