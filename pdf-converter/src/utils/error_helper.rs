// pdf-converter/src/utils/error_helper.rs

//! エラーハンドリングの統一化ヘルパー
//!
//! サービス層とハンドラー層で共通して使用するエラー処理パターンを提供します。

use crate::error::AppError;
use tracing::{error, warn};

// =============================================================================
// ログ付きエラー変換パターン
// =============================================================================

/// 内部サーバーエラーをログ付きで生成
///
/// # Arguments
/// * `error` - 元のエラー
/// * `context` - エラーが発生したコンテキスト
/// * `user_message` - ユーザーに表示するメッセージ
pub fn internal_server_error<E: std::fmt::Display>(
    error: E,
    context: &str,
    user_message: &str,
) -> AppError {
    error!(
        error = %error,
        context = %context,
        "Internal server error occurred"
    );
    AppError::InternalServerError(user_message.to_string())
}

/// 入力エラーをログ付きで生成
pub fn invalid_input_error(message: &str, context: &str) -> AppError {
    warn!(
        context = %context,
        message = %message,
        "Invalid input rejected"
    );
    AppError::InvalidInput(message.to_string())
}

// =============================================================================
// 変換エラーの分類
// =============================================================================

/// コンバーターのエラーメッセージからエラー種別を判定する
///
/// 外部コンバーターは構造化されたエラーを返さないため、文字列の部分一致で判定する。
/// あくまでヒューリスティックなので誤分類はあり得る。
pub fn classify_conversion_failure(message: &str) -> AppError {
    let lowered = message.to_lowercase();

    if lowered.contains("password") {
        AppError::PasswordProtected
    } else if lowered.contains("corrupt") || lowered.contains("invalid") {
        AppError::CorruptInput
    } else {
        AppError::ConversionFailure(format!("Conversion failed: {}", message))
    }
}
