//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! `VaultError`は`error_type()`と`status_code()`メソッドを提供し、
//! 構造化されたエラーレスポンスを生成できます。

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// logvault error type
#[derive(Debug, Error)]
pub enum VaultError {
    /// APIキーが未指定または未登録
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// 不正なファイル名（パストラバーサル等）
    #[error("Validation error: {0}")]
    Validation(String),

    /// Service unavailable (e.g., key store unreachable)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// 監査ログの書き込み・ローテーション失敗
    #[error("Observability failure: {0}")]
    ObservabilityFailure(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl VaultError {
    /// Returns a safe error message for external clients.
    ///
    /// Client errors carry a message that was built without filesystem paths,
    /// so it is returned as-is. Server-side errors collapse into a fixed
    /// string; the full detail is only written to the server log.
    pub fn external_message(&self) -> String {
        match self {
            Self::Unauthorized(msg) => msg.clone(),
            Self::NotFound(msg) => msg.clone(),
            Self::Validation(msg) => msg.clone(),
            Self::ServiceUnavailable(_) => "Service temporarily unavailable".to_string(),
            Self::Database(_) => "Service temporarily unavailable".to_string(),
            Self::ObservabilityFailure(_) => "Failed to record API call".to_string(),
            Self::Config(_) => "Internal server error".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Returns the error type string.
    ///
    /// - `authentication_error`: Auth failures
    /// - `not_found_error`: Resource not found
    /// - `invalid_request_error`: Bad request parameters
    /// - `service_unavailable`: Key store unavailable
    /// - `server_error`: Internal server errors
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "authentication_error",
            Self::NotFound(_) => "not_found_error",
            Self::Validation(_) => "invalid_request_error",
            Self::ServiceUnavailable(_) => "service_unavailable",
            Self::Database(_) => "service_unavailable",
            Self::ObservabilityFailure(_) => "server_error",
            Self::Config(_) => "server_error",
            Self::Internal(_) => "server_error",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::ObservabilityFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts this error to a structured error response.
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorDetail {
                message: self.external_message(),
                error_type: self.error_type().to_string(),
                code: Some(self.status_code().as_u16().to_string()),
            },
        }
    }
}

/// エラーレスポンス
///
/// ```json
/// {
///   "error": {
///     "message": "Log not found",
///     "type": "not_found_error",
///     "code": "404"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// The error details
    pub error: ErrorDetail,
}

/// エラー詳細
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    /// Human-readable error message
    pub message: String,
    /// Error type (e.g., "not_found_error", "server_error")
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error code (HTTP status as string)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Result type alias
pub type VaultResult<T> = Result<T, VaultError>;
