//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::common::error::VaultError;
use axum::{response::IntoResponse, Json};

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub VaultError);

impl From<VaultError> for AppError {
    fn from(err: VaultError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // 外部にはexternal_message()のみ返し、詳細はサーバーログに残す
        let status = self.0.status_code();
        if status.is_server_error() {
            tracing::error!(error_type = self.0.error_type(), "{}", self.0);
        } else {
            tracing::debug!(error_type = self.0.error_type(), "{}", self.0);
        }

        (status, Json(self.0.to_error_response())).into_response()
    }
}
