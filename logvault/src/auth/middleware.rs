//! 認証ミドルウェア
//!
//! `userKey` ヘッダーのAPIキーを検証し、`Identity` をrequest extensionに追加する

use crate::api::error::AppError;
use crate::auth::API_KEY_HEADER;
use crate::common::error::VaultError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// リクエストが提示したAPIキーを取り出す
///
/// ヘッダーが無い、空、またはASCIIとして読めない場合は `None`。
pub fn presented_api_key(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

/// APIキー認証ミドルウェア
///
/// # Arguments
/// * `State(app_state)` - キー検証器を持つアプリケーション状態
/// * `request` - HTTPリクエスト
/// * `next` - 次のミドルウェア/ハンドラー
///
/// # Returns
/// * `Ok(Response)` - 認証成功、requestにIdentityを追加
/// * `Err(Response)` - 認証失敗（401）またはキーストア障害（503）
pub async fn api_key_auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let api_key = presented_api_key(request.headers())
        .ok_or_else(|| {
            AppError(VaultError::Unauthorized(
                "Missing userKey header".to_string(),
            ))
            .into_response()
        })?
        .to_string();

    let identity = app_state
        .key_validator
        .validate(&api_key)
        .await
        .map_err(|e| AppError(e).into_response())?;

    tracing::debug!(login = %identity.login, "API key authenticated");
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}
