//! 監査ログミドルウェア
//!
//! ログ配信ルートへの全リクエストを、認証より前に1行記録する。
//! 認証失敗や404になるリクエストも記録対象。

use crate::api::error::AppError;
use crate::audit::types::{LogEndpoint, ANONYMOUS_IDENTITY};
use crate::auth::middleware::presented_api_key;
use crate::common::ip::client_ip_label;
use crate::config::AuditFailurePolicy;
use crate::AppState;
use axum::{
    extract::{ConnectInfo, Path, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    RequestExt,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use tracing::{error, warn};

/// ルートごとの監査設定（`from_fn_with_state` に渡す）
#[derive(Clone)]
pub struct AuditRoute {
    /// アプリケーション状態
    pub app_state: AppState,
    /// 記録するエンドポイント種別
    pub endpoint: LogEndpoint,
}

/// 監査ログミドルウェア
///
/// 記録するユーザーは `userKey` ヘッダーの生の値（未指定なら `anonymous`）。
/// 書き込み失敗時の扱いは `AuditFailurePolicy` に従う。
pub async fn audit_middleware(
    State(route): State<AuditRoute>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = presented_api_key(request.headers())
        .unwrap_or(ANONYMOUS_IDENTITY)
        .to_string();
    let client_ip = client_ip_label(
        request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr),
    );
    let filename = filename_param(&mut request, route.endpoint).await;

    let result = route
        .app_state
        .audit_log_writer
        .record(&identity, &client_ip, route.endpoint, &filename)
        .await;

    if let Err(e) = result {
        match route.app_state.config.audit_failure {
            AuditFailurePolicy::Fatal => {
                error!(endpoint = %route.endpoint, "Audit logging failed, rejecting request: {}", e);
                return AppError(e).into_response();
            }
            AuditFailurePolicy::BestEffort => {
                warn!(endpoint = %route.endpoint, "Audit logging failed, continuing: {}", e);
            }
        }
    }

    next.run(request).await
}

/// `{filename}` パスパラメータをデコード済みで取り出す（無ければ空文字）
///
/// デコード結果がUTF-8でない場合は末尾のパス要素を置換文字入りで記録する。
async fn filename_param(request: &mut Request, endpoint: LogEndpoint) -> String {
    match request.extract_parts::<Path<HashMap<String, String>>>().await {
        Ok(Path(mut params)) => params.remove("filename").unwrap_or_default(),
        Err(_) if endpoint != LogEndpoint::ListLogs => request
            .uri()
            .path()
            .rsplit('/')
            .next()
            .map(percent_decode_lossy)
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

fn percent_decode_lossy(segment: &str) -> String {
    let bytes = segment.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match (bytes[i], bytes.get(i + 1), bytes.get(i + 2)) {
            (b'%', Some(&hi), Some(&lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {
                decoded.push((hex_value(hi) << 4) | hex_value(lo));
                i += 3;
            }
            (byte, _, _) => {
                decoded.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}
