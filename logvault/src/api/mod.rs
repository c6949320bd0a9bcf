//! HTTP APIルーター
//!
//! 各ログ配信ルートは監査ミドルウェアを最外層に持ち、
//! 認証ポリシーが要求する場合のみその内側でAPIキー認証を行う。

/// APIエラーレスポンス型
pub mod error;

/// ログ配信ハンドラー
pub mod logs;

use crate::audit::middleware::{audit_middleware, AuditRoute};
use crate::audit::types::LogEndpoint;
use crate::auth::middleware::api_key_auth_middleware;
use crate::AppState;
use axum::{
    handler::Handler,
    middleware,
    routing::{get, MethodRouter},
    Router,
};
use tower_http::trace::TraceLayer;

/// アプリケーションのルーターを構築
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route(
            "/logs",
            log_route(&state, LogEndpoint::ListLogs, logs::list_logs),
        )
        .route(
            "/logs/{filename}",
            log_route(&state, LogEndpoint::ReadLog, logs::read_log),
        )
        .route(
            "/logs/download/{filename}",
            log_route(&state, LogEndpoint::DownloadLog, logs::download_log),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 監査（外側）と認証（内側、ポリシー次第）を付けたGETルート
fn log_route<H, T>(state: &AppState, endpoint: LogEndpoint, handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    let mut route = get(handler);
    if state.config.auth.requires_key(endpoint) {
        route = route.layer(middleware::from_fn_with_state(
            state.clone(),
            api_key_auth_middleware,
        ));
    }

    route.layer(middleware::from_fn_with_state(
        AuditRoute {
            app_state: state.clone(),
            endpoint,
        },
        audit_middleware,
    ))
}
