//! axumサーバー起動・シャットダウンハンドリング

use crate::common::error::VaultError;
use crate::AppState;
use std::future::Future;
use std::net::SocketAddr;
use tracing::{info, warn};

/// axumサーバーを起動し、Ctrl+C / SIGTERM で停止する
pub async fn run(state: AppState, bind_addr: &str) -> Result<(), VaultError> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| VaultError::Config(format!("Failed to bind to {}: {}", bind_addr, e)))?;

    serve(listener, state, shutdown_signal()).await
}

/// バインド済みリスナーでサーバーを実行する
///
/// `shutdown` が完了すると新規接続の受付を止め、処理中のリクエストを待って戻る。
pub async fn serve(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), VaultError> {
    let app = crate::api::create_app(state);

    if let Ok(addr) = listener.local_addr() {
        info!("logvault server listening on {}", addr);
    }

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
    .map_err(|e| VaultError::Internal(format!("Server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

/// シャットダウンシグナルを待機
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
