//! サーバー初期化ロジック
//!
//! データベース接続、マイグレーション、ディレクトリ作成、監査ライター起動など
//! サーバー起動に必要なコンポーネントの初期化を担当する。

use crate::audit::writer::{AuditLogWriter, AuditLogWriterConfig};
use crate::auth::validator::KeyValidator;
use crate::common::error::VaultError;
use crate::config::ServiceConfig;
use crate::logs::{catalog::LogCatalog, reader::LogReader};
use crate::{db, AppState};
use sqlx::sqlite::SqliteConnectOptions;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// サーバー初期化を実行する
///
/// DB接続とマイグレーション、保存ディレクトリと監査ログディレクトリの作成、
/// 監査ライターの起動を行い、`AppState` を返す。
pub async fn initialize(config: ServiceConfig) -> Result<AppState, VaultError> {
    info!("logvault v{}", env!("CARGO_PKG_VERSION"));

    let db_pool = init_db_pool(&config.database_url).await?;
    db::migrations::run_migrations(&db_pool).await?;

    ensure_dir(&config.storage_dir).await?;
    if let Some(parent) = config.audit_log_path.parent() {
        ensure_dir(parent).await?;
    }

    info!(
        storage_dir = %config.storage_dir.display(),
        audit_log = %config.audit_log_path.display(),
        rotation_threshold_bytes = config.rotation_threshold_bytes,
        audit_failure = ?config.audit_failure,
        auth = %config.auth,
        "Service configured"
    );

    Ok(build_app_state(config, db_pool))
}

/// 設定と接続プールから `AppState` を組み立てる
///
/// 監査ライターのバックグラウンドタスクを起動するため、Tokioランタイム内で呼ぶこと。
pub fn build_app_state(config: ServiceConfig, db_pool: sqlx::SqlitePool) -> AppState {
    let key_validator = KeyValidator::new(Arc::new(db_pool.clone()));
    let audit_log_writer = AuditLogWriter::new(AuditLogWriterConfig::from_service_config(&config));
    let log_catalog = LogCatalog::new(config.storage_dir.clone());
    let log_reader = LogReader::new(config.storage_dir.clone());

    AppState {
        config: Arc::new(config),
        db_pool,
        key_validator,
        audit_log_writer,
        log_catalog,
        log_reader,
    }
}

/// SQLite接続プールを初期化する
pub async fn init_db_pool(database_url: &str) -> Result<sqlx::SqlitePool, VaultError> {
    // SQLiteファイルはディレクトリが存在しないと作成できないため、先に作成しておく
    if let Some(path) = database_url.strip_prefix("sqlite:") {
        // `sqlite::memory:` のような特殊指定はスキップ
        if !path.starts_with(':') {
            // `sqlite://` 形式に備えてスラッシュを除去し、クエリ部分を除外
            let normalized = path.trim_start_matches("//");
            let path_without_params = normalized.split('?').next().unwrap_or(normalized);
            if let Some(parent) = Path::new(path_without_params).parent() {
                if !parent.as_os_str().is_empty() {
                    ensure_dir(parent).await?;
                }
            }
        }
    }

    let connect_options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| VaultError::Config(format!("Invalid database URL: {}", e)))?
        .create_if_missing(true);

    sqlx::SqlitePool::connect_with(connect_options)
        .await
        .map_err(|e| VaultError::Database(format!("Failed to connect to database: {}", e)))
}

async fn ensure_dir(dir: &Path) -> Result<(), VaultError> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        VaultError::Config(format!(
            "Failed to create directory {}: {}",
            dir.display(),
            e
        ))
    })
}
