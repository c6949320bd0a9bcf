//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to deprecated variable names with warning logs, and the `ServiceConfig`
//! structure that every component receives at construction time.

use crate::audit::types::LogEndpoint;
use crate::common::error::VaultError;
use std::path::{Path, PathBuf};

/// 監査ログのローテーション閾値（10 MiB）
pub const DEFAULT_ROTATION_THRESHOLD_BYTES: u64 = 10 * 1024 * 1024;

/// デフォルトの待受ポート
pub const DEFAULT_PORT: u16 = 8000;

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use logvault::config::get_env_with_fallback;
///
/// let dir = get_env_with_fallback("LOGVAULT_STORAGE_DIR", "LOGS_FOLDER");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither variable is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// データディレクトリを解決する
///
/// `LOGVAULT_DATA_DIR` > `$HOME/.logvault` > `./.logvault` の順。
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("LOGVAULT_DATA_DIR") {
        return PathBuf::from(dir);
    }
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(".logvault"))
        .unwrap_or_else(|_| PathBuf::from(".logvault"))
}

/// ルートごとのAPIキー要求設定
///
/// 環境変数 `LOGVAULT_AUTH_ROUTES` にカンマ区切りで `list` / `read` / `download`
/// を指定する。`all` は全ルート、`none` は認証無効。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthPolicy {
    /// GET /logs でAPIキーを要求する
    pub list: bool,
    /// GET /logs/{filename} でAPIキーを要求する
    pub read: bool,
    /// GET /logs/download/{filename} でAPIキーを要求する
    pub download: bool,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self::all()
    }
}

impl AuthPolicy {
    /// 全ルートでAPIキーを要求する
    pub fn all() -> Self {
        Self {
            list: true,
            read: true,
            download: true,
        }
    }

    /// 認証を要求しない（開発・テスト用）
    pub fn none() -> Self {
        Self {
            list: false,
            read: false,
            download: false,
        }
    }

    /// 指定ルートでAPIキーが必要か
    pub fn requires_key(&self, endpoint: LogEndpoint) -> bool {
        match endpoint {
            LogEndpoint::ListLogs => self.list,
            LogEndpoint::ReadLog => self.read,
            LogEndpoint::DownloadLog => self.download,
        }
    }

    /// `list,read` 形式の文字列をパースする
    ///
    /// 認証を無効にできるのは `none` のみ。空の値はエラーにする。
    pub fn parse(value: &str) -> Result<Self, VaultError> {
        let value = value.trim();
        match value.to_ascii_lowercase().as_str() {
            "all" => return Ok(Self::all()),
            "none" => return Ok(Self::none()),
            _ => {}
        }

        let tokens: Vec<&str> = value
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            return Err(VaultError::Config(
                "LOGVAULT_AUTH_ROUTES is empty (use none to disable authentication)".to_string(),
            ));
        }

        let mut policy = Self::none();
        for token in tokens {
            match LogEndpoint::from_route_name(token) {
                Some(LogEndpoint::ListLogs) => policy.list = true,
                Some(LogEndpoint::ReadLog) => policy.read = true,
                Some(LogEndpoint::DownloadLog) => policy.download = true,
                None => {
                    return Err(VaultError::Config(format!(
                        "Unknown route '{}' in LOGVAULT_AUTH_ROUTES (expected list, read, download, all or none)",
                        token
                    )))
                }
            }
        }
        Ok(policy)
    }
}

impl std::fmt::Display for AuthPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let routes: Vec<&str> = [
            LogEndpoint::ListLogs,
            LogEndpoint::ReadLog,
            LogEndpoint::DownloadLog,
        ]
        .into_iter()
        .filter(|endpoint| self.requires_key(*endpoint))
        .map(|endpoint| endpoint.route_name())
        .collect();

        if routes.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&routes.join(","))
        }
    }
}

/// 監査ログ書き込み失敗時の扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuditFailurePolicy {
    /// 書き込み失敗でリクエストを500で失敗させる
    #[default]
    Fatal,
    /// 警告ログのみ出してリクエスト処理を継続する
    BestEffort,
}

impl AuditFailurePolicy {
    /// 文字列からパースする（`fatal` / `best_effort`）
    pub fn parse(value: &str) -> Result<Self, VaultError> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fatal" => Ok(Self::Fatal),
            "best_effort" => Ok(Self::BestEffort),
            other => Err(VaultError::Config(format!(
                "Unknown audit failure policy '{}' (expected fatal or best_effort)",
                other
            ))),
        }
    }
}

/// サービス設定
///
/// プロセス全体の固定パスや接続文字列を一箇所にまとめ、
/// 各コンポーネントの生成時に渡す。
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// 配信対象ログの格納ディレクトリ
    pub storage_dir: PathBuf,
    /// 監査ログ（API呼び出し記録）のパス
    pub audit_log_path: PathBuf,
    /// 監査ログのローテーション閾値（バイト）
    pub rotation_threshold_bytes: u64,
    /// APIキーストアのデータベースURL
    pub database_url: String,
    /// ルートごとの認証要求
    pub auth: AuthPolicy,
    /// 監査ログ書き込み失敗時の扱い
    pub audit_failure: AuditFailurePolicy,
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
}

impl ServiceConfig {
    /// データディレクトリ配下のデフォルト値で設定を作る
    pub fn with_data_dir(data_dir: &Path) -> Self {
        Self {
            storage_dir: data_dir.join("logs"),
            audit_log_path: data_dir.join("api_calls").join("api_calls.log"),
            rotation_threshold_bytes: DEFAULT_ROTATION_THRESHOLD_BYTES,
            database_url: format!("sqlite:{}", data_dir.join("logvault.db").display()),
            auth: AuthPolicy::default(),
            audit_failure: AuditFailurePolicy::default(),
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }

    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, VaultError> {
        let defaults = Self::with_data_dir(&data_dir());

        let storage_dir = get_env_with_fallback("LOGVAULT_STORAGE_DIR", "LOGS_FOLDER")
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_dir);
        let audit_log_path = get_env_with_fallback("LOGVAULT_AUDIT_LOG_PATH", "API_LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.audit_log_path);
        let rotation_threshold_bytes = get_env_with_fallback_parse(
            "LOGVAULT_AUDIT_MAX_BYTES",
            "MAX_API_LOG_SIZE",
            DEFAULT_ROTATION_THRESHOLD_BYTES,
        );
        let database_url = get_env_with_fallback_or(
            "LOGVAULT_DATABASE_URL",
            "DATABASE_URL",
            &defaults.database_url,
        );
        let auth = match std::env::var("LOGVAULT_AUTH_ROUTES").ok() {
            Some(value) => AuthPolicy::parse(&value)?,
            None => defaults.auth,
        };
        let audit_failure = match std::env::var("LOGVAULT_AUDIT_FAILURE_POLICY").ok() {
            Some(value) => AuditFailurePolicy::parse(&value)?,
            None => defaults.audit_failure,
        };
        let host = std::env::var("LOGVAULT_HOST").unwrap_or(defaults.host);
        let port = std::env::var("LOGVAULT_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            storage_dir,
            audit_log_path,
            rotation_threshold_bytes,
            database_url,
            auth,
            audit_failure,
            host,
            port,
        })
    }

    /// バインドアドレスを返す
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
