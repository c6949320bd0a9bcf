//! ロギング初期化ユーティリティ
//!
//! `LOGVAULT_LOG_LEVEL`（未設定なら `RUST_LOG`）からフィルタを読み、
//! どちらも無ければ `info` で標準出力へ出力する。

use crate::config::get_env_with_fallback;
use tracing_subscriber::EnvFilter;

/// デフォルトのログレベル
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// 環境変数からログフィルタを組み立てる
pub fn env_filter() -> EnvFilter {
    match get_env_with_fallback("LOGVAULT_LOG_LEVEL", "RUST_LOG") {
        Some(directives) => EnvFilter::try_new(&directives).unwrap_or_else(|e| {
            eprintln!(
                "Invalid log filter {:?} ({}), falling back to {}",
                directives, e, DEFAULT_LOG_LEVEL
            );
            EnvFilter::new(DEFAULT_LOG_LEVEL)
        }),
        None => EnvFilter::new(DEFAULT_LOG_LEVEL),
    }
}

/// グローバルsubscriberを設定する
///
/// 既に設定済みの場合はエラーを返す。
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .try_init()
}
