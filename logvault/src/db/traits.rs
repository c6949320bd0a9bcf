//! Repository traitパターン定義
//!
//! DB操作を抽象化し、テスタビリティを向上させるためのtrait群。
//! 各traitは既存のフリー関数に対応する。

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::common::error::VaultError;

/// APIキーストアのRepository trait
#[async_trait]
pub trait ApiKeyRepository: Send + Sync {
    /// キーに対応するログイン名を検索
    async fn find_login_by_key(&self, userkey: &str) -> Result<Option<String>, VaultError>;
}

#[async_trait]
impl ApiKeyRepository for SqlitePool {
    async fn find_login_by_key(&self, userkey: &str) -> Result<Option<String>, VaultError> {
        super::api_keys::find_login_by_key(self, userkey).await
    }
}
