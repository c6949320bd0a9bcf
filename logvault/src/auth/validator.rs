//! APIキー検証
//!
//! 提示されたキーをキーストアで完全一致検索し、ログイン名を解決する。

use crate::common::error::VaultError;
use crate::db::traits::ApiKeyRepository;
use std::sync::Arc;

/// 未登録キーに返すメッセージ（形式不正と未登録を区別しない）
pub const INVALID_API_KEY_MESSAGE: &str = "Invalid API Key";

/// 検証済みのユーザー
///
/// 認証ミドルウェアがリクエストextensionに挿入する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// キーに対応するログイン名
    pub login: String,
}

/// APIキー検証器
#[derive(Clone)]
pub struct KeyValidator {
    repository: Arc<dyn ApiKeyRepository>,
}

impl KeyValidator {
    /// キーストアを指定して作成
    pub fn new(repository: Arc<dyn ApiKeyRepository>) -> Self {
        Self { repository }
    }

    /// キーを検証してIdentityを返す
    ///
    /// # Returns
    /// * `Ok(Identity)` - キーが登録されている
    /// * `Err(VaultError::Unauthorized)` - キーが登録されていない
    /// * `Err(VaultError::ServiceUnavailable)` - キーストアに到達できない
    pub async fn validate(&self, key: &str) -> Result<Identity, VaultError> {
        match self.repository.find_login_by_key(key).await {
            Ok(Some(login)) => Ok(Identity { login }),
            Ok(None) => Err(VaultError::Unauthorized(INVALID_API_KEY_MESSAGE.to_string())),
            Err(e) => {
                tracing::error!("API key store lookup failed: {}", e);
                Err(VaultError::ServiceUnavailable(format!(
                    "API key store unavailable: {}",
                    e
                )))
            }
        }
    }
}
