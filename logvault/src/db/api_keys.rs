//! APIキーストア（`usersLogApi` テーブル）へのアクセス

use crate::common::error::VaultError;
use sqlx::SqlitePool;

/// APIキーに対応するログイン名を検索
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `userkey` - クライアントが提示したキー（完全一致で検索）
///
/// # Returns
/// * `Ok(Some(login))` - キーが登録されている
/// * `Ok(None)` - キーが登録されていない
/// * `Err(VaultError::Database)` - 検索失敗
pub async fn find_login_by_key(
    pool: &SqlitePool,
    userkey: &str,
) -> Result<Option<String>, VaultError> {
    let row: Option<(String,)> = sqlx::query_as("SELECT login FROM usersLogApi WHERE userkey = ?")
        .bind(userkey)
        .fetch_optional(pool)
        .await
        .map_err(|e| VaultError::Database(format!("Failed to find API key: {}", e)))?;

    Ok(row.map(|(login,)| login))
}

/// APIキーを登録
///
/// 同じキーが既に存在する場合は `VaultError::Database` を返す。
pub async fn insert(pool: &SqlitePool, userkey: &str, login: &str) -> Result<(), VaultError> {
    sqlx::query("INSERT INTO usersLogApi (userkey, login) VALUES (?, ?)")
        .bind(userkey)
        .bind(login)
        .execute(pool)
        .await
        .map_err(|e| VaultError::Database(format!("Failed to insert API key: {}", e)))?;

    Ok(())
}
