//! データベースマイグレーション実行

use crate::common::error::VaultError;
use sqlx::SqlitePool;

/// マイグレーションを実行（sqlx::migrate!マクロを使用）
///
/// # Arguments
/// * `pool` - データベース接続プール
///
/// # Returns
/// * `Ok(())` - マイグレーション成功
/// * `Err(VaultError)` - マイグレーション失敗
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), VaultError> {
    tracing::info!("Running database migrations");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| VaultError::Database(format!("Failed to run migrations: {}", e)))?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}
