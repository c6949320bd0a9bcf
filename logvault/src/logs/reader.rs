//! ログファイルの読み出しとダウンロード
//!
//! リクエストされたファイル名は保存ディレクトリ直下の通常ファイルにのみ解決する。
//! 正規化後のパスの親が保存ディレクトリと一致しない場合（`..` やディレクトリ外を
//! 指すシンボリックリンク）は拒否する。

use crate::common::error::{VaultError, VaultResult};
use crate::logs::LOG_NOT_FOUND_MESSAGE;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs::File;

/// 不正なファイル名に返すメッセージ
pub const INVALID_FILENAME_MESSAGE: &str = "Invalid log filename";

/// 保存ディレクトリ内のログファイルリーダー
#[derive(Debug, Clone)]
pub struct LogReader {
    storage_dir: PathBuf,
}

impl LogReader {
    /// 保存ディレクトリを指定して作成
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
        }
    }

    /// ファイル名を保存ディレクトリ内の実パスへ解決する
    ///
    /// # Returns
    /// * `Ok(PathBuf)` - 正規化済みのファイルパス
    /// * `Err(VaultError::Validation)` - ファイル名が単一の通常要素でない、またはディレクトリ外を指す
    /// * `Err(VaultError::NotFound)` - 通常ファイルとして存在しない
    pub async fn resolve(&self, filename: &str) -> VaultResult<PathBuf> {
        validate_filename(filename)?;

        let storage_dir = match tokio::fs::canonicalize(&self.storage_dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(VaultError::NotFound(LOG_NOT_FOUND_MESSAGE.to_string()))
            }
            Err(e) => return Err(io_error(&self.storage_dir, e)),
        };

        let joined = storage_dir.join(filename);
        let resolved = match tokio::fs::canonicalize(&joined).await {
            Ok(path) => path,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(VaultError::NotFound(LOG_NOT_FOUND_MESSAGE.to_string()))
            }
            Err(e) => return Err(io_error(&joined, e)),
        };

        if resolved.parent() != Some(storage_dir.as_path()) {
            tracing::warn!(filename, "Rejected log path resolving outside the storage directory");
            return Err(VaultError::Validation(INVALID_FILENAME_MESSAGE.to_string()));
        }

        let metadata = tokio::fs::metadata(&resolved)
            .await
            .map_err(|e| io_error(&resolved, e))?;
        if !metadata.is_file() {
            return Err(VaultError::NotFound(LOG_NOT_FOUND_MESSAGE.to_string()));
        }

        Ok(resolved)
    }

    /// ファイル全体をテキストとして読み出す（不正なUTF-8は置換文字になる）
    pub async fn read(&self, filename: &str) -> VaultResult<String> {
        let path = self.resolve(filename).await?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| io_error(&path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// ダウンロード用にファイルを開き、サイズと共に返す
    pub async fn open(&self, filename: &str) -> VaultResult<(File, u64)> {
        let path = self.resolve(filename).await?;
        let file = File::open(&path).await.map_err(|e| io_error(&path, e))?;
        let len = file
            .metadata()
            .await
            .map_err(|e| io_error(&path, e))?
            .len();
        Ok((file, len))
    }
}

/// ファイル名が単一の通常パス要素であることを確認する
fn validate_filename(filename: &str) -> VaultResult<()> {
    let invalid = || VaultError::Validation(INVALID_FILENAME_MESSAGE.to_string());

    if filename.is_empty() || filename.contains(['/', '\\', '\0']) {
        return Err(invalid());
    }

    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == filename => Ok(()),
        _ => Err(invalid()),
    }
}

fn io_error(path: &Path, e: std::io::Error) -> VaultError {
    VaultError::Internal(format!("Failed to access {}: {}", path.display(), e))
}
