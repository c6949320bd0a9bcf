//! ログファイル一覧

use crate::common::error::{VaultError, VaultResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 一覧対象の拡張子
const LOG_SUFFIX: &str = ".log";

/// 保存ディレクトリ直下のログファイルカタログ
#[derive(Debug, Clone)]
pub struct LogCatalog {
    storage_dir: PathBuf,
}

impl LogCatalog {
    /// 保存ディレクトリを指定して作成
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
        }
    }

    /// `.log` で終わる通常ファイル名を辞書順で返す
    ///
    /// サブディレクトリは辿らない。ディレクトリが存在しない場合は空。
    /// シンボリックリンクは、リンク先が保存ディレクトリ直下の通常ファイルである場合のみ含める
    /// （`LogReader` が配信できる名前と一致させる）。
    pub async fn list(&self) -> VaultResult<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.storage_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(dir = %self.storage_dir.display(), "Storage directory does not exist");
                return Ok(Vec::new());
            }
            Err(e) => return Err(io_error(&self.storage_dir, e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_error(&self.storage_dir, e))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| io_error(&entry.path(), e))?;
            if file_type.is_symlink() {
                if !self.links_inside_storage(&entry.path()).await {
                    continue;
                }
            } else if !file_type.is_file() {
                continue;
            }
            // UTF-8でない名前はURLで指定できないため対象外
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.ends_with(LOG_SUFFIX) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    async fn links_inside_storage(&self, link: &Path) -> bool {
        let (Ok(storage_dir), Ok(target)) = (
            tokio::fs::canonicalize(&self.storage_dir).await,
            tokio::fs::canonicalize(link).await,
        ) else {
            return false;
        };
        if target.parent() != Some(storage_dir.as_path()) {
            return false;
        }
        tokio::fs::metadata(&target)
            .await
            .map(|metadata| metadata.is_file())
            .unwrap_or(false)
    }
}

fn io_error(path: &Path, e: std::io::Error) -> VaultError {
    VaultError::Internal(format!("Failed to list {}: {}", path.display(), e))
}
