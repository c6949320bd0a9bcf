//! 監査ログのサイズローテーション
//!
//! 追記前にファイルサイズを確認し、閾値以上であればタイムスタンプ付きの
//! アーカイブ名へリネームする。次の追記で元のパスが再作成される。

use crate::common::error::VaultError;
use chrono::{DateTime, Local};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

/// 同一秒内に複数回ローテーションした場合の連番上限
const MAX_ARCHIVE_SUFFIX: u32 = 1000;

/// 必要であれば監査ログをローテーションする
///
/// # Returns
/// * `Ok(Some(path))` - ローテーションを実施した（アーカイブ先パス）
/// * `Ok(None)` - ファイルが存在しない、または閾値未満
/// * `Err(VaultError::ObservabilityFailure)` - サイズ取得・リネームに失敗
pub async fn rotate_if_needed(
    path: &Path,
    threshold_bytes: u64,
    now: DateTime<Local>,
) -> Result<Option<PathBuf>, VaultError> {
    let size = match tokio::fs::metadata(path).await {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(VaultError::ObservabilityFailure(format!(
                "Failed to stat audit log {}: {}",
                path.display(),
                e
            )))
        }
    };

    if size < threshold_bytes {
        return Ok(None);
    }

    let archive = next_archive_path(path, now).await?;
    tokio::fs::rename(path, &archive).await.map_err(|e| {
        VaultError::ObservabilityFailure(format!(
            "Failed to rotate audit log {} -> {}: {}",
            path.display(),
            archive.display(),
            e
        ))
    })?;

    info!(
        size_bytes = size,
        threshold_bytes,
        archive = %archive.display(),
        "Rotated audit log"
    );
    Ok(Some(archive))
}

/// アーカイブ名を組み立てる
///
/// `api_calls.log` → `api_calls_20240305140709.log`（`attempt > 0` なら `api_calls_20240305140709-1.log`）
pub fn archive_path(path: &Path, now: DateTime<Local>, attempt: u32) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "api_calls".to_string());
    let suffix = if attempt == 0 {
        String::new()
    } else {
        format!("-{}", attempt)
    };
    let name = match path.extension() {
        Some(ext) => format!(
            "{}_{}{}.{}",
            stem,
            now.format("%Y%m%d%H%M%S"),
            suffix,
            ext.to_string_lossy()
        ),
        None => format!("{}_{}{}", stem, now.format("%Y%m%d%H%M%S"), suffix),
    };
    path.with_file_name(name)
}

async fn next_archive_path(path: &Path, now: DateTime<Local>) -> Result<PathBuf, VaultError> {
    for attempt in 0..MAX_ARCHIVE_SUFFIX {
        let candidate = archive_path(path, now, attempt);
        let exists = tokio::fs::try_exists(&candidate).await.map_err(|e| {
            VaultError::ObservabilityFailure(format!(
                "Failed to check archive {}: {}",
                candidate.display(),
                e
            ))
        })?;
        if !exists {
            return Ok(candidate);
        }
    }
    Err(VaultError::ObservabilityFailure(format!(
        "No free archive name for {}",
        path.display()
    )))
}
