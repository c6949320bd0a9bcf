//! 監査ログの非同期ライター
//!
//! 監査ログファイルは単一のバックグラウンドタスクが所有する。
//! 各リクエストはmpscチャネルでエントリを送り、oneshotで書き込み結果を受け取る。
//! サイズ確認・ローテーション・追記はこのタスク内で直列に実行される。

use crate::audit::rotation;
use crate::audit::types::{AuditLogEntry, LogEndpoint};
use crate::common::error::VaultError;
use crate::config::ServiceConfig;
use chrono::Local;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// 監査ログライター設定
#[derive(Debug, Clone)]
pub struct AuditLogWriterConfig {
    /// 監査ログのパス
    pub path: PathBuf,
    /// ローテーション閾値（バイト）
    pub rotation_threshold_bytes: u64,
    /// チャネル容量。デフォルト: 1024
    pub channel_capacity: usize,
}

impl AuditLogWriterConfig {
    /// サービス設定から生成
    pub fn from_service_config(config: &ServiceConfig) -> Self {
        Self {
            path: config.audit_log_path.clone(),
            rotation_threshold_bytes: config.rotation_threshold_bytes,
            channel_capacity: 1024,
        }
    }
}

struct AuditCommand {
    entry: AuditLogEntry,
    ack: oneshot::Sender<Result<(), VaultError>>,
}

/// 監査ログの非同期ライター
///
/// Clone可能（senderのクローン）。全senderがDropされると
/// 受信済みエントリを書き終えてからバックグラウンドタスクが終了する。
#[derive(Clone)]
pub struct AuditLogWriter {
    sender: mpsc::Sender<AuditCommand>,
}

impl AuditLogWriter {
    /// 新しいAuditLogWriterを作成し、バックグラウンドタスクを起動
    pub fn new(config: AuditLogWriterConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.channel_capacity.max(1));

        tokio::spawn(Self::background_task(rx, config));

        Self { sender: tx }
    }

    /// API呼び出しを1行記録する
    ///
    /// `filename` が空文字の場合はFilename欄を出力しない。
    pub async fn record(
        &self,
        identity: &str,
        client_ip: &str,
        endpoint: LogEndpoint,
        filename: &str,
    ) -> Result<(), VaultError> {
        self.record_entry(AuditLogEntry::now(identity, client_ip, endpoint, filename))
            .await
    }

    /// 作成済みエントリを書き込み、完了を待つ
    pub async fn record_entry(&self, entry: AuditLogEntry) -> Result<(), VaultError> {
        let (ack, done) = oneshot::channel();
        self.sender
            .send(AuditCommand { entry, ack })
            .await
            .map_err(|_| {
                VaultError::ObservabilityFailure("Audit log writer is not running".to_string())
            })?;

        done.await.map_err(|_| {
            VaultError::ObservabilityFailure(
                "Audit log writer stopped before acknowledging the entry".to_string(),
            )
        })?
    }

    /// バックグラウンド書き込みタスク
    async fn background_task(mut rx: mpsc::Receiver<AuditCommand>, config: AuditLogWriterConfig) {
        info!(path = %config.path.display(), "Audit log writer started");

        while let Some(command) = rx.recv().await {
            let result = Self::append(&config, &command.entry).await;
            if let Err(e) = &result {
                warn!("Failed to write audit log entry: {}", e);
            }
            // 呼び出し側が既に諦めている場合は結果を捨てる
            let _ = command.ack.send(result);
        }

        info!("Audit log writer background task stopped");
    }

    async fn append(config: &AuditLogWriterConfig, entry: &AuditLogEntry) -> Result<(), VaultError> {
        rotation::rotate_if_needed(&config.path, config.rotation_threshold_bytes, Local::now())
            .await?;

        let mut line = entry.format_line();
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.path)
            .await
            .map_err(|e| {
                VaultError::ObservabilityFailure(format!(
                    "Failed to open audit log {}: {}",
                    config.path.display(),
                    e
                ))
            })?;

        file.write_all(line.as_bytes()).await.map_err(|e| {
            VaultError::ObservabilityFailure(format!(
                "Failed to append audit log {}: {}",
                config.path.display(),
                e
            ))
        })?;
        file.flush().await.map_err(|e| {
            VaultError::ObservabilityFailure(format!(
                "Failed to flush audit log {}: {}",
                config.path.display(),
                e
            ))
        })?;

        debug!(endpoint = %entry.endpoint, "audit log entry written");
        Ok(())
    }
}
