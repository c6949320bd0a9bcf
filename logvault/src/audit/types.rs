//! 監査ログの型定義

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// APIキーヘッダーが無いリクエストで記録する識別子
pub const ANONYMOUS_IDENTITY: &str = "anonymous";

/// 監査対象のエンドポイント種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogEndpoint {
    /// GET /logs
    ListLogs,
    /// GET /logs/{filename}
    ReadLog,
    /// GET /logs/download/{filename}
    DownloadLog,
}

impl LogEndpoint {
    /// 監査ログに書き込む表示名
    pub fn label(&self) -> &'static str {
        match self {
            Self::ListLogs => "List Logs",
            Self::ReadLog => "Read Log",
            Self::DownloadLog => "Download Log",
        }
    }

    /// 設定で使うルート名
    pub fn route_name(&self) -> &'static str {
        match self {
            Self::ListLogs => "list",
            Self::ReadLog => "read",
            Self::DownloadLog => "download",
        }
    }

    /// ルート名から変換
    pub fn from_route_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "list" => Some(Self::ListLogs),
            "read" => Some(Self::ReadLog),
            "download" => Some(Self::DownloadLog),
            _ => None,
        }
    }
}

impl fmt::Display for LogEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 監査ログエントリ（1行分）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogEntry {
    /// 記録時刻（サービスのローカル時刻）
    pub timestamp: DateTime<Local>,
    /// ユーザー名またはAPIキー
    pub identity: String,
    /// クライアントIPアドレス
    pub client_ip: String,
    /// エンドポイント種別
    pub endpoint: LogEndpoint,
    /// 対象ファイル名（該当しない場合は空文字）
    pub filename: String,
}

impl AuditLogEntry {
    /// 現在時刻でエントリを作成
    pub fn now(
        identity: impl Into<String>,
        client_ip: impl Into<String>,
        endpoint: LogEndpoint,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Local::now(),
            identity: identity.into(),
            client_ip: client_ip.into(),
            endpoint,
            filename: filename.into(),
        }
    }

    /// 改行を含まない1行に整形する
    ///
    /// `<timestamp> - User: <identity> - IP: <ip> - Endpoint: <label>[ - Filename: <filename>]`
    pub fn format_line(&self) -> String {
        let mut line = format!(
            "{} - User: {} - IP: {} - Endpoint: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S%.6f"),
            sanitize(&self.identity),
            sanitize(&self.client_ip),
            self.endpoint.label()
        );
        if !self.filename.is_empty() {
            line.push_str(" - Filename: ");
            line.push_str(&sanitize(&self.filename));
        }
        line
    }
}

// 呼び出し元が渡した値で行が分割されないようにする
fn sanitize(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}
