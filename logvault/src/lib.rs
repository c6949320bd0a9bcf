//! logvault Server
//!
//! ディレクトリ内のログファイルをHTTPで配信するサーバー。
//! `userKey` ヘッダーのAPIキーをSQLiteのキーストアで検証し、
//! 全呼び出しをサイズローテーション付きの監査ログへ記録する。

#![warn(missing_docs)]

/// 共通型定義（エラー、IPアドレス）
pub mod common;

/// REST APIハンドラー
pub mod api;

/// データベースアクセス
pub mod db;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// 認証機能
pub mod auth;

/// 監査ログ
pub mod audit;

/// ログファイルの一覧と読み出し
pub mod logs;

/// CLIインターフェース
pub mod cli;

/// サーバー初期化
pub mod bootstrap;

/// サーバー起動・停止
pub mod server;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// サービス設定
    pub config: std::sync::Arc<config::ServiceConfig>,
    /// データベース接続プール
    pub db_pool: sqlx::SqlitePool,
    /// APIキー検証器
    pub key_validator: auth::validator::KeyValidator,
    /// 監査ログライター
    pub audit_log_writer: audit::writer::AuditLogWriter,
    /// ログファイル一覧
    pub log_catalog: logs::catalog::LogCatalog,
    /// ログファイルリーダー
    pub log_reader: logs::reader::LogReader,
}
