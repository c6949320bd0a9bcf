//! ログファイル配信
//!
//! 保存ディレクトリ直下の `.log` ファイルの一覧・読み出し・ダウンロード

/// ログファイル一覧
pub mod catalog;

/// ファイル名解決と読み出し
pub mod reader;

/// 指定ファイルが見つからない場合のメッセージ
pub const LOG_NOT_FOUND_MESSAGE: &str = "Log not found";
