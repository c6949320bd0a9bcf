//! データベースアクセス層
//!
//! SQLiteベースのAPIキーストア

/// APIキー管理
pub mod api_keys;

/// データベースマイグレーション
pub mod migrations;

/// Repository traitパターン（テスタビリティ向上）
pub mod traits;
