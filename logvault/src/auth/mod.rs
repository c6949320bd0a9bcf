// 認証モジュール

/// APIキー検証
pub mod validator;

/// 認証ミドルウェア（`userKey` ヘッダー）
pub mod middleware;

/// APIキーを運ぶヘッダー名（HTTPヘッダー名は大文字小文字を区別しない）
pub const API_KEY_HEADER: &str = "userkey";
