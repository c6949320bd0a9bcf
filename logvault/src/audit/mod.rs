//! 監査ログ
//!
//! ログ配信ルートへの呼び出しを1行ずつテキストファイルへ記録し、
//! サイズ閾値を超えたらアーカイブへローテーションする

/// 監査ログの型定義
pub mod types;

/// サイズローテーション
pub mod rotation;

/// 単一タスクによる非同期ライター
pub mod writer;

/// 監査ログミドルウェア
pub mod middleware;
