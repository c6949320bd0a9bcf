//! 統合テスト共通サポート

pub mod vault;
