use std::path::{Path, PathBuf};

use axum::{body::Body, http::Request, Router};
use logvault::config::{AuthPolicy, ServiceConfig};
use logvault::{api, bootstrap, db, AppState};
use tempfile::TempDir;

/// テスト用に登録されるAPIキー
#[allow(dead_code)]
pub const TEST_KEY: &str = "test-key-123";
/// `TEST_KEY` に対応するログイン名
#[allow(dead_code)]
pub const TEST_LOGIN: &str = "tester";

/// 一時ディレクトリ上に構築したテスト用サーバー状態
///
/// `TempDir` を保持しているため、Dropされるまでファイルは残る。
#[allow(dead_code)]
pub struct TestVault {
    _root: TempDir,
    /// アプリケーション状態
    pub state: AppState,
}

#[allow(dead_code)]
impl TestVault {
    /// ルーターを生成する（.oneshot()スタイルのテスト用）
    pub fn app(&self) -> Router {
        api::create_app(self.state.clone())
    }

    /// ログ保存ディレクトリ
    pub fn storage_dir(&self) -> &Path {
        &self.state.config.storage_dir
    }

    /// 監査ログのパス
    pub fn audit_log_path(&self) -> PathBuf {
        self.state.config.audit_log_path.clone()
    }

    /// 監査ログの行一覧（未作成なら空）
    pub fn audit_lines(&self) -> Vec<String> {
        std::fs::read_to_string(self.audit_log_path())
            .map(|content| content.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// 保存ディレクトリにファイルを置く
    pub fn write_log(&self, name: &str, content: &[u8]) {
        std::fs::write(self.storage_dir().join(name), content).unwrap();
    }

    /// 保存ディレクトリの外（親ディレクトリ）にファイルを置く
    pub fn write_outside(&self, name: &str, content: &[u8]) {
        std::fs::write(self.storage_dir().parent().unwrap().join(name), content).unwrap();
    }
}

/// 認証ポリシーを指定してテスト用サーバー状態を作成する
///
/// 本番と同じ `bootstrap::initialize` を通し、`TEST_KEY` を登録する。
#[allow(dead_code)]
pub async fn create_test_vault(auth: AuthPolicy) -> TestVault {
    let root = tempfile::tempdir().expect("create temp dir");
    let mut config = ServiceConfig::with_data_dir(root.path());
    config.auth = auth;

    let state = bootstrap::initialize(config)
        .await
        .expect("Failed to initialize test vault");
    db::api_keys::insert(&state.db_pool, TEST_KEY, TEST_LOGIN)
        .await
        .expect("Failed to register test key");

    TestVault { _root: root, state }
}

/// GETリクエストを組み立てる（`key` 指定時は `userKey` ヘッダー付き）
#[allow(dead_code)]
pub fn get_request(uri: &str, key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(key) = key {
        builder = builder.header("userKey", key);
    }
    builder.body(Body::empty()).unwrap()
}
