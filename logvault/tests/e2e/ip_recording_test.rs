//! IP記録E2Eテスト
//!
//! 実ポートにバインドしたサーバーへHTTPで接続し、
//! 監査ログに接続元IPが記録されることを検証

use logvault::api;
use logvault::config::AuthPolicy;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::support;
use support::http::spawn_vault;
use support::vault::{create_test_vault, TEST_KEY};

#[tokio::test]
async fn audit_log_records_loopback_client_ip() {
    let vault = create_test_vault(AuthPolicy::all()).await;
    vault.write_log("report.log", b"hello");
    let server = spawn_vault(api::create_app(vault.state.clone())).await;
    let client = Client::new();

    let resp = client
        .get(format!("http://{}/logs/report.log", server.addr()))
        .header("userKey", TEST_KEY)
        .send()
        .await
        .expect("read request");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["content"], "hello");

    let resp = client
        .get(format!("http://{}/logs", server.addr()))
        .send()
        .await
        .expect("list request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    server.stop().await;

    let lines = vault.audit_lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with(&format!(
        " - User: {} - IP: 127.0.0.1 - Endpoint: Read Log - Filename: report.log",
        TEST_KEY
    )));
    assert!(lines[1].ends_with(" - User: anonymous - IP: 127.0.0.1 - Endpoint: List Logs"));
}

#[tokio::test]
async fn download_over_http_returns_attachment() {
    let vault = create_test_vault(AuthPolicy::all()).await;
    vault.write_log("report.log", b"hello");
    let server = spawn_vault(api::create_app(vault.state.clone())).await;

    let resp = Client::new()
        .get(format!("http://{}/logs/download/report.log", server.addr()))
        .header("userKey", TEST_KEY)
        .send()
        .await
        .expect("download request");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()["content-disposition"],
        "attachment; filename=\"report.log\""
    );
    assert_eq!(&resp.bytes().await.unwrap()[..], b"hello");

    server.stop().await;
}
