//! Contract Test: GET /logs/download/{filename}

use axum::http::{header, StatusCode};
use logvault::config::AuthPolicy;
use tower::ServiceExt;

use crate::support::vault::{create_test_vault, get_request, TEST_KEY};

#[tokio::test]
async fn download_streams_attachment() {
    let vault = create_test_vault(AuthPolicy::all()).await;
    vault.write_log("report.log", b"hello");

    let res = vault
        .app()
        .oneshot(get_request("/logs/download/report.log", Some(TEST_KEY)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[header::CONTENT_TYPE],
        "application/octet-stream"
    );
    assert_eq!(
        res.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"report.log\""
    );
    assert_eq!(res.headers()[header::CONTENT_LENGTH], "5");

    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"hello");
}

#[tokio::test]
async fn download_preserves_binary_content() {
    let vault = create_test_vault(AuthPolicy::all()).await;
    let content: Vec<u8> = (0..=255u8).cycle().take(200_000).collect();
    vault.write_log("big.log", &content);

    let res = vault
        .app()
        .oneshot(get_request("/logs/download/big.log", Some(TEST_KEY)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(body.len(), content.len());
    assert_eq!(&body[..], &content[..]);
}

#[tokio::test]
async fn download_missing_file_is_not_found() {
    let vault = create_test_vault(AuthPolicy::all()).await;

    let res = vault
        .app()
        .oneshot(get_request("/logs/download/missing.log", Some(TEST_KEY)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn download_is_audited_with_presented_key() {
    let vault = create_test_vault(AuthPolicy::all()).await;
    vault.write_log("report.log", b"hello");

    vault
        .app()
        .oneshot(get_request("/logs/download/report.log", Some(TEST_KEY)))
        .await
        .unwrap();

    let lines = vault.audit_lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with(&format!(
        " - User: {} - IP: unknown - Endpoint: Download Log - Filename: report.log",
        TEST_KEY
    )));
}

#[tokio::test]
async fn download_traversal_is_rejected() {
    let vault = create_test_vault(AuthPolicy::all()).await;
    vault.write_outside("secret.txt", b"top secret");

    let res = vault
        .app()
        .oneshot(get_request("/logs/download/..%2Fsecret.txt", Some(TEST_KEY)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn download_non_utf8_filename_returns_structured_error() {
    let vault = create_test_vault(AuthPolicy::all()).await;

    let res = vault
        .app()
        .oneshot(get_request("/logs/download/%FF.log", Some(TEST_KEY)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"]["type"], "invalid_request_error");

    let lines = vault.audit_lines();
    assert!(lines[0].ends_with(" - Endpoint: Download Log - Filename: \u{FFFD}.log"));
}
