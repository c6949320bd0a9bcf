//! Contract Test: GET /logs/{filename}

use axum::http::StatusCode;
use logvault::config::AuthPolicy;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::support::vault::{create_test_vault, get_request, TEST_KEY};

async fn body_json(res: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn read_returns_file_and_content() {
    let vault = create_test_vault(AuthPolicy::all()).await;
    vault.write_log("report.log", b"hello");

    let res = vault
        .app()
        .oneshot(get_request("/logs/report.log", Some(TEST_KEY)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        body_json(res).await,
        json!({"file": "report.log", "content": "hello"})
    );
}

#[tokio::test]
async fn read_is_idempotent() {
    let vault = create_test_vault(AuthPolicy::all()).await;
    vault.write_log("app.log", b"2024-01-01 INFO started\n2024-01-01 INFO ready\n");
    let app = vault.app();

    let first = body_json(
        app.clone()
            .oneshot(get_request("/logs/app.log", Some(TEST_KEY)))
            .await
            .unwrap(),
    )
    .await;
    let second = body_json(
        app.oneshot(get_request("/logs/app.log", Some(TEST_KEY)))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(first, second);
    assert_eq!(vault.audit_lines().len(), 2);
}

#[tokio::test]
async fn read_missing_file_is_not_found_and_audited() {
    let vault = create_test_vault(AuthPolicy::all()).await;

    let res = vault
        .app()
        .oneshot(get_request("/logs/missing.log", Some(TEST_KEY)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res).await["error"]["message"], "Log not found");

    let lines = vault.audit_lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with(" - Endpoint: Read Log - Filename: missing.log"));
}

#[tokio::test]
async fn encoded_traversal_is_rejected() {
    let vault = create_test_vault(AuthPolicy::all()).await;
    vault.write_outside("secret.txt", b"top secret");

    let res = vault
        .app()
        .oneshot(get_request("/logs/..%2Fsecret.txt", Some(TEST_KEY)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = body_json(res).await;
    assert_eq!(json["error"]["type"], "invalid_request_error");
    assert!(!json.to_string().contains("top secret"));

    let lines = vault.audit_lines();
    assert!(lines[0].ends_with(" - Filename: ../secret.txt"));
}

#[tokio::test]
async fn error_bodies_do_not_leak_paths() {
    let vault = create_test_vault(AuthPolicy::all()).await;

    let res = vault
        .app()
        .oneshot(get_request("/logs/missing.log", Some(TEST_KEY)))
        .await
        .unwrap();

    let storage = vault.storage_dir().display().to_string();
    let json = body_json(res).await;
    assert!(!json.to_string().contains(&storage));
}

#[tokio::test]
async fn non_utf8_filename_returns_structured_error_and_is_audited() {
    let vault = create_test_vault(AuthPolicy::all()).await;

    let res = vault
        .app()
        .oneshot(get_request("/logs/%FF.log", Some(TEST_KEY)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = body_json(res).await;
    assert_eq!(json["error"]["type"], "invalid_request_error");
    assert_eq!(json["error"]["message"], "Invalid log filename");

    let lines = vault.audit_lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with(" - Endpoint: Read Log - Filename: \u{FFFD}.log"));
}
