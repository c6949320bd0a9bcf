//! Contract Test: 認証ポリシーによるルートごとのAPIキー要求

use axum::http::StatusCode;
use logvault::config::AuthPolicy;
use tower::ServiceExt;

use crate::support::vault::{create_test_vault, get_request};

#[tokio::test]
async fn default_policy_requires_key_on_every_route() {
    let vault = create_test_vault(AuthPolicy::default()).await;
    vault.write_log("app.log", b"x");
    let app = vault.app();

    for uri in ["/logs", "/logs/app.log", "/logs/download/app.log"] {
        let res = app.clone().oneshot(get_request(uri, None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }
    assert_eq!(vault.audit_lines().len(), 3);
}

#[tokio::test]
async fn open_policy_serves_without_key() {
    let vault = create_test_vault(AuthPolicy::none()).await;
    vault.write_log("app.log", b"x");
    let app = vault.app();

    for uri in ["/logs", "/logs/app.log", "/logs/download/app.log"] {
        let res = app.clone().oneshot(get_request(uri, None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{}", uri);
    }

    let lines = vault.audit_lines();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| l.contains(" - User: anonymous - ")));
}

#[tokio::test]
async fn open_policy_still_audits_presented_key() {
    let vault = create_test_vault(AuthPolicy::none()).await;
    vault.write_log("app.log", b"x");

    vault
        .app()
        .oneshot(get_request("/logs", Some("whatever")))
        .await
        .unwrap();

    assert!(vault.audit_lines()[0].contains(" - User: whatever - "));
}

#[tokio::test]
async fn parsed_policy_applies_per_route() {
    let vault = create_test_vault(AuthPolicy::parse("download").unwrap()).await;
    vault.write_log("app.log", b"x");
    let app = vault.app();

    let res = app
        .clone()
        .oneshot(get_request("/logs/app.log", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .oneshot(get_request("/logs/download/app.log", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
