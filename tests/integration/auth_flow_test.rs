//! End-to-end login and protected-route tests

use axum::http::StatusCode;
use keystone_auth::Content;

use crate::common::{TestApp, TEST_AUDIENCE, TEST_ISSUER, TEST_PASSWORD, TEST_USERNAME};

mod common;

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = TestApp::new().unwrap();

    let response = app.get_with_authorization("/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "OK");
}

#[tokio::test]
async fn test_login_token_opens_protected_route() {
    let app = TestApp::new().unwrap();

    let login = app.login(TEST_USERNAME, TEST_PASSWORD).await;
    assert_eq!(login.status, StatusCode::OK);
    let token = login.json()["access_token"].as_str().unwrap().to_string();

    let claims = app.tokens.verify_token(&token).unwrap();
    assert_eq!(claims.issuer, TEST_ISSUER);
    assert_eq!(claims.subject, TEST_USERNAME);
    assert_eq!(claims.audience, vec![TEST_AUDIENCE.to_string()]);
    assert_eq!((claims.expires_at - claims.issued_at).num_minutes(), 15);

    let me = app.get_with_token("/me", &token).await;
    assert_eq!(me.status, StatusCode::OK);

    let body = me.json();
    assert_eq!(body["subject"], TEST_USERNAME);
    assert_eq!(body["token_id"], claims.id.to_string());
}

#[tokio::test]
async fn test_each_login_yields_a_distinct_token() {
    let app = TestApp::new().unwrap();

    let first = app.login(TEST_USERNAME, TEST_PASSWORD).await.json();
    let second = app.login(TEST_USERNAME, TEST_PASSWORD).await.json();

    assert_ne!(first["access_token"], second["access_token"]);
}

#[tokio::test]
async fn test_bad_credentials_are_rejected_uniformly() {
    let app = TestApp::new().unwrap();

    let wrong_password = app.login(TEST_USERNAME, "not it").await;
    let unknown_user = app.login("mallory", TEST_PASSWORD).await;

    for response in [&wrong_password, &unknown_user] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body, "invalid credentials");
    }
}

#[tokio::test]
async fn test_empty_credentials_are_invalid() {
    let app = TestApp::new().unwrap();

    let response = app.login("", "").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, "invalid credentials");
}

#[tokio::test]
async fn test_unparseable_body_is_malformed() {
    let app = TestApp::new().unwrap();

    let response = app.post_login_body(None, r#"{"username": "#).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "malformed credentials");
}

#[tokio::test]
async fn test_login_accepts_body_without_content_type() {
    let app = TestApp::new().unwrap();

    let payload = serde_json::json!({ "username": TEST_USERNAME, "password": TEST_PASSWORD });
    let response = app.post_login_body(None, &payload.to_string()).await;

    assert_eq!(response.status, StatusCode::OK);
    let token = response.json()["access_token"].as_str().unwrap().to_string();
    assert!(app.tokens.verify_token(&token).is_ok());
}

#[tokio::test]
async fn test_content_reaches_handler() {
    let app = TestApp::new().unwrap();

    let mut content = Content::new();
    content.insert("role".to_string(), serde_json::json!("admin"));
    content.insert("scopes".to_string(), serde_json::json!(["read", "write"]));
    let token = app.token_for("bob", content);

    let me = app.get_with_token("/me", &token).await;
    assert_eq!(me.status, StatusCode::OK);

    let body = me.json();
    assert_eq!(body["subject"], "bob");
    assert_eq!(body["content"]["role"], "admin");
    assert_eq!(body["content"]["scopes"][1], "write");
}
