//! Common test utilities and fixtures for integration tests
//!
//! Builds the full application router against an in-memory user store and
//! drives it with `tower::ServiceExt::oneshot`, so no listener or external
//! service is needed.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use argon2::Params;
use axum::{
    body::Body,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method, Request, StatusCode,
    },
    Router,
};
use chrono::TimeDelta;
use http_body_util::BodyExt;
use keystone_app::password::Argon2Passwords;
use keystone_app::store::InMemoryUserStore;
use keystone_auth::{AuthConfig, Content, TokenManager};
use keystone_common::Config;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-secret-0123456789abcdef";
pub const TEST_ISSUER: &str = "keystone-test";
pub const TEST_AUDIENCE: &str = "keystone-clients";

pub const TEST_USERNAME: &str = "alice";
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Status and body of a completed request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Fully wired application plus a token manager sharing its secret
pub struct TestApp {
    pub router: Router,
    pub config: Config,
    pub tokens: TokenManager,
}

impl TestApp {
    /// Build an application with a single seeded user
    pub fn new() -> Result<Self> {
        let vars: HashMap<&str, &str> = [
            ("JWT_SECRET", TEST_SECRET),
            ("JWT_ISSUER", TEST_ISSUER),
            ("JWT_AUDIENCE", TEST_AUDIENCE),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()))?;

        // Low-cost Argon2 parameters keep the suite fast
        let params = Params::new(8, 1, 1, None).map_err(|e| anyhow::anyhow!("{}", e))?;
        let passwords = Argon2Passwords::new(params);
        let hash = passwords.hash_password(TEST_PASSWORD)?;
        let users = InMemoryUserStore::new().with_user(TEST_USERNAME, &hash);

        let router = keystone_app::create_app(&config, Arc::new(users), Arc::new(passwords))?;
        let tokens = TokenManager::from_config(&AuthConfig::from(&config))?;

        Ok(Self {
            router,
            config,
            tokens,
        })
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();

        TestResponse {
            status,
            body: String::from_utf8(body.to_vec()).unwrap(),
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        let payload = serde_json::json!({ "username": username, "password": password });
        self.post_login_body(Some("application/json"), &payload.to_string())
            .await
    }

    /// POST a raw body to `/login`, optionally declaring a content type
    pub async fn post_login_body(&self, content_type: Option<&str>, body: &str) -> TestResponse {
        let mut builder = Request::builder().method(Method::POST).uri("/login");
        if let Some(value) = content_type {
            builder = builder.header(CONTENT_TYPE, value);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// GET `path` with a raw `Authorization` header value
    pub async fn get_with_authorization(&self, path: &str, authorization: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().uri(path);
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn get_with_token(&self, path: &str, token: &str) -> TestResponse {
        self.get_with_authorization(path, Some(&format!("Bearer {}", token)))
            .await
    }

    /// Mint an access token directly, bypassing login
    pub fn token_for(&self, subject: &str, content: Content) -> String {
        self.tokens
            .create_token(subject, TEST_AUDIENCE, TimeDelta::minutes(5), content)
            .unwrap()
    }
}
