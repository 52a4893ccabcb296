//! Keystone application composition root
//!
//! Wires the user store, password verifier, and token manager into a
//! router whose protected routes sit behind the bearer-token gate.

pub mod handlers;
pub mod password;
pub mod store;

use std::sync::Arc;

use axum::{
    http::header::USER_AGENT,
    middleware,
    routing::{get, post},
    Router,
};
use keystone_auth::{require_bearer, AuthConfig, AuthGate, TokenIssuer, TokenManager, TokenVerifier};
use keystone_common::{header::REQUEST_ID, request_logger, skipper, Config, RequestLogger};

use crate::password::PasswordVerifier;
use crate::store::UserStore;

/// Paths reachable without a bearer token
pub const PUBLIC_PATHS: [&str; 2] = ["/health", "/login"];

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub passwords: Arc<dyn PasswordVerifier>,
    pub tokens: Arc<dyn TokenIssuer>,
    /// Audience asserted on issued tokens
    pub audience: String,
}

/// Build the routes and install the authentication gate.
///
/// Everything except [`PUBLIC_PATHS`] requires a token accepted by
/// `verifier`.
pub fn routes(state: AppState, verifier: Arc<dyn TokenVerifier>) -> Router {
    let gate = AuthGate::new(verifier, skipper::paths(PUBLIC_PATHS));

    Router::new()
        .route("/health", get(health_check))
        .route("/login", post(handlers::login))
        .route("/me", get(handlers::me))
        .with_state(state)
        .layer(middleware::from_fn_with_state(gate, require_bearer))
}

/// Create the main application router with all routes and middleware
pub fn create_app(
    config: &Config,
    users: Arc<dyn UserStore>,
    passwords: Arc<dyn PasswordVerifier>,
) -> Result<Router, anyhow::Error> {
    let auth_config = AuthConfig::from(config);
    let tokens = Arc::new(
        TokenManager::from_config(&auth_config)
            .map_err(|e| anyhow::anyhow!("Invalid token configuration: {}", e))?,
    );

    let state = AppState {
        users,
        passwords,
        tokens: tokens.clone(),
        audience: config.jwt_audience.clone(),
    };

    let logger = RequestLogger::new(skipper::paths(["/health"]))
        .with_headers([REQUEST_ID, USER_AGENT]);

    let app = routes(state, tokens)
        .layer(middleware::from_fn_with_state(logger, request_logger));

    Ok(app)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
