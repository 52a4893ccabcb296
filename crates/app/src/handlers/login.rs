//! Credential exchange
//!
//! **POST /login** trades a username and password for a short-lived
//! access token. Unknown users and wrong passwords are indistinguishable
//! to the caller.

use axum::{extract::State, Json};
use chrono::TimeDelta;
use keystone_auth::Content;
use keystone_common::{Error, JsonBody, JsonBodyRejection, Result};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Lifetime of tokens issued at login
pub const TOKEN_LIFETIME_MINUTES: i64 = 15;

const INVALID_CREDENTIALS: &str = "invalid credentials";
const MALFORMED_CREDENTIALS: &str = "malformed credentials";

/// Absent fields decode as empty strings and fail the credential check
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

fn invalid_credentials() -> Error {
    Error::Unauthorized(INVALID_CREDENTIALS.to_string())
}

pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<JsonBody<LoginRequest>, JsonBodyRejection>,
) -> Result<Json<LoginResponse>> {
    let JsonBody(request) = payload.map_err(|e| {
        tracing::debug!(error = %e, "Login rejected: malformed payload");
        Error::Validation(MALFORMED_CREDENTIALS.to_string())
    })?;

    let user = state.users.get_user(&request.username).await.map_err(|e| {
        tracing::warn!(error = %e, username = %request.username, "Login rejected: user lookup failed");
        invalid_credentials()
    })?;

    // Argon2 is CPU-bound; keep it off the async workers
    let passwords = state.passwords.clone();
    let encrypted_password = user.encrypted_password.clone();
    let password = request.password;
    tokio::task::spawn_blocking(move || passwords.verify_password(&password, &encrypted_password))
        .await
        .map_err(|e| Error::Internal(format!("password verification task failed: {}", e)))?
        .map_err(|e| {
            tracing::warn!(error = %e, username = %user.username, "Login rejected: password check failed");
            invalid_credentials()
        })?;

    let access_token = state
        .tokens
        .create_token(
            &user.username,
            &state.audience,
            TimeDelta::minutes(TOKEN_LIFETIME_MINUTES),
            Content::new(),
        )
        .map_err(|e| Error::Internal(format!("could not authenticate user: {}", e)))?;

    tracing::info!(username = %user.username, "Issued access token");

    Ok(Json(LoginResponse { access_token }))
}
