//! Bearer-token authentication middleware
//!
//! Install with `axum::middleware::from_fn_with_state(gate, require_bearer)`.
//! Rejected requests never reach the inner service.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use keystone_common::Skipper;

use crate::claims::Claims;
use crate::context;
use crate::error::GateError;
use crate::jwt::TokenVerifier;

const BEARER_PREFIX: &str = "Bearer ";

/// Authentication gate state: a token verifier and a bypass predicate
#[derive(Clone)]
pub struct AuthGate {
    verifier: Arc<dyn TokenVerifier>,
    skipper: Skipper,
}

impl AuthGate {
    pub fn new(verifier: Arc<dyn TokenVerifier>, skipper: Skipper) -> Self {
        Self { verifier, skipper }
    }

    /// Whether this request bypasses authentication
    pub fn skips(&self, req: &Request) -> bool {
        (self.skipper)(req)
    }

    /// Extract and verify the bearer token carried by `headers`
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Claims, GateError> {
        let token = extract_bearer_token(headers)?;
        Ok(self.verifier.verify_token(token)?)
    }
}

/// Pull the token out of `Authorization: Bearer <token>`
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, GateError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(GateError::MissingAuthHeader)?;

    if header.is_empty() {
        return Err(GateError::MissingAuthHeader);
    }

    header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .ok_or(GateError::MissingBearerPrefix)
}

/// Verify the bearer token, attach its claims, and forward the request.
///
/// Every rejection returns 401 immediately.
pub async fn require_bearer(State(gate): State<AuthGate>, mut req: Request, next: Next) -> Response {
    if gate.skips(&req) {
        return next.run(req).await;
    }

    match gate.authenticate(req.headers()) {
        Ok(claims) => {
            tracing::debug!(subject = %claims.subject, token_id = %claims.id, "Request authenticated");
            context::attach(req.extensions_mut(), claims);
            next.run(req).await
        }
        Err(err) => {
            match &err {
                GateError::Token(e) if !e.is_client_error() => {
                    tracing::error!(error = %e, path = %req.uri().path(), "Token verification failed");
                }
                _ => {
                    tracing::debug!(error = %err, path = %req.uri().path(), "Request rejected");
                }
            }
            err.into_response()
        }
    }
}
