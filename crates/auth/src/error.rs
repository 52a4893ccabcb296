//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Errors raised while building, signing, or verifying tokens
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("secret key is too short")]
    InvalidSecretKey,

    #[error("token is invalid")]
    InvalidToken,

    #[error("token has expired")]
    ExpiredToken,

    #[error("token lifetime must be positive and representable")]
    InvalidLifetime,

    #[error("unable to generate token id: {0}")]
    IdentifierGeneration(#[source] getrandom::Error),

    #[error("could not sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl TokenError {
    /// Whether the failure is the caller's fault (bad or stale token)
    /// rather than an internal fault of the issuing service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, TokenError::InvalidToken | TokenError::ExpiredToken)
    }
}

/// Rejections produced by the authentication gate.
///
/// Every variant answers 401 with its message as a plain-text body.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("Authorization header is required")]
    MissingAuthHeader,

    #[error("missing Bearer token")]
    MissingBearerPrefix,

    /// A handler asked for claims on a route the gate does not cover
    #[error("request is not authenticated")]
    Unauthenticated,

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl GateError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
