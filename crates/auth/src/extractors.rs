//! Axum extractors for authenticated requests

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::claims::Claims;
use crate::context;
use crate::error::GateError;

/// Claims of the token that authenticated this request.
///
/// Only available behind [`require_bearer`](crate::require_bearer); on an
/// ungated route the extractor rejects with 401.
#[derive(Debug, Clone)]
pub struct AuthClaims(pub Claims);

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = GateError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        context::claims_from_extensions(&parts.extensions)
            .cloned()
            .map(AuthClaims)
            .ok_or(GateError::Unauthenticated)
    }
}
