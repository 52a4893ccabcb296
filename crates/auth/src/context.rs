//! Request-scoped identity
//!
//! Verified claims travel in the request extensions wrapped in a type that
//! only this crate can name, so no other layer can insert or overwrite them.

use axum::http::Extensions;

use crate::claims::Claims;

#[derive(Debug, Clone)]
pub(crate) struct VerifiedClaims(pub(crate) Claims);

/// Attach verified claims to a request's extensions
pub(crate) fn attach(extensions: &mut Extensions, claims: Claims) {
    extensions.insert(VerifiedClaims(claims));
}

/// Claims attached by the authentication gate, if the request passed it
pub fn claims_from_extensions(extensions: &Extensions) -> Option<&Claims> {
    extensions.get::<VerifiedClaims>().map(|verified| &verified.0)
}
