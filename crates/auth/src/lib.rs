//! Authentication core for Keystone
//!
//! Issues and verifies HS256 identity tokens and provides an axum
//! middleware that gates requests on a verified bearer token, attaching
//! the resulting claims to the request for downstream handlers.

mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod gate;
mod jwt;

pub use claims::{Claims, Content, ACCESS_TOKEN};
pub use config::{AuthConfig, MIN_SECRET_KEY_SIZE};
pub use context::claims_from_extensions;
pub use error::{GateError, TokenError};
pub use extractors::AuthClaims;
pub use gate::{require_bearer, AuthGate};
pub use jwt::{TokenIssuer, TokenManager, TokenVerifier};
