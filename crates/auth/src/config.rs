//! Authentication configuration

use std::fmt;

/// Shortest accepted signing secret, in bytes
pub const MIN_SECRET_KEY_SIZE: usize = 32;

/// Authentication configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: String,
    /// When set, verification rejects tokens minted for other audiences
    pub audience: Option<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl From<&keystone_common::Config> for AuthConfig {
    fn from(config: &keystone_common::Config) -> Self {
        Self {
            jwt_secret: config.jwt_secret.clone(),
            issuer: config.jwt_issuer.clone(),
            audience: Some(config.jwt_audience.clone()),
        }
    }
}
