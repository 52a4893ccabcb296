//! Token creation and verification

use std::fmt;

use chrono::TimeDelta;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use crate::claims::{Claims, Content, ACCESS_TOKEN};
use crate::config::{AuthConfig, MIN_SECRET_KEY_SIZE};
use crate::error::TokenError;

/// The only algorithm accepted on incoming tokens
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Capability to verify a token string into claims
pub trait TokenVerifier: Send + Sync {
    fn verify_token(&self, token: &str) -> Result<Claims, TokenError>;
}

/// Capability to mint a signed access token
pub trait TokenIssuer: Send + Sync {
    fn create_token(
        &self,
        subject: &str,
        audience: &str,
        duration: TimeDelta,
        content: Content,
    ) -> Result<String, TokenError>;
}

/// Signs and verifies HS256 tokens for a single issuer.
///
/// Immutable after construction; clone it or share it behind an `Arc`.
#[derive(Clone)]
pub struct TokenManager {
    issuer: String,
    audience: Option<String>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenManager")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}

impl TokenManager {
    /// Create a manager, rejecting secrets shorter than 32 bytes
    pub fn new(secret: impl AsRef<[u8]>, issuer: impl Into<String>) -> Result<Self, TokenError> {
        let secret = secret.as_ref();
        if secret.len() < MIN_SECRET_KEY_SIZE {
            return Err(TokenError::InvalidSecretKey);
        }

        Ok(Self {
            issuer: issuer.into(),
            audience: None,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        })
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self, TokenError> {
        let manager = Self::new(&config.jwt_secret, config.issuer.clone())?;

        Ok(match &config.audience {
            Some(audience) => manager.with_audience(audience.clone()),
            None => manager,
        })
    }

    /// Only accept tokens whose audience contains `audience`
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Sign an access token for `subject`
    pub fn create_token(
        &self,
        subject: &str,
        audience: &str,
        duration: TimeDelta,
        content: Content,
    ) -> Result<String, TokenError> {
        self.create_token_of_type(subject, audience, duration, ACCESS_TOKEN, content)
    }

    pub fn create_token_of_type(
        &self,
        subject: &str,
        audience: &str,
        duration: TimeDelta,
        token_type: &str,
        content: Content,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(&self.issuer, subject, audience, duration, token_type, content)?;

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            TokenError::Signing(e)
        })
    }

    /// Verify an access token
    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_token_of_type(token, ACCESS_TOKEN)
    }

    /// Verify signature, algorithm, issuer, audience and validity window,
    /// then the token type.
    pub fn verify_token_of_type(&self, token: &str, expected_type: &str) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation()).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::ExpiredToken,
                _ => {
                    tracing::debug!(error = %e, "JWT validation failed");
                    TokenError::InvalidToken
                }
            },
        )?;

        let claims = token_data.claims;
        claims.validate(expected_type)?;

        Ok(claims)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.validate_nbf = true;
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);
        validation.set_issuer(&[&self.issuer]);

        if let Some(aud) = &self.audience {
            validation.set_audience(&[aud]);
        } else {
            validation.validate_aud = false;
        }

        validation
    }
}

impl TokenVerifier for TokenManager {
    fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        TokenManager::verify_token(self, token)
    }
}

impl TokenIssuer for TokenManager {
    fn create_token(
        &self,
        subject: &str,
        audience: &str,
        duration: TimeDelta,
        content: Content,
    ) -> Result<String, TokenError> {
        TokenManager::create_token(self, subject, audience, duration, content)
    }
}
