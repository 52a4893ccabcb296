//! Token claims

use chrono::{serde::ts_seconds, DateTime, SubsecRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TokenError;

/// Token type carried by tokens issued at login
pub const ACCESS_TOKEN: &str = "access";

/// Opaque application payload carried by a token
pub type Content = serde_json::Map<String, serde_json::Value>;

/// Assertions embedded in a token.
///
/// Serialized with the registered JWT claim names; `content` is omitted
/// from the payload when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "iss")]
    pub issuer: String,
    #[serde(rename = "sub")]
    pub subject: String,
    #[serde(rename = "aud")]
    pub audience: Vec<String>,
    #[serde(rename = "iat", with = "ts_seconds")]
    pub issued_at: DateTime<Utc>,
    #[serde(rename = "nbf", with = "ts_seconds")]
    pub not_before: DateTime<Utc>,
    #[serde(rename = "exp", with = "ts_seconds")]
    pub expires_at: DateTime<Utc>,
    /// Unique token id, random per token
    #[serde(rename = "jti")]
    pub id: Uuid,
    #[serde(rename = "typ")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Content::is_empty")]
    pub content: Content,
}

impl Claims {
    /// Build claims valid from now for `duration`.
    ///
    /// Timestamps are truncated to whole seconds, so `duration` must be at
    /// least one second for `issued_at < expires_at` to survive encoding.
    pub fn new(
        issuer: &str,
        subject: &str,
        audience: &str,
        duration: TimeDelta,
        token_type: &str,
        content: Content,
    ) -> Result<Self, TokenError> {
        if duration < TimeDelta::seconds(1) {
            return Err(TokenError::InvalidLifetime);
        }

        let now = Utc::now().trunc_subsecs(0);
        let expires_at = now
            .checked_add_signed(duration)
            .ok_or(TokenError::InvalidLifetime)?
            .trunc_subsecs(0);

        Ok(Self {
            issuer: issuer.to_string(),
            subject: subject.to_string(),
            audience: vec![audience.to_string()],
            issued_at: now,
            not_before: now,
            expires_at,
            id: new_token_id()?,
            token_type: token_type.to_string(),
            content,
        })
    }

    /// Check token type, then expiry, against the current time
    pub fn validate(&self, expected_type: &str) -> Result<(), TokenError> {
        self.validate_at(expected_type, Utc::now())
    }

    /// Check token type, then expiry, against `now`.
    ///
    /// The type is checked first so a token of the wrong kind never
    /// reports that it has expired.
    pub fn validate_at(&self, expected_type: &str, now: DateTime<Utc>) -> Result<(), TokenError> {
        if self.token_type != expected_type {
            return Err(TokenError::InvalidToken);
        }

        if now > self.expires_at {
            return Err(TokenError::ExpiredToken);
        }

        Ok(())
    }
}

fn new_token_id() -> Result<Uuid, TokenError> {
    let mut bytes = [0u8; 16];
    getrandom::getrandom(&mut bytes).map_err(TokenError::IdentifierGeneration)?;
    Ok(uuid::Builder::from_random_bytes(bytes).into_uuid())
}
