//! Password verification capability backed by Argon2id

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier as _, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password does not match")]
    Mismatch,

    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),

    #[error("argon2 error: {0}")]
    Hashing(String),
}

/// Checks a plaintext password against a stored hash
pub trait PasswordVerifier: Send + Sync {
    fn verify_password(&self, password: &str, encrypted_password: &str) -> Result<(), PasswordError>;
}

/// Argon2id hasher and verifier using PHC string format.
#[derive(Debug, Clone, Default)]
pub struct Argon2Passwords {
    params: Params,
}

impl Argon2Passwords {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash password with a fresh random salt
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::Hashing(e.to_string()))?;

        Ok(hash.to_string())
    }
}

impl PasswordVerifier for Argon2Passwords {
    fn verify_password(&self, password: &str, encrypted_password: &str) -> Result<(), PasswordError> {
        let parsed = PasswordHash::new(encrypted_password)
            .map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        self.argon2()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| PasswordError::Mismatch)
    }
}
