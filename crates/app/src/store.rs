//! User lookup capability
//!
//! Login depends only on [`UserStore`]; `InMemoryUserStore` backs the
//! server binary and the tests.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A stored account
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    /// PHC-formatted password hash
    pub encrypted_password: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("user not found")]
    NotFound,

    #[error("user store unavailable: {0}")]
    Unavailable(String),
}

/// Account lookup trait for different implementations
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, username: &str) -> Result<User, StoreError>;
}

/// Process-local user store
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with_user(self, username: &str, encrypted_password: &str) -> Self {
        self.insert(User {
            username: username.to_string(),
            encrypted_password: encrypted_password.to_string(),
        });
        self
    }

    /// Insert or replace a user
    pub fn insert(&self, user: User) {
        self.write().insert(user.username.clone(), user);
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Writes are single map operations, so a poisoned map is still consistent
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, User>> {
        self.users.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, User>> {
        self.users.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn get_user(&self, username: &str) -> Result<User, StoreError> {
        self.read().get(username).cloned().ok_or(StoreError::NotFound)
    }
}
