//! HTTP handlers

pub mod login;
pub mod me;

pub use login::{login, LoginRequest, LoginResponse, TOKEN_LIFETIME_MINUTES};
pub use me::{me, MeResponse};
