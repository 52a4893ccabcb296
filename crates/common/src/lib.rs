//! Shared utilities, configuration, and error handling for Keystone
//!
//! This crate provides common functionality used across the Keystone services:
//! - Configuration management following 12-factor principles
//! - Error types rendered as plain-text HTTP responses
//! - Header helpers, request skippers, and the request logging middleware

pub mod config;
pub mod error;
pub mod extractors;
pub mod header;
pub mod logger;
pub mod skipper;

pub use config::{Config, LogFormat};
pub use error::{Error, Result};
pub use extractors::{JsonBody, JsonBodyRejection};
pub use logger::{request_logger, RequestLogger};
pub use skipper::Skipper;
