//! # oktakey-core
//!
//! Core types, configuration, and utilities for oktakey.
//!
//! This crate provides shared functionality used across all oktakey crates:
//!
//! - **Configuration**: Loading, validation, and persistence of the config file
//! - **Types**: Credential records, MFA policy, account keys, telemetry events
//! - **Utilities**: Path resolution, environment handling, and secret strings

pub mod config;
pub mod types;
pub mod error;
pub mod paths;
pub mod env;
pub mod secret;

// Re-exports for convenience
pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
pub use secret::SecretString;
