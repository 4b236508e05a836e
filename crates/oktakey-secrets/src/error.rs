//! Error types for secret storage.

use thiserror::Error;

/// Errors that can occur during secret store operations.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Secret store unavailable: {0}")]
    Unavailable(String),

    #[error("No item stored under '{0}'")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Keychain error: {0}")]
    KeychainError(String),

    #[error("Invalid item key: {0}")]
    InvalidName(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result alias for secret operations.
pub type Result<T> = std::result::Result<T, SecretError>;
