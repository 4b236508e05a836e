//! Error types for the credential update pipeline.

use oktakey_core::AccountKey;
use thiserror::Error;

/// Terminal failure of one update run.
///
/// Each variant is an expected outcome the CLI reports to the operator.
/// None of them leaves a modified record in the store.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Secret store unavailable: {0}")]
    StoreUnavailable(String),

    #[error(
        "No okta credentials stored under '{0}'. Add them first with `oktakey add`"
    )]
    NotFound(AccountKey),

    #[error(
        "Failed to get okta credentials from your keyring ({reason}). \
         Please make sure you have added okta credentials with `oktakey add`"
    )]
    CorruptRecord { account: AccountKey, reason: String },

    #[error("Could not read the new password: {0}")]
    PromptAborted(#[from] PromptError),

    #[error("Failed to validate credentials: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to store credentials: {0}")]
    WritePermissionDenied(String),
}

/// A structural or MFA policy violation in a credential record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("username must not be empty")]
    EmptyUsername,

    #[error("password must not be empty")]
    EmptySecret,

    #[error("unsupported MFA factor type '{0}'")]
    UnknownFactor(String),

    #[error("unsupported MFA provider '{0}'")]
    UnknownProvider(String),

    #[error("MFA provider '{provider}' does not support factor '{factor}'")]
    UnsupportedCombination { provider: String, factor: String },

    #[error("MFA factor '{factor}' requires a device identifier (--mfa-device)")]
    MissingDevice { factor: String },
}

/// Failure of the interactive prompt collaborator.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input is not an interactive terminal")]
    NotInteractive,

    #[error("input aborted")]
    Aborted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
