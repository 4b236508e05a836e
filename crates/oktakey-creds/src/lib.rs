//! Credential update pipeline for oktakey.
//!
//! Reads an existing [`CredentialRecord`] from a secret store, swaps in a new
//! password from a [`Prompt`], merges MFA policy, validates, and writes the
//! record back. Nothing is written unless every earlier stage succeeded.
//!
//! [`CredentialRecord`]: oktakey_core::CredentialRecord

pub mod codec;
pub mod error;
pub mod mfa;
pub mod prompt;
pub mod telemetry;
pub mod validate;
pub mod workflow;

pub use error::{PromptError, UpdateError, ValidationError};
pub use prompt::Prompt;
pub use telemetry::{JsonlTelemetry, NoopTelemetry, Telemetry};
pub use workflow::{Stage, UpdateOutcome, UpdateRequest, UpdateWorkflow};
