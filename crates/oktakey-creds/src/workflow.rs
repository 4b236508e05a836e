//! The credential update workflow.
//!
//! One run walks these stages in order and moves to `Failed` at the first
//! error:
//!
//! ```text
//! Start -> Loaded -> SecretReplaced -> PolicyResolved -> Validated -> Persisted
//! (any stage before Persisted) -> Failed
//! ```
//!
//! The store is written only on the last transition. A failure anywhere
//! before it leaves the stored record exactly as it was. There is no retry;
//! the caller reruns the whole workflow.

use std::cell::Cell;

use oktakey_core::{AccountKey, CredentialRecord, MfaConfig, SecretString, TelemetryEvent};
use oktakey_secrets::{Item, OpenStore, SecretError, SecretStore};
use tracing::{debug, info};

use crate::codec;
use crate::error::UpdateError;
use crate::mfa;
use crate::prompt::Prompt;
use crate::telemetry::{NoopTelemetry, Telemetry};
use crate::validate;

/// Label attached to stored credential items.
pub const ITEM_LABEL: &str = "okta credentials";

/// Prompt label for the new password.
pub const PASSWORD_PROMPT: &str = "New Okta password";

/// Workflow stages. `Persisted` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Loaded,
    SecretReplaced,
    PolicyResolved,
    Validated,
    Persisted,
    Failed,
}

/// What to update.
#[derive(Debug, Clone, Default)]
pub struct UpdateRequest {
    /// Account whose record is updated.
    pub account: AccountKey,

    /// MFA fields supplied by the operator; unset fields keep stored values.
    pub mfa_overrides: MfaConfig,
}

/// Result of a successful update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub account: AccountKey,
    pub username: String,
    pub backend: &'static str,
    pub mfa: Option<MfaConfig>,
}

/// Read-modify-write of one stored credential record.
pub struct UpdateWorkflow<'a> {
    stores: &'a dyn OpenStore,
    prompt: &'a dyn Prompt,
    telemetry: &'a dyn Telemetry,
    stage: Cell<Stage>,
}

impl<'a> UpdateWorkflow<'a> {
    /// Workflow over the given store source and prompt, without telemetry.
    pub fn new(stores: &'a dyn OpenStore, prompt: &'a dyn Prompt) -> Self {
        Self {
            stores,
            prompt,
            telemetry: &NoopTelemetry,
            stage: Cell::new(Stage::Start),
        }
    }

    /// Report usage to `telemetry`.
    pub fn with_telemetry(mut self, telemetry: &'a dyn Telemetry) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Stage reached by the most recent run.
    pub fn stage(&self) -> Stage {
        self.stage.get()
    }

    /// Run the workflow once.
    pub fn run(&self, request: &UpdateRequest) -> Result<UpdateOutcome, UpdateError> {
        self.stage.set(Stage::Start);
        let result = self.execute(request);
        if let Err(e) = &result {
            debug!(
                account = %request.account,
                failed_at = ?self.stage(),
                "update failed: {e}"
            );
            self.advance(Stage::Failed);
        }
        result
    }

    fn advance(&self, next: Stage) {
        debug!(from = ?self.stage(), to = ?next, "update stage");
        self.stage.set(next);
    }

    fn execute(&self, request: &UpdateRequest) -> Result<UpdateOutcome, UpdateError> {
        let account = &request.account;
        debug!(account = %account, "keyring key");

        let store = self
            .stores
            .open()
            .map_err(|e| UpdateError::StoreUnavailable(e.to_string()))?;

        let mut record = load(store.as_ref(), account)?;
        self.advance(Stage::Loaded);

        self.telemetry
            .track(&TelemetryEvent::ran_command("update", store.backend_name()));

        let password = self.prompt.prompt(PASSWORD_PROMPT, true)?;
        record.secret = SecretString::from(password);
        self.advance(Stage::SecretReplaced);

        let resolved = mfa::resolve(record.mfa_config.as_ref(), &request.mfa_overrides);
        self.advance(Stage::PolicyResolved);

        validate::validate(&record, resolved.as_ref())?;
        self.advance(Stage::Validated);

        if !request.mfa_overrides.is_empty() {
            record.mfa_config = resolved.clone();
        }
        persist(store.as_ref(), account, &record)?;
        self.advance(Stage::Persisted);

        info!(account = %account, username = %record.username, "updated credentials");
        Ok(UpdateOutcome {
            account: account.clone(),
            username: record.username.clone(),
            backend: store.backend_name(),
            mfa: resolved,
        })
    }
}

fn load(store: &dyn SecretStore, account: &AccountKey) -> Result<CredentialRecord, UpdateError> {
    let item = store.get(account.as_str()).map_err(|e| match e {
        SecretError::NotFound(_) => UpdateError::NotFound(account.clone()),
        SecretError::DecryptionFailed(reason) => UpdateError::CorruptRecord {
            account: account.clone(),
            reason,
        },
        other => UpdateError::StoreUnavailable(other.to_string()),
    })?;

    codec::decode(&item.data).map_err(|e| UpdateError::CorruptRecord {
        account: account.clone(),
        reason: e.to_string(),
    })
}

fn persist(
    store: &dyn SecretStore,
    account: &AccountKey,
    record: &CredentialRecord,
) -> Result<(), UpdateError> {
    let encoded = codec::encode(record);
    let item = Item::new(account.as_str(), encoded.to_vec(), ITEM_LABEL);

    store.set(&item).map_err(|e| match e {
        SecretError::PermissionDenied(reason) => UpdateError::WritePermissionDenied(reason),
        other => UpdateError::StoreUnavailable(other.to_string()),
    })
}
