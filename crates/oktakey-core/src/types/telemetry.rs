//! Usage telemetry events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the event recorded whenever a command runs.
pub const RAN_COMMAND: &str = "Ran Command";

/// A command usage event.
///
/// Carries no credential data: only what ran, where, and against which backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryEvent {
    /// Timestamp.
    pub timestamp: DateTime<Utc>,

    /// Event name.
    pub event: String,

    /// Command that ran, e.g. `update`.
    pub command: String,

    /// Backend the command used.
    pub backend: String,

    /// oktakey version.
    pub version: String,

    /// Hostname (if available).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

impl TelemetryEvent {
    /// Create a "Ran Command" event for `command` against `backend`.
    pub fn ran_command(command: impl Into<String>, backend: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            event: RAN_COMMAND.to_string(),
            command: command.into(),
            backend: backend.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            hostname: hostname::get().ok().map(|h| h.to_string_lossy().to_string()),
        }
    }
}
