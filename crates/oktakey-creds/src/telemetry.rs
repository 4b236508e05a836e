//! Best-effort usage telemetry.
//!
//! Tracking never fails from the caller's point of view: sinks swallow and
//! log their own errors.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use oktakey_core::TelemetryEvent;
use tracing::{debug, warn};

/// Sink for usage events.
pub trait Telemetry {
    /// Record `event`. Must not panic and must not block for long.
    fn track(&self, event: &TelemetryEvent);
}

/// Telemetry that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetry;

impl Telemetry for NoopTelemetry {
    fn track(&self, _event: &TelemetryEvent) {}
}

/// Appends events as JSON lines to a local file.
#[derive(Debug, Clone)]
pub struct JsonlTelemetry {
    path: PathBuf,
}

impl JsonlTelemetry {
    /// Sink writing to `path`; parent directories are created on demand.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn append(&self, event: &TelemetryEvent) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&line)
    }
}

impl Telemetry for JsonlTelemetry {
    fn track(&self, event: &TelemetryEvent) {
        match self.append(event) {
            Ok(()) => debug!(event = %event.event, command = %event.command, "recorded telemetry"),
            Err(e) => warn!(path = %self.path.display(), "dropping telemetry event: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_appends_json_lines() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("telemetry.jsonl");
        let sink = JsonlTelemetry::new(path.clone());

        sink.track(&TelemetryEvent::ran_command("update", "file"));
        sink.track(&TelemetryEvent::ran_command("update", "keychain"));

        let content = std::fs::read_to_string(&path).unwrap();
        let events: Vec<TelemetryEvent> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].backend, "keychain");
    }

    #[test]
    fn test_unwritable_path_is_swallowed() {
        let tmp = TempDir::new().unwrap();
        // A directory where the file should be makes every append fail.
        let sink = JsonlTelemetry::new(tmp.path().to_path_buf());
        sink.track(&TelemetryEvent::ran_command("update", "file"));
    }
}
