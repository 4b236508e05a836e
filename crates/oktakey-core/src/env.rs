//! Environment variable handling.

use std::env;

/// Get an environment variable, returning None if not set or empty.
pub fn get_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable as a boolean.
pub fn get_bool(name: &str) -> bool {
    get_var(name)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

/// Environment variable names read by oktakey.
pub mod vars {
    /// Base directory override.
    pub const OKTAKEY_HOME: &str = "OKTAKEY_HOME";

    /// Config file override.
    pub const OKTAKEY_CONFIG: &str = "OKTAKEY_CONFIG";

    /// Secret store backend filter.
    pub const OKTAKEY_BACKEND: &str = "OKTAKEY_BACKEND";

    /// Hex-encoded master key for the encrypted file backend.
    pub const OKTAKEY_MASTER_KEY: &str = "OKTAKEY_MASTER_KEY";

    /// Opt-in switch for local telemetry.
    pub const OKTAKEY_TELEMETRY: &str = "OKTAKEY_TELEMETRY";

    /// MFA provider override.
    pub const OKTAKEY_MFA_PROVIDER: &str = "OKTAKEY_MFA_PROVIDER";

    /// MFA factor type override.
    pub const OKTAKEY_MFA_FACTOR_TYPE: &str = "OKTAKEY_MFA_FACTOR_TYPE";

    /// MFA device override.
    pub const OKTAKEY_MFA_DEVICE: &str = "OKTAKEY_MFA_DEVICE";
}
