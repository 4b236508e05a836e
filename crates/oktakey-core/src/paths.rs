//! Path resolution utilities.

use crate::env;
use crate::error::ConfigError;
use std::path::PathBuf;

/// Get the oktakey base directory (`$OKTAKEY_HOME`, else `~/.oktakey`).
pub fn base_dir() -> Result<PathBuf, ConfigError> {
    if let Some(home) = env::get_var(env::vars::OKTAKEY_HOME) {
        return Ok(expand_tilde(&home));
    }

    let home = dirs::home_dir().ok_or_else(|| {
        ConfigError::Validation("Could not determine home directory".to_string())
    })?;
    Ok(home.join(".oktakey"))
}

/// Get the main config file path (`<base>/oktakey.json5`).
pub fn config_file() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("oktakey.json5"))
}

/// Get the default directory of the encrypted file backend (`<base>/keyring`).
pub fn file_keyring_dir() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("keyring"))
}

/// Get the local telemetry log (`<base>/telemetry.jsonl`).
pub fn telemetry_file() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("telemetry.jsonl"))
}

/// Expand tilde (~) in a path.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/keys");
        assert!(!expanded.to_string_lossy().contains('~'));
        assert!(expanded.ends_with("keys"));
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("/var/lib/oktakey"), PathBuf::from("/var/lib/oktakey"));
        assert_eq!(expand_tilde("relative/dir"), PathBuf::from("relative/dir"));
    }

    #[test]
    fn test_derived_paths_share_base() {
        let base = base_dir().unwrap();
        assert!(config_file().unwrap().starts_with(&base));
        assert!(file_keyring_dir().unwrap().ends_with("keyring"));
        assert!(telemetry_file().unwrap().ends_with("telemetry.jsonl"));
    }
}
