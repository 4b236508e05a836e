//! Account keys addressing stored credential records.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of the default (unnamed) account.
pub const DEFAULT_ACCOUNT_KEY: &str = "okta-creds";

/// Maximum length of an account alias.
const MAX_ALIAS_LEN: usize = 64;

/// Store key derived from an optional account alias.
///
/// No alias maps to [`DEFAULT_ACCOUNT_KEY`]; alias `a` maps to `okta-creds-a`.
/// Aliases are limited to ASCII alphanumerics, `_` and `-`, so every key is a
/// valid entry name for every backend and distinct aliases never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountKey(String);

impl AccountKey {
    /// Key of the default account.
    pub fn default_account() -> Self {
        Self(DEFAULT_ACCOUNT_KEY.to_string())
    }

    /// Derive the key for `alias`. `None` and the empty alias select the
    /// default account.
    pub fn from_alias(alias: Option<&str>) -> Result<Self> {
        match alias.map(str::trim) {
            None | Some("") => Ok(Self::default_account()),
            Some(alias) => {
                validate_alias(alias)?;
                Ok(Self(format!("{DEFAULT_ACCOUNT_KEY}-{alias}")))
            }
        }
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AccountKey {
    fn default() -> Self {
        Self::default_account()
    }
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AccountKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn validate_alias(alias: &str) -> Result<()> {
    if alias.len() > MAX_ALIAS_LEN {
        return Err(Error::InvalidAlias(format!(
            "alias exceeds maximum length of {MAX_ALIAS_LEN} characters"
        )));
    }
    if !alias
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(Error::InvalidAlias(format!(
            "'{alias}' contains invalid characters (allowed: alphanumeric, underscore, hyphen)"
        )));
    }
    Ok(())
}
