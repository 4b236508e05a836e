//! The secret store contract shared by every backend.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Result, SecretError};

/// Maximum allowed length for an item key.
const MAX_KEY_LEN: usize = 128;

/// A stored item: opaque bytes plus descriptive metadata.
///
/// The data is zeroed when the item is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Item {
    /// Key the item is stored under.
    pub key: String,

    /// Raw item bytes.
    pub data: Vec<u8>,

    /// Human-readable label shown by keyring UIs.
    pub label: String,
}

impl Item {
    /// Create a new item.
    pub fn new(key: impl Into<String>, data: Vec<u8>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            data,
            label: label.into(),
        }
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("key", &self.key)
            .field("data", &format_args!("[{} bytes]", self.data.len()))
            .field("label", &self.label)
            .finish()
    }
}

/// Synchronous key/value access to a secure storage backend.
///
/// Every call blocks until the backend answers. `set` replaces any existing
/// item atomically: a later `get` sees either the old item or the new one.
pub trait SecretStore: Send + Sync {
    /// Name of the backend, as used on the command line and in telemetry.
    fn backend_name(&self) -> &'static str;

    /// Fetch the item stored under `key`.
    ///
    /// Fails with [`SecretError::NotFound`] when no such item exists.
    fn get(&self, key: &str) -> Result<Item>;

    /// Store `item` under `item.key`, replacing any previous value.
    fn set(&self, item: &Item) -> Result<()>;

    /// Delete the item stored under `key`.
    fn remove(&self, key: &str) -> Result<()>;

    /// Check whether an item is stored under `key`.
    fn exists(&self, key: &str) -> Result<bool> {
        match self.get(key) {
            Ok(_) => Ok(true),
            Err(SecretError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Validate that an item key contains only safe characters.
///
/// Allowed: ASCII alphanumeric, underscore, hyphen. Max length 128.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(SecretError::InvalidName("key must not be empty".to_string()));
    }
    if key.len() > MAX_KEY_LEN {
        return Err(SecretError::InvalidName(format!(
            "key exceeds maximum length of {MAX_KEY_LEN} characters"
        )));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(SecretError::InvalidName(format!(
            "key contains invalid characters (allowed: alphanumeric, underscore, hyphen): {key}"
        )));
    }
    Ok(())
}
