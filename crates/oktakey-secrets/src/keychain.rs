//! OS keyring integration.
//!
//! Two jobs live here:
//! - [`NativeStore`], the `keychain`/`wincred`/`keyctl` backends, built on the
//!   `keyring` crate (compiled in with the `keychain` feature).
//! - Master key resolution for the encrypted file backend:
//!   1. `OKTAKEY_MASTER_KEY` environment variable (hex-encoded)
//!   2. OS keyring entry, created on first use (macOS and Windows only; the
//!      Linux kernel keyring does not survive a reboot)

use oktakey_core::env::{self, vars};
use oktakey_core::BackendType;
use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto;
use crate::error::{Result, SecretError};
use crate::store::{validate_key, Item, SecretStore};

/// Keyring service name all oktakey entries are filed under.
pub const SERVICE_NAME: &str = "oktakey";

/// Keyring account holding the file backend's master key.
const MASTER_KEY_ACCOUNT: &str = "file-master-key";

/// The native keyring backend compiled for this platform, if any.
pub fn native_backend() -> Option<BackendType> {
    if !cfg!(feature = "keychain") {
        return None;
    }
    if cfg!(target_os = "macos") {
        Some(BackendType::Keychain)
    } else if cfg!(target_os = "windows") {
        Some(BackendType::WinCred)
    } else if cfg!(target_os = "linux") {
        Some(BackendType::KeyCtl)
    } else {
        None
    }
}

/// Resolve the master key of the encrypted file backend.
pub fn file_master_key() -> Result<Zeroizing<Vec<u8>>> {
    if let Some(hex_key) = env::get_var(vars::OKTAKEY_MASTER_KEY) {
        debug!("using file backend master key from environment");
        return parse_master_key(&hex_key);
    }

    match native_backend() {
        Some(BackendType::Keychain) | Some(BackendType::WinCred) => keyring_master_key(),
        _ => Err(SecretError::Unavailable(format!(
            "the file backend needs a master key: set {} to 64 hex characters",
            vars::OKTAKEY_MASTER_KEY
        ))),
    }
}

fn parse_master_key(hex_key: &str) -> Result<Zeroizing<Vec<u8>>> {
    let key = Zeroizing::new(hex::decode(hex_key.trim()).map_err(|e| {
        SecretError::KeychainError(format!("invalid hex in {}: {e}", vars::OKTAKEY_MASTER_KEY))
    })?);
    if key.len() != crypto::KEY_SIZE {
        return Err(SecretError::KeychainError(format!(
            "{} must decode to exactly {} bytes, got {}",
            vars::OKTAKEY_MASTER_KEY,
            crypto::KEY_SIZE,
            key.len()
        )));
    }
    Ok(key)
}

#[cfg(feature = "keychain")]
fn keyring_master_key() -> Result<Zeroizing<Vec<u8>>> {
    let entry = keyring::Entry::new(SERVICE_NAME, MASTER_KEY_ACCOUNT)
        .map_err(|e| SecretError::Unavailable(format!("keyring entry: {e}")))?;

    match entry.get_secret() {
        Ok(data) => {
            debug!("using file backend master key from OS keyring");
            let hex_key = Zeroizing::new(String::from_utf8(data).map_err(|e| {
                SecretError::KeychainError(format!("keyring master key is not UTF-8: {e}"))
            })?);
            parse_master_key(&hex_key)
        }
        Err(keyring::Error::NoEntry) => {
            debug!("generating new file backend master key");
            let key = crypto::generate_master_key();
            let hex_key = Zeroizing::new(hex::encode(&key[..]));
            entry
                .set_secret(hex_key.as_bytes())
                .map_err(|e| SecretError::KeychainError(format!("keyring write failed: {e}")))?;
            Ok(key)
        }
        Err(e) => Err(SecretError::Unavailable(format!("keyring read failed: {e}"))),
    }
}

#[cfg(not(feature = "keychain"))]
fn keyring_master_key() -> Result<Zeroizing<Vec<u8>>> {
    Err(SecretError::Unavailable(
        "built without OS keyring support".to_string(),
    ))
}

/// Secret store backed by the platform keyring.
///
/// Entries are filed under [`SERVICE_NAME`] with the item key as account.
/// The platform stores do not carry a free-form label, so items read back
/// get the service name as label.
pub struct NativeStore {
    backend: BackendType,
}

impl NativeStore {
    /// Open the native backend for this platform.
    ///
    /// Fails with [`SecretError::Unavailable`] when `backend` is not the
    /// keyring compiled for this platform.
    pub fn open(backend: BackendType) -> Result<Self> {
        if native_backend() != Some(backend) {
            return Err(SecretError::Unavailable(format!(
                "backend '{backend}' is not available on this platform"
            )));
        }
        Ok(Self { backend })
    }
}

#[cfg(feature = "keychain")]
impl NativeStore {
    fn entry(&self, key: &str) -> Result<keyring::Entry> {
        validate_key(key)?;
        keyring::Entry::new(SERVICE_NAME, key)
            .map_err(|e| SecretError::Unavailable(format!("{}: {e}", self.backend)))
    }
}

#[cfg(feature = "keychain")]
impl SecretStore for NativeStore {
    fn backend_name(&self) -> &'static str {
        self.backend.as_str()
    }

    fn get(&self, key: &str) -> Result<Item> {
        match self.entry(key)?.get_secret() {
            Ok(data) => {
                debug!(key, backend = %self.backend, "read item from keyring");
                Ok(Item::new(key, data, SERVICE_NAME))
            }
            Err(keyring::Error::NoEntry) => Err(SecretError::NotFound(key.to_string())),
            Err(e) => Err(SecretError::Unavailable(format!(
                "{} read failed: {e}",
                self.backend
            ))),
        }
    }

    fn set(&self, item: &Item) -> Result<()> {
        debug!(key = %item.key, backend = %self.backend, "writing item to keyring");
        self.entry(&item.key)?
            .set_secret(&item.data)
            .map_err(|e| match e {
                keyring::Error::NoStorageAccess(_) => {
                    SecretError::PermissionDenied(format!("{} refused the write: {e}", self.backend))
                }
                _ => SecretError::Unavailable(format!("{} write failed: {e}", self.backend)),
            })
    }

    fn remove(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Err(SecretError::NotFound(key.to_string())),
            Err(e) => Err(SecretError::Unavailable(format!(
                "{} delete failed: {e}",
                self.backend
            ))),
        }
    }
}

#[cfg(not(feature = "keychain"))]
impl SecretStore for NativeStore {
    fn backend_name(&self) -> &'static str {
        self.backend.as_str()
    }

    fn get(&self, key: &str) -> Result<Item> {
        validate_key(key)?;
        Err(SecretError::Unavailable("built without OS keyring support".to_string()))
    }

    fn set(&self, item: &Item) -> Result<()> {
        validate_key(&item.key)?;
        Err(SecretError::Unavailable("built without OS keyring support".to_string()))
    }

    fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        Err(SecretError::Unavailable("built without OS keyring support".to_string()))
    }
}
