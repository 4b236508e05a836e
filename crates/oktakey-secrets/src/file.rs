//! Encrypted file backend.
//!
//! Each item is sealed with [`crate::crypto`] and written as one JSON file at
//! `{base_dir}/{key}.json`. Writes go to a temporary file that is renamed
//! into place, so a reader never observes a half-written item.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::{self, Sealed};
use crate::error::{Result, SecretError};
use crate::store::{validate_key, Item, SecretStore};

/// On-disk representation of an encrypted item.
#[derive(Debug, Serialize, Deserialize)]
struct StoredItem {
    /// Item label, kept in clear for listing tools.
    label: String,
    /// `nonce || ciphertext`, base64-encoded.
    encrypted_value: String,
    /// HKDF salt, hex-encoded.
    salt: String,
    /// When the item was first written.
    created_at: DateTime<Utc>,
    /// When the item was last replaced.
    updated_at: DateTime<Utc>,
}

/// A file-system-backed secret store.
///
/// Files are created with mode `0600` inside a `0700` directory on Unix.
pub struct FileSecretStore {
    base_dir: PathBuf,
    master_key: Zeroizing<Vec<u8>>,
}

impl FileSecretStore {
    /// Create a new store rooted at `base_dir` using the provided master key.
    pub fn new(base_dir: PathBuf, master_key: Zeroizing<Vec<u8>>) -> Self {
        Self {
            base_dir,
            master_key,
        }
    }

    /// Open the store at `base_dir`, resolving the master key via
    /// [`crate::keychain::file_master_key`].
    pub fn open(base_dir: PathBuf) -> Result<Self> {
        let master_key = crate::keychain::file_master_key()?;
        Ok(Self::new(base_dir, master_key))
    }

    /// Directory holding the item files.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Create the store directory if missing. Only a directory created here is
    /// narrowed to 0700; an existing one keeps the mode its owner gave it.
    fn ensure_dir(&self) -> Result<()> {
        if self.base_dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(&self.base_dir).map_err(|e| write_error(&self.base_dir, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o700);
            fs::set_permissions(&self.base_dir, perms)
                .map_err(|e| write_error(&self.base_dir, e))?;
        }

        Ok(())
    }

    fn item_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }

    fn read_stored(&self, key: &str) -> Result<StoredItem> {
        let path = self.item_path(key);
        let data = fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SecretError::NotFound(key.to_string()),
            _ => SecretError::Unavailable(format!("cannot read {}: {e}", path.display())),
        })?;

        serde_json::from_slice(&data).map_err(|e| {
            SecretError::DecryptionFailed(format!("{} is not a valid item file: {e}", path.display()))
        })
    }
}

fn write_error(path: &Path, e: io::Error) -> SecretError {
    match e.kind() {
        io::ErrorKind::PermissionDenied => {
            SecretError::PermissionDenied(format!("cannot write {}: {e}", path.display()))
        }
        _ => SecretError::Unavailable(format!("cannot write {}: {e}", path.display())),
    }
}

/// Write `data` to `path` via a `0600` temporary file and an atomic rename.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let tmp_path = path.with_extension("json.tmp");

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let written = options.open(&tmp_path).and_then(|mut file| {
        file.write_all(data)?;
        file.sync_all()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_error(&tmp_path, e));
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        write_error(path, e)
    })
}

impl SecretStore for FileSecretStore {
    fn backend_name(&self) -> &'static str {
        "file"
    }

    fn get(&self, key: &str) -> Result<Item> {
        validate_key(key)?;

        let stored = self.read_stored(key)?;
        let sealed = Sealed {
            payload: base64::engine::general_purpose::STANDARD
                .decode(&stored.encrypted_value)
                .map_err(|e| SecretError::DecryptionFailed(format!("base64 decode failed: {e}")))?,
            salt: hex::decode(&stored.salt)
                .map_err(|e| SecretError::DecryptionFailed(format!("hex decode failed: {e}")))?,
        };

        let data = crypto::open(&self.master_key, key, &sealed)?;
        debug!(key, "read item from file backend");
        Ok(Item::new(key, data, stored.label))
    }

    fn set(&self, item: &Item) -> Result<()> {
        validate_key(&item.key)?;
        self.ensure_dir()?;

        // Keep the original creation time when replacing an item.
        let created_at = match self.read_stored(&item.key) {
            Ok(previous) => previous.created_at,
            Err(_) => Utc::now(),
        };

        let sealed = crypto::seal(&self.master_key, &item.key, &item.data)?;
        let stored = StoredItem {
            label: item.label.clone(),
            encrypted_value: base64::engine::general_purpose::STANDARD.encode(&sealed.payload),
            salt: hex::encode(&sealed.salt),
            created_at,
            updated_at: Utc::now(),
        };

        let json = serde_json::to_vec_pretty(&stored)?;
        let path = self.item_path(&item.key);
        debug!(key = %item.key, path = %path.display(), "writing item");
        write_atomic(&path, &json)
    }

    fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;

        let path = self.item_path(key);
        debug!(key, path = %path.display(), "removing item");
        fs::remove_file(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SecretError::NotFound(key.to_string()),
            _ => write_error(&path, e),
        })
    }
}
