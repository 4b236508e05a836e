//! Shared fixtures for oktakey integration tests.

use std::cell::Cell;
use std::path::{Path, PathBuf};

use oktakey_core::{AccountKey, CredentialRecord};
use oktakey_creds::{codec, PromptError};
use oktakey_secrets::{FileSecretStore, Item, OpenStore, SecretStore};
use zeroize::Zeroizing;

/// Master key used by every file store fixture.
pub const MASTER_KEY: [u8; 32] = [0x42; 32];

/// An encrypted file store rooted at `dir`.
pub fn file_store(dir: &Path) -> FileSecretStore {
    FileSecretStore::new(dir.to_path_buf(), Zeroizing::new(MASTER_KEY.to_vec()))
}

/// Opens a fresh [`FileSecretStore`] handle on every workflow run.
pub struct FileStoreSource {
    pub dir: PathBuf,
}

impl OpenStore for FileStoreSource {
    fn open(&self) -> oktakey_secrets::Result<Box<dyn SecretStore>> {
        Ok(Box::new(file_store(&self.dir)))
    }
}

/// Write `record` under `account` the way `oktakey add` would.
pub fn seed(store: &dyn SecretStore, account: &AccountKey, record: &CredentialRecord) {
    store
        .set(&Item::new(
            account.as_str(),
            codec::encode(record).to_vec(),
            "okta credentials",
        ))
        .expect("seed credential record");
}

/// Read back and decode the record stored under `account`.
pub fn stored(store: &dyn SecretStore, account: &AccountKey) -> CredentialRecord {
    let item = store.get(account.as_str()).expect("stored item");
    codec::decode(&item.data).expect("decodable record")
}

/// A prompt that answers with a fixed value and counts how often it was asked.
pub struct ScriptedPrompt {
    answer: Result<String, fn() -> PromptError>,
    calls: Cell<usize>,
}

impl ScriptedPrompt {
    /// Always answer `value`.
    pub fn answering(value: &str) -> Self {
        Self {
            answer: Ok(value.to_string()),
            calls: Cell::new(0),
        }
    }

    /// Always fail with `err()`.
    pub fn failing(err: fn() -> PromptError) -> Self {
        Self {
            answer: Err(err),
            calls: Cell::new(0),
        }
    }

    /// How many times the prompt was asked.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl oktakey_creds::Prompt for ScriptedPrompt {
    fn prompt(&self, _label: &str, _secret: bool) -> Result<String, PromptError> {
        self.calls.set(self.calls.get() + 1);
        match &self.answer {
            Ok(value) => Ok(value.clone()),
            Err(err) => Err(err()),
        }
    }
}
