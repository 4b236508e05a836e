//! Backend selection.
//!
//! The caller names zero or more allowed backends; the first one that is
//! supported in this build and opens successfully wins. An empty filter means
//! every supported backend in default order: the platform keyring, then the
//! encrypted file store.

use std::path::PathBuf;

use oktakey_core::BackendType;
use tracing::debug;

use crate::error::{Result, SecretError};
use crate::file::FileSecretStore;
use crate::keychain::{self, NativeStore};
use crate::memory::MemoryStore;
use crate::store::SecretStore;

/// Whether `backend` has an implementation in this build.
pub fn is_supported(backend: BackendType) -> bool {
    match backend {
        BackendType::File => true,
        other => keychain::native_backend() == Some(other),
    }
}

/// Supported backends in the order they are tried when no filter is given.
pub fn default_order() -> Vec<BackendType> {
    keychain::native_backend()
        .into_iter()
        .chain(std::iter::once(BackendType::File))
        .collect()
}

/// Inputs to backend selection.
#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    /// Allowed backends, in preference order. Empty means all supported.
    pub allowed: Vec<BackendType>,

    /// Directory of the file backend.
    pub file_dir: PathBuf,
}

impl StoreOptions {
    /// Options for the given filter and file backend directory.
    pub fn new(allowed: Vec<BackendType>, file_dir: PathBuf) -> Self {
        Self { allowed, file_dir }
    }
}

/// Open the first usable backend permitted by `options`.
pub fn open_store(options: &StoreOptions) -> Result<Box<dyn SecretStore>> {
    let candidates = if options.allowed.is_empty() {
        default_order()
    } else {
        options.allowed.clone()
    };

    let mut failures = Vec::new();
    for backend in candidates {
        if !is_supported(backend) {
            debug!(%backend, "backend not supported in this build");
            failures.push(format!("{backend}: not supported on this platform"));
            continue;
        }

        let opened: Result<Box<dyn SecretStore>> = match backend {
            BackendType::File => FileSecretStore::open(options.file_dir.clone())
                .map(|s| Box::new(s) as Box<dyn SecretStore>),
            native => NativeStore::open(native).map(|s| Box::new(s) as Box<dyn SecretStore>),
        };

        match opened {
            Ok(store) => {
                debug!(%backend, "opened secret store");
                return Ok(store);
            }
            Err(e) => {
                debug!(%backend, error = %e, "failed to open backend");
                failures.push(format!("{backend}: {e}"));
            }
        }
    }

    Err(SecretError::Unavailable(format!(
        "no usable secret store backend ({})",
        failures.join("; ")
    )))
}

/// Something that can hand out a secret store for one workflow run.
pub trait OpenStore {
    /// Open the store.
    fn open(&self) -> Result<Box<dyn SecretStore>>;
}

impl OpenStore for StoreOptions {
    fn open(&self) -> Result<Box<dyn SecretStore>> {
        open_store(self)
    }
}

impl OpenStore for MemoryStore {
    fn open(&self) -> Result<Box<dyn SecretStore>> {
        Ok(Box::new(self.clone()))
    }
}
