//! In-memory secret store.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Result, SecretError};
use crate::store::{Item, SecretStore};

/// A process-local store.
///
/// Clones share the same items, so a clone handed to a workflow can be
/// inspected afterwards. A read-only store rejects writes with
/// [`SecretError::PermissionDenied`].
#[derive(Clone, Default)]
pub struct MemoryStore {
    items: Arc<Mutex<HashMap<String, Item>>>,
    writes: Arc<Mutex<usize>>,
    read_only: bool,
}

impl MemoryStore {
    /// Create an empty, writable store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle to the same items that refuses every write.
    pub fn read_only(&self) -> Self {
        Self {
            read_only: true,
            ..self.clone()
        }
    }

    /// Number of successful `set` calls across all handles.
    pub fn write_count(&self) -> usize {
        *self.writes.lock()
    }

    /// Raw bytes stored under `key`, bypassing the trait.
    pub fn data(&self, key: &str) -> Option<Vec<u8>> {
        self.items.lock().get(key).map(|item| item.data.clone())
    }
}

impl SecretStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn get(&self, key: &str) -> Result<Item> {
        self.items
            .lock()
            .get(key)
            .cloned()
            .ok_or_else(|| SecretError::NotFound(key.to_string()))
    }

    fn set(&self, item: &Item) -> Result<()> {
        if self.read_only {
            return Err(SecretError::PermissionDenied(format!(
                "memory store is read-only, cannot write '{}'",
                item.key
            )));
        }
        self.items.lock().insert(item.key.clone(), item.clone());
        *self.writes.lock() += 1;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.read_only {
            return Err(SecretError::PermissionDenied(format!(
                "memory store is read-only, cannot remove '{key}'"
            )));
        }
        self.items
            .lock()
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| SecretError::NotFound(key.to_string()))
    }
}
