//! Secure credential storage for oktakey.
//!
//! Defines the [`SecretStore`] trait and its backends: the OS keyring (via the
//! `keyring` crate), AES-256-GCM encrypted files, and an in-memory store.
//! [`open_store`] picks the first supported backend from a caller filter.

pub mod backend;
pub mod crypto;
pub mod error;
pub mod file;
pub mod keychain;
pub mod memory;
pub mod store;

pub use backend::{default_order, is_supported, open_store, OpenStore, StoreOptions};
pub use error::{Result, SecretError};
pub use file::FileSecretStore;
pub use memory::MemoryStore;
pub use store::{Item, SecretStore};
