//! Persistence
//!
//! The cart and favorites are persisted as JSON snapshots in a small
//! key-value byte store. Snapshots are read once when a storefront is opened
//! and rewritten after every change to the store they belong to.

use thiserror::Error;

pub mod file;
pub mod memory;
pub mod snapshot;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key holding the cart snapshot.
pub const CART_KEY: &str = "cart";

/// Key holding the favorites snapshot.
pub const FAVORITES_KEY: &str = "favorites";

/// Errors raised by a key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error reading or writing a stored value
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing store cannot be reached
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The key cannot be used by this store
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// A value could not be encoded for the store
    #[error("Failed to encode stored value: {0}")]
    Encoding(String),
}

/// Key-value byte store used to persist snapshots.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` when the key is missing.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be read.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be written.
    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        (**self).save(key, bytes)
    }
}
