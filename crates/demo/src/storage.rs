//! Browser `localStorage` persistence.

use lasagna::storage::{KeyValueStore, StorageError};
use web_sys::Storage;

/// Key-value store backed by the window's `localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<Storage, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no browser window".to_string()))?;

        window
            .local_storage()
            .map_err(|error| StorageError::Unavailable(format!("{error:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))
    }
}

impl KeyValueStore for BrowserStorage {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let value = Self::storage()?
            .get_item(key)
            .map_err(|error| StorageError::Unavailable(format!("{error:?}")))?;

        Ok(value.map(String::into_bytes))
    }

    fn save(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let text =
            std::str::from_utf8(value).map_err(|error| StorageError::Encoding(error.to_string()))?;

        Self::storage()?
            .set_item(key, text)
            .map_err(|error| StorageError::Unavailable(format!("{error:?}")))
    }
}
