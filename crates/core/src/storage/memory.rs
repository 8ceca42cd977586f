//! In-memory store

use rustc_hash::FxHashMap;

use super::{KeyValueStore, StorageError};

/// Key-value store kept in memory; used in tests and when no browser storage exists.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, Vec<u8>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with values.
    pub fn with_values<K: Into<String>, V: Into<Vec<u8>>>(
        values: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Borrow the raw bytes stored under `key`.
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.values.get(key).map(Vec::as_slice)
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), bytes.to_vec());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn missing_key_loads_none() -> TestResult {
        let store = MemoryStore::new();

        assert_eq!(store.load("cart")?, None);

        Ok(())
    }

    #[test]
    fn save_replaces_value() -> TestResult {
        let mut store = MemoryStore::with_values([("cart", b"[]".to_vec())]);

        store.save("cart", b"[1]")?;

        assert_eq!(store.load("cart")?, Some(b"[1]".to_vec()));
        assert_eq!(store.get("cart"), Some(b"[1]".as_slice()));

        Ok(())
    }
}
