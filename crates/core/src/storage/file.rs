//! Directory-backed store

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use super::{KeyValueStore, StorageError};

/// Stores each key as `<key>.json` inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `base_path`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub fn open(base_path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path)?;

        Ok(Self { base_path })
    }

    /// Directory holding the stored values.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.base_path.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(self.path_for(key)?) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StorageError::Io(error)),
        }
    }

    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let staging = path.with_extension("json.tmp");

        fs::write(&staging, bytes)?;
        fs::rename(&staging, &path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn save_then_load() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut store = FileStore::open(dir.path())?;

        store.save("favorites", b"[1,2]")?;

        assert_eq!(store.load("favorites")?, Some(b"[1,2]".to_vec()));
        assert!(dir.path().join("favorites.json").exists());

        Ok(())
    }

    #[test]
    fn missing_key_loads_none() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::open(dir.path().join("nested"))?;

        assert_eq!(store.load("cart")?, None);

        Ok(())
    }

    #[test]
    fn rejects_path_like_keys() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut store = FileStore::open(dir.path())?;

        let result = store.save("../cart", b"[]");

        assert!(matches!(result, Err(StorageError::InvalidKey(key)) if key == "../cart"));

        Ok(())
    }
}
