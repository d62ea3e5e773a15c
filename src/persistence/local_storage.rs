//! Browser LocalStorage backend (wasm)

use super::{PersistenceError, ScoreStore};

/// Stores the payload under a fixed LocalStorage key
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| PersistenceError::Unavailable("LocalStorage not available".into()))
    }
}

impl ScoreStore for LocalStorageStore {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        Self::storage()?
            .get_item(&self.key)
            .map_err(|e| PersistenceError::Unavailable(format!("{:?}", e)))
    }

    fn write(&mut self, payload: &str) -> Result<(), PersistenceError> {
        Self::storage()?
            .set_item(&self.key, payload)
            .map_err(|e| PersistenceError::Unavailable(format!("{:?}", e)))
    }
}
