//! Key/value persistence for the high score
//!
//! Backends:
//! - `FileStore`: JSON file on disk (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm)
//! - `MemoryStore`: in-process, for tests and headless runs
//!
//! Callers never see these errors directly; `highscores` logs and swallows
//! them so a broken store degrades to "no high score".

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Failures inside a storage backend
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A single-slot text store
pub trait ScoreStore: std::fmt::Debug {
    /// Read the stored payload, `None` if nothing was ever written
    fn read(&self) -> Result<Option<String>, PersistenceError>;
    /// Replace the stored payload
    fn write(&mut self, payload: &str) -> Result<(), PersistenceError>;
}

/// In-memory store. Clones share the same slot, so a test can keep a handle
/// and inspect what the game wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
    failing: bool,
}

impl MemoryStore {
    /// Store pre-seeded with a raw payload
    pub fn with_payload(payload: &str) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(payload.to_string()))),
            failing: false,
        }
    }

    /// Store whose every operation fails
    pub fn failing() -> Self {
        Self {
            slot: Rc::default(),
            failing: true,
        }
    }

    /// Current raw payload
    pub fn payload(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl ScoreStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        if self.failing {
            return Err(PersistenceError::Unavailable("memory store disabled".into()));
        }
        Ok(self.slot.borrow().clone())
    }

    fn write(&mut self, payload: &str) -> Result<(), PersistenceError> {
        if self.failing {
            return Err(PersistenceError::Unavailable("memory store disabled".into()));
        }
        *self.slot.borrow_mut() = Some(payload.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_clones_share_slot() {
        let store = MemoryStore::default();
        let mut writer = store.clone();
        assert_eq!(store.read().unwrap(), None);
        writer.write("42").unwrap();
        assert_eq!(store.payload().as_deref(), Some("42"));
    }

    #[test]
    fn test_failing_store_errors() {
        let mut store = MemoryStore::failing();
        assert!(matches!(store.read(), Err(PersistenceError::Unavailable(_))));
        assert!(store.write("1").is_err());
    }
}
