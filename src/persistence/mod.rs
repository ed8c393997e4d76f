//! Key-value persistence
//!
//! The game stores a handful of small string values (the high score). Backends:
//! - `MemoryStore`: in-process, for tests and headless runs
//! - `FileStore`: JSON object on disk, written via tmp file + rename
//! - `LocalStorage`: browser storage (wasm32 only)

mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;
mod memory;

pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;
pub use memory::MemoryStore;

use thiserror::Error;

/// Storage failures. Callers treat these as non-fatal.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Minimal string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}
