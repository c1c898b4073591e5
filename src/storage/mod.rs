//! Key/value storage tiers used by the persistence channels.
//!
//! A [`Storage`] holds string values under string keys. The crate ships two
//! tiers: [`FileStorage`] survives restarts (one JSON file per key) and
//! [`MemoryStorage`] lives only as long as the process or session holding it.

mod file;
mod memory;

use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors that can occur when reading or writing a storage tier
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A string key/value store.
pub trait Storage: Send {
    /// Returns the value stored under `key`, or `None` if there is none
    fn get_string(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value
    fn set_string(&mut self, key: &str, value: String) -> StorageResult<()>;

    /// Removes the value stored under `key`. Removing a missing key succeeds.
    fn remove(&mut self, key: &str) -> StorageResult<()>;

    /// Makes previous writes durable, for tiers that buffer
    fn flush(&mut self) -> StorageResult<()> {
        Ok(())
    }
}
