use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{Storage, StorageError, StorageResult};

#[derive(Debug, Default)]
struct MemoryInner {
    values: HashMap<String, String>,
    writes: usize,
    unavailable: bool,
}

/// Session-scoped storage tier kept in memory.
///
/// Clones share the same contents, so a handle kept outside an
/// [`EditorContext`](crate::state::EditorContext) observes every write the
/// context makes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set_string` calls so far
    pub fn write_count(&self) -> usize {
        self.inner.lock().writes
    }

    /// Makes every subsequent operation fail with
    /// [`StorageError::Unavailable`], like a disabled or full browser store.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.lock().unavailable = unavailable;
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.inner.lock().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MemoryInner {
    fn check(&self) -> StorageResult<()> {
        if self.unavailable {
            return Err(StorageError::Unavailable("memory storage disabled".to_string()));
        }
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn get_string(&self, key: &str) -> StorageResult<Option<String>> {
        let inner = self.inner.lock();
        inner.check()?;
        Ok(inner.values.get(key).cloned())
    }

    fn set_string(&mut self, key: &str, value: String) -> StorageResult<()> {
        let mut inner = self.inner.lock();
        inner.check()?;
        inner.values.insert(key.to_string(), value);
        inner.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        let mut inner = self.inner.lock();
        inner.check()?;
        inner.values.remove(key);
        Ok(())
    }
}
