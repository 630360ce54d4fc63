//! Storage wrappers for tests.

use std::sync::Mutex;

use claystore::{MemoryStorage, Storage, StorageError};

/// Delegates to an in-memory backend but can be told to reject writes whose
/// key contains a marker substring. Reads and removals always pass through,
/// so a saga's rollback still works while its forward leg fails.
#[derive(Default)]
pub struct BlockedWrites {
    inner: MemoryStorage,
    blocked: Mutex<Option<String>>,
}

impl BlockedWrites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block_writes_to(&self, marker: &str) {
        *self.blocked.lock().unwrap() = Some(marker.to_string());
    }

    pub fn unblock(&self) {
        *self.blocked.lock().unwrap() = None;
    }
}

impl Storage for BlockedWrites {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(marker) = self.blocked.lock().unwrap().as_deref() {
            if key.contains(marker) {
                return Err(StorageError::Unavailable(format!(
                    "writes to {key} are rejected"
                )));
            }
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}
