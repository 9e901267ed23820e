use super::{validate_key, StorageBackend};
use crate::error::{Result, ShopError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct MemBackend {
    values: Mutex<HashMap<String, String>>,
    failing_writes: AtomicUsize,
    completed_writes: AtomicUsize,
    write_delay: Option<Duration>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write sleeps for `delay` before landing, so concurrent saves overlap.
    pub fn with_write_delay(mut self, delay: Duration) -> Self {
        self.write_delay = Some(delay);
        self
    }

    /// Make the next `count` writes fail.
    pub fn fail_next_writes(&self, count: usize) {
        self.failing_writes.store(count, Ordering::SeqCst);
    }

    /// Number of writes that reached the map.
    pub fn write_count(&self) -> usize {
        self.completed_writes.load(Ordering::SeqCst)
    }

    /// Store a raw value directly, bypassing serialization.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A panic while holding the lock cannot leave the map half-updated
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn take_failure(&self) -> bool {
        self.failing_writes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl StorageBackend for MemBackend {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.get_raw(key))
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        if let Some(delay) = self.write_delay {
            tokio::time::sleep(delay).await;
        }
        if self.take_failure() {
            return Err(ShopError::Store("Simulated write error".to_string()));
        }
        self.insert_raw(key, value);
        self.completed_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.lock().remove(key);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::ShoppingListItem;

    pub struct BackendFixture {
        pub backend: MemBackend,
    }

    impl Default for BackendFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl BackendFixture {
        pub fn new() -> Self {
            Self {
                backend: MemBackend::new(),
            }
        }

        pub fn with_items(self, key: &str, items: &[ShoppingListItem]) -> Self {
            let json = serde_json::to_string(items).expect("items serialize");
            self.backend.insert_raw(key, &json);
            self
        }

        pub fn with_raw(self, key: &str, raw: &str) -> Self {
            self.backend.insert_raw(key, raw);
            self
        }
    }
}
