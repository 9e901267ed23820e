//! Typed persistence over a [`StorageBackend`].
//!
//! Writes are serialized: one write is in flight at a time across all keys.
//! Every `save` draws a ticket for its key before waiting for the write slot;
//! when the slot frees up, a save whose ticket is no longer the newest for that
//! key is dropped, because a later save already holds the complete newer value.
//! Storage therefore always ends on the value of the last `save` call.

use super::{validate_key, StorageBackend};
use crate::error::{Result, ShopError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Written,
    /// A newer save for the same key was queued behind this one.
    Superseded,
}

pub struct PersistenceGateway<B: StorageBackend> {
    backend: B,
    write_slot: tokio::sync::Mutex<()>,
    tickets: Mutex<HashMap<String, u64>>,
}

impl<B: StorageBackend> PersistenceGateway<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            write_slot: tokio::sync::Mutex::new(()),
            tickets: Mutex::new(HashMap::new()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Serialize `value` and store it under `key`, replacing any prior value.
    ///
    /// Serialization errors surface before anything is queued. A failed write
    /// is retried once; the second failure is returned.
    pub async fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<SaveOutcome> {
        validate_key(key)?;
        let payload = serde_json::to_string(value).map_err(ShopError::Serialization)?;
        let ticket = self.issue_ticket(key);

        let _slot = self.write_slot.lock().await;
        if self.newest_ticket(key) != ticket {
            log::debug!("Skipping stale write #{} for '{}'", ticket, key);
            return Ok(SaveOutcome::Superseded);
        }

        self.write_with_retry(key, &payload).await?;
        log::debug!("Saved '{}' ({} bytes)", key, payload.len());
        Ok(SaveOutcome::Written)
    }

    /// Load and decode the value under `key`.
    ///
    /// `Ok(None)` means nothing was ever stored. Stored text that does not
    /// decode as `T` is [`ShopError::Corrupt`], never `None`.
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.backend.read(key).await? else {
            log::debug!("No stored value for '{}'", key);
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| ShopError::Corrupt {
                key: key.to_string(),
                source,
            })
    }

    /// Move the raw value under `key` aside to `<key>.corrupt`.
    ///
    /// Earlier backups are kept: when `<key>.corrupt` is taken the value goes
    /// to `<key>.corrupt-1`, `<key>.corrupt-2` and so on. Returns the backup
    /// key, or `None` if there was nothing to move.
    pub async fn quarantine(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;

        let _slot = self.write_slot.lock().await;
        let Some(raw) = self.backend.read(key).await? else {
            return Ok(None);
        };
        let backup_key = self.free_backup_key(key).await?;
        self.write_with_retry(&backup_key, &raw).await?;
        self.backend.remove(key).await?;
        log::warn!("Moved unreadable '{}' to '{}'", key, backup_key);
        Ok(Some(backup_key))
    }

    async fn free_backup_key(&self, key: &str) -> Result<String> {
        let mut attempt = 0u32;
        loop {
            let candidate = match attempt {
                0 => format!("{}.corrupt", key),
                n => format!("{}.corrupt-{}", key, n),
            };
            validate_key(&candidate)?;
            if self.backend.read(&candidate).await?.is_none() {
                return Ok(candidate);
            }
            attempt += 1;
        }
    }

    async fn write_with_retry(&self, key: &str, payload: &str) -> Result<()> {
        match self.backend.write(key, payload).await {
            Ok(()) => Ok(()),
            Err(first) => {
                log::warn!("Write to '{}' failed, retrying once: {}", key, first);
                self.backend.write(key, payload).await.map_err(|e| {
                    log::error!("Write to '{}' failed again, giving up: {}", key, e);
                    e
                })
            }
        }
    }

    fn issue_ticket(&self, key: &str) -> u64 {
        let mut tickets = self.tickets.lock().unwrap_or_else(|e| e.into_inner());
        let ticket = tickets.entry(key.to_string()).or_insert(0);
        *ticket += 1;
        *ticket
    }

    fn newest_ticket(&self, key: &str) -> u64 {
        let tickets = self.tickets.lock().unwrap_or_else(|e| e.into_inner());
        tickets.get(key).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{seed_items, ShoppingListItem};
    use crate::store::memory::fixtures::BackendFixture;
    use crate::store::memory::MemBackend;
    use std::time::Duration;

    const KEY: &str = "shopping-list";

    #[tokio::test]
    async fn load_after_save_round_trips() {
        let gateway = PersistenceGateway::new(MemBackend::new());
        let items = seed_items(&["Coffee", "Tea"], 7);

        gateway.save(KEY, &items).await.unwrap();
        let loaded: Option<Vec<ShoppingListItem>> = gateway.load(KEY).await.unwrap();
        assert_eq!(loaded, Some(items));
    }

    #[tokio::test]
    async fn never_written_key_is_absent_not_error() {
        let gateway = PersistenceGateway::new(MemBackend::new());
        let loaded: Option<Vec<ShoppingListItem>> = gateway.load(KEY).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn undecodable_value_is_corrupt() {
        let fixture = BackendFixture::new().with_raw(KEY, "{not json");
        let gateway = PersistenceGateway::new(fixture.backend);

        let err = gateway.load::<Vec<ShoppingListItem>>(KEY).await.unwrap_err();
        assert!(err.is_corrupt());
    }

    #[tokio::test]
    async fn wrong_shape_is_corrupt() {
        let fixture = BackendFixture::new().with_raw(KEY, r#"{"id": "1"}"#);
        let gateway = PersistenceGateway::new(fixture.backend);

        let err = gateway.load::<Vec<ShoppingListItem>>(KEY).await.unwrap_err();
        assert!(matches!(err, ShopError::Corrupt { ref key, .. } if key == KEY));
    }

    #[tokio::test]
    async fn save_overwrites_prior_value() {
        let gateway = PersistenceGateway::new(MemBackend::new());
        gateway.save(KEY, &vec![1, 2, 3]).await.unwrap();
        gateway.save(KEY, &vec![4]).await.unwrap();

        let loaded: Option<Vec<u32>> = gateway.load(KEY).await.unwrap();
        assert_eq!(loaded, Some(vec![4]));
    }

    #[tokio::test]
    async fn single_write_failure_is_retried() {
        let gateway = PersistenceGateway::new(MemBackend::new());
        gateway.backend().fail_next_writes(1);

        let outcome = gateway.save(KEY, &vec!["a"]).await.unwrap();
        assert_eq!(outcome, SaveOutcome::Written);
        assert_eq!(gateway.backend().get_raw(KEY).as_deref(), Some(r#"["a"]"#));
    }

    #[tokio::test]
    async fn repeated_write_failure_surfaces() {
        let gateway = PersistenceGateway::new(MemBackend::new());
        gateway.backend().fail_next_writes(2);

        let err = gateway.save(KEY, &vec!["a"]).await.unwrap_err();
        assert!(matches!(err, ShopError::Store(_)));
        assert_eq!(gateway.backend().get_raw(KEY), None);
    }

    #[tokio::test]
    async fn queued_saves_collapse_to_the_newest() {
        let backend = MemBackend::new().with_write_delay(Duration::from_millis(10));
        let gateway = PersistenceGateway::new(backend);

        let (first, second, third) = (vec![1], vec![2], vec![3]);
        let (a, b, c) = tokio::join!(
            gateway.save(KEY, &first),
            gateway.save(KEY, &second),
            gateway.save(KEY, &third),
        );

        assert_eq!(a.unwrap(), SaveOutcome::Written);
        assert_eq!(b.unwrap(), SaveOutcome::Superseded);
        assert_eq!(c.unwrap(), SaveOutcome::Written);
        assert_eq!(gateway.backend().write_count(), 2);
        assert_eq!(gateway.backend().get_raw(KEY).as_deref(), Some("[3]"));
    }

    #[tokio::test]
    async fn saves_to_other_keys_are_not_dropped() {
        let backend = MemBackend::new().with_write_delay(Duration::from_millis(5));
        let gateway = PersistenceGateway::new(backend);

        let (one, two) = (1, 2);
        let (a, b) = tokio::join!(gateway.save("one", &one), gateway.save("two", &two));
        assert_eq!(a.unwrap(), SaveOutcome::Written);
        assert_eq!(b.unwrap(), SaveOutcome::Written);
    }

    #[tokio::test]
    async fn quarantine_moves_raw_value_aside() {
        let fixture = BackendFixture::new().with_raw(KEY, "garbage");
        let gateway = PersistenceGateway::new(fixture.backend);

        let backup = gateway.quarantine(KEY).await.unwrap();
        assert_eq!(backup.as_deref(), Some("shopping-list.corrupt"));
        assert_eq!(gateway.backend().get_raw(KEY), None);
        assert_eq!(
            gateway.backend().get_raw("shopping-list.corrupt").as_deref(),
            Some("garbage")
        );
    }

    #[tokio::test]
    async fn repeated_quarantine_keeps_earlier_backups() {
        let fixture = BackendFixture::new()
            .with_raw(KEY, "second")
            .with_raw("shopping-list.corrupt", "first");
        let gateway = PersistenceGateway::new(fixture.backend);

        let backup = gateway.quarantine(KEY).await.unwrap();
        assert_eq!(backup.as_deref(), Some("shopping-list.corrupt-1"));
        assert_eq!(
            gateway.backend().get_raw("shopping-list.corrupt").as_deref(),
            Some("first")
        );
        assert_eq!(
            gateway.backend().get_raw("shopping-list.corrupt-1").as_deref(),
            Some("second")
        );
    }

    #[tokio::test]
    async fn quarantine_of_missing_key_is_noop() {
        let gateway = PersistenceGateway::new(MemBackend::new());
        assert_eq!(gateway.quarantine(KEY).await.unwrap(), None);
    }
}
