//! # Storage Layer
//!
//! Persistence is a single logical key-value store scoped to one installation.
//! Values are JSON text; the application uses one key for the shopping list and
//! one for the countdown.
//!
//! The layer is split in two:
//!
//! - [`StorageBackend`]: raw string I/O per key (the "how").
//!   - [`fs::FileBackend`]: production, one `<key>.json` file per key.
//!   - [`memory::MemBackend`]: tests, with write-failure and latency injection.
//! - [`gateway::PersistenceGateway`]: typed `save`/`load` on top of any backend
//!   (the "what"): serialization, absent vs corrupt, write ordering and retry.
//!
//! ## Storage Format
//!
//! For `FileBackend`:
//! ```text
//! <data dir>/store/
//! ├── shopping-list.json           # JSON array of items
//! ├── countdown.json               # {"completedAtTimestamps": [...]}
//! └── shopping-list.corrupt.json   # only after a failed decode
//! ```

use crate::error::{Result, ShopError};
use async_trait::async_trait;

pub mod fs;
pub mod gateway;
pub mod memory;

/// Abstract interface for raw key-value I/O.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read the raw value under `key`. `Ok(None)` if nothing was ever written.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Durably store `value` under `key`, replacing any prior value.
    async fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Keys double as file names, so they are kept to a portable alphabet.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(ShopError::InvalidKey(key.to_string()))
    }
}
