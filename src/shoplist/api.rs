//! # API Facade
//!
//! [`ShoppingListApi`] is the controller every UI talks to. It owns the
//! authoritative in-memory list and the countdown history; nothing else holds
//! or mutates them.
//!
//! ## Lifecycle
//!
//! 1. `new` fills memory with the configured seed items.
//! 2. `hydrate` reads storage once and replaces the seeds with whatever was
//!    saved. A never-written key keeps the seeds. An unreadable value is moved
//!    aside to `<key>.corrupt` and reported as [`Hydration::Recovered`] instead
//!    of being silently discarded.
//! 3. Every mutation (`add`, `delete`, `toggle_complete`, `mark_countdown_done`)
//!    changes memory first, then writes the complete value back through the
//!    [`PersistenceGateway`].
//!
//! ## Failure Handling
//!
//! Mutations never roll back. If the write fails (after the gateway's single
//! retry) the in-memory state stays as the user left it, the failure is logged,
//! and the returned `CmdResult` carries a warning. Invalid input such as a blank
//! name is rejected with an error before anything changes.
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `ShoppingListApi<FileBackend>`
//! - Testing: `ShoppingListApi<MemBackend>`

use crate::commands;
use crate::config::ShopConfig;
use crate::countdown::CountdownState;
use crate::error::Result;
use crate::model::{now_millis, seed_items, ItemId, ShoppingListItem};
use crate::order::{order_shopping_list, ItemSelector};
use crate::store::gateway::PersistenceGateway;
use crate::store::StorageBackend;
use std::collections::HashSet;

/// What `hydrate` found in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hydration {
    /// A saved list replaced the seeds.
    Restored(usize),
    /// Nothing saved yet; the seeds stay.
    FirstRun,
    /// The saved list could not be read; it was moved to `backup_key` and the
    /// seeds stay.
    Recovered { backup_key: Option<String> },
}

pub struct ShoppingListApi<B: StorageBackend> {
    gateway: PersistenceGateway<B>,
    config: ShopConfig,
    items: Vec<ShoppingListItem>,
    countdown: CountdownState,
}

impl<B: StorageBackend> ShoppingListApi<B> {
    pub fn new(backend: B, config: ShopConfig) -> Self {
        let items = seed_items(&config.seed_items, now_millis());
        Self {
            gateway: PersistenceGateway::new(backend),
            config,
            items,
            countdown: CountdownState::default(),
        }
    }

    pub async fn hydrate(&mut self) -> Result<Hydration> {
        let key = self.config.storage_key.clone();
        let hydration = match self.gateway.load::<Vec<ShoppingListItem>>(&key).await {
            Ok(Some(items)) => {
                self.items = dedupe_ids(items);
                log::debug!("Restored {} items from '{}'", self.items.len(), key);
                Hydration::Restored(self.items.len())
            }
            Ok(None) => Hydration::FirstRun,
            Err(e) if e.is_corrupt() => {
                log::warn!("{}; keeping default items", e);
                let backup_key = self.gateway.quarantine(&key).await?;
                Hydration::Recovered { backup_key }
            }
            Err(e) => return Err(e),
        };

        let countdown_key = self.config.countdown_key.clone();
        self.countdown = match self.gateway.load::<CountdownState>(&countdown_key).await {
            Ok(state) => state.unwrap_or_default(),
            Err(e) if e.is_corrupt() => {
                log::warn!("{}; starting countdown afresh", e);
                self.gateway.quarantine(&countdown_key).await?;
                CountdownState::default()
            }
            Err(e) => return Err(e),
        };

        Ok(hydration)
    }

    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    pub fn ordered_items(&self) -> Vec<ShoppingListItem> {
        order_shopping_list(&self.items)
    }

    pub fn list(&self, show_completed: bool) -> CmdResult {
        commands::list::run(&self.items, show_completed)
    }

    pub fn resolve(&self, selectors: &[ItemSelector]) -> Result<Vec<ItemId>> {
        Ok(commands::helpers::resolve_selectors(&self.items, selectors)?
            .into_iter()
            .map(|(_, id)| id)
            .collect())
    }

    pub async fn add(&mut self, name: &str) -> Result<CmdResult> {
        let mut result = commands::add::run(&mut self.items, name, now_millis())?;
        self.persist_list(&mut result).await;
        Ok(result)
    }

    pub async fn delete(&mut self, id: &ItemId) -> Result<CmdResult> {
        let mut result = commands::delete::run(&mut self.items, id);
        self.persist_list(&mut result).await;
        Ok(result)
    }

    pub async fn toggle_complete(&mut self, id: &ItemId) -> Result<CmdResult> {
        let mut result = commands::toggle::run(&mut self.items, id, now_millis());
        self.persist_list(&mut result).await;
        Ok(result)
    }

    /// Delete every selected item. Selectors resolve against the list as it is
    /// before the first deletion.
    pub async fn delete_items(&mut self, selectors: &[ItemSelector]) -> Result<CmdResult> {
        let ids = self.resolve(selectors)?;
        let mut result = CmdResult::default();
        for id in ids {
            result.absorb(self.delete(&id).await?);
        }
        Ok(result)
    }

    /// Toggle every selected item. Selectors resolve against the list as it is
    /// before the first toggle.
    pub async fn toggle_items(&mut self, selectors: &[ItemSelector]) -> Result<CmdResult> {
        let ids = self.resolve(selectors)?;
        let mut result = CmdResult::default();
        for id in ids {
            result.absorb(self.toggle_complete(&id).await?);
        }
        Ok(result)
    }

    pub fn countdown_status(&self) -> CmdResult {
        commands::counter::status(
            &self.countdown,
            self.config.countdown_frequency(),
            now_millis(),
        )
    }

    pub async fn mark_countdown_done(&mut self) -> Result<CmdResult> {
        let mut result = commands::counter::mark_done(
            &mut self.countdown,
            self.config.countdown_frequency(),
            now_millis(),
        );
        if let Err(e) = self
            .gateway
            .save(&self.config.countdown_key, &self.countdown)
            .await
        {
            log::error!("Could not save countdown: {}", e);
            result.add_message(CmdMessage::warning(format!("Change was not saved: {}", e)));
        }
        Ok(result)
    }

    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    pub fn gateway(&self) -> &PersistenceGateway<B> {
        &self.gateway
    }

    async fn persist_list(&self, result: &mut CmdResult) {
        if let Err(e) = self
            .gateway
            .save(&self.config.storage_key, &self.items)
            .await
        {
            log::error!("Could not save shopping list: {}", e);
            result.add_message(CmdMessage::warning(format!("Changes were not saved: {}", e)));
        }
    }
}

fn dedupe_ids(items: Vec<ShoppingListItem>) -> Vec<ShoppingListItem> {
    let mut seen = HashSet::new();
    let total = items.len();
    let unique: Vec<_> = items
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .collect();
    if unique.len() != total {
        log::warn!("Dropped {} items with duplicate ids", total - unique.len());
    }
    unique
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, CountdownReport, MessageLevel, ShopPaths};
