//! # Shoplist Architecture
//!
//! Shoplist is a **UI-agnostic shopping list library**. The `shoplist` binary is
//! one client of it; a GUI or a mobile shell would drive the same API.
//!
//! ## The Four Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the in-memory list and countdown                    │
//! │  - Hydrates once, persists after every mutation             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic on in-memory values                  │
//! │  - Time is passed in, never read                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Async StorageBackend trait, FileBackend / MemBackend     │
//! │  - PersistenceGateway: typed save/load, one write at a time │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Display Order
//!
//! Memory holds items in mutation order. What users see comes from
//! [`order::order_shopping_list`]: active items newest first, then completed
//! items most recently completed first. Users address items with display
//! indexes (`1`, `2`, `c1`) that are derived from that order.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** and **order**: unit tests with fixed timestamps, plus
//!    property tests for the ordering rules.
//! 2. **Store**: `MemBackend` for gateway behavior (retry, stale-write
//!    skipping, corruption), `tempfile` directories for `FileBackend`.
//! 3. **API**: end-to-end scenarios over `MemBackend`.
//! 4. **CLI**: `assert_cmd` against the built binary with `SHOPLIST_HOME` set.
//!
//! ## Module Overview
//!
//! - [`api`]: The controller facade
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Storage abstraction, backends and the persistence gateway
//! - [`model`]: Core data types (`ShoppingListItem`, `ItemId`)
//! - [`order`]: Display ordering and indexes
//! - [`countdown`]: Recurring chore countdown
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod countdown;
pub mod error;
pub mod model;
pub mod order;
pub mod store;
