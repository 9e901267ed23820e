//! # CLI Behavior
//!
//! This is **one possible UI client** for shoplist, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the crate-level documentation of the library.
//!
//! ## Naked Execution (`shoplist`)
//!
//! Running `shoplist` with no arguments defaults to `shoplist list`.
//!
//! ## One Process, One Launch
//!
//! Every invocation is a full app launch: load config, hydrate from storage,
//! run one command (which saves the whole list), exit. Storage lives under
//! `$SHOPLIST_HOME` when set, otherwise the platform data directory.
//!
//! ## Module Structure
//!
//! - `commands`: Per-command handlers that call the API and print results
//! - `print`: Output formatting (lists, countdown, messages)
//! - `setup`: Argument parsing via clap, logging setup

mod commands;
mod print;
pub mod setup;

pub use commands::run;
