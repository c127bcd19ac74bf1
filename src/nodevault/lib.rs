//! # NodeVault Architecture
//!
//! NodeVault keeps a small list of name/value records and offers a handful of
//! views over it (search, sort, statistics, export, backup). The library is
//! UI-agnostic; the `nodevault` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Subcommands and the interactive menu                     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the store and the event observers                   │
//! │  - Normalizes inputs (textual ids → RecordId)               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Record mutations and pure derived views                  │
//! │  - Returns Rust types, never prints                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait                                          │
//! │  - FileStore (vault.json), InMemoryStore                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Errors
//!
//! "Not found" is an answer, not an error: updates return `Option`, deletes
//! return `bool`. [`error::VaultError`] covers bad input (sort field, empty
//! search keyword, malformed ids) and persistence failures. A failed
//! mutation leaves the store as it was.
//!
//! ## Events
//!
//! Every successful add, update and delete is announced on the
//! [`events::EventBus`] the API was built with. Observers cannot fail an
//! operation.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per operation
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: `Record` and `Timestamp`
//! - [`events`]: Mutation events and observers
//! - [`config`]: Configuration file handling
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod model;
pub mod store;
