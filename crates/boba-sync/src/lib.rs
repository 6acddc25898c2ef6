//! # boba-sync: Sync Engine for Boba Catalog
//!
//! This crate reconciles a live server-pushed record collection against
//! local editable form state, and hosts the credential flows for the
//! screens around the catalog.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sync Engine Architecture                          │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                 CatalogAgent (single owner task)                 │  │
//! │  │                                                                  │  │
//! │  │  Drains the snapshot feed and the command channel in one         │  │
//! │  │  select loop; all controller state lives on this task            │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ProductSync-    │  │ SnapshotFeed   │  │ MutationTicket watcher │    │
//! │  │Controller      │  │                │  │                        │    │
//! │  │                │  │ watch-channel  │  │ Every create/set/      │    │
//! │  │ Catalog cache  │  │ subscription,  │  │ delete outcome is      │    │
//! │  │ + edit session │  │ released on    │  │ observed; rejections   │    │
//! │  │ state machine  │  │ shutdown       │  │ reach the emitter      │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! │                                                                         │
//! │  EVENTS (to frontend via CatalogEventEmitter):                          │
//! │  • catalog_changed  - snapshot push applied, re-render the list         │
//! │  • edit_abandoned   - record under edit was deleted remotely            │
//! │  • mutation_failed  - remote store rejected a dispatched mutation       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`controller`] - `ProductSyncController` state machine
//! - [`agent`] - `CatalogAgent` owner task, handle, event emitter
//! - [`auth`] - sign-in / sign-up credential flows
//! - [`config`] - TOML-backed settings
//! - [`error`] - Sync error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use boba_store::MemoryRecordStore;
//! use boba_sync::{CatalogAgent, SyncConfig};
//!
//! # async fn demo() {
//! let config = SyncConfig::load_or_default(None);
//! let store = Arc::new(MemoryRecordStore::with_collection(&config.collection.name));
//!
//! let (agent, handle) = CatalogAgent::new(store, &config);
//! tokio::spawn(agent.run());
//!
//! let catalog = handle.catalog().await.unwrap();
//! println!("{} records", catalog.len());
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod agent;
pub mod auth;
pub mod config;
pub mod controller;
pub mod error;

// =============================================================================
// Re-exports
// =============================================================================

pub use agent::{CatalogAgent, CatalogAgentHandle, CatalogEventEmitter, NoOpEmitter};
pub use auth::{sign_in, sign_out, sign_up, AuthFlowError, SignUpReport};
pub use config::SyncConfig;
pub use controller::{MutationOutcome, MutationTicket, ProductSyncController};
pub use error::{SyncError, SyncResult};
