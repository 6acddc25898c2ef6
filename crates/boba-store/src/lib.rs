//! # boba-store: Collaborator Surface for Boba Catalog
//!
//! This crate defines the contracts for the two vendor-backed services the
//! engine talks to - the push-subscribable record collection and the
//! credential service - together with in-memory implementations of both.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Collaborator Boundary                               │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    boba-sync (engine)                            │  │
//! │  │        holds Arc<dyn RecordStore> + Arc<dyn AuthSession>         │  │
//! │  └───────────────┬────────────────────────────┬─────────────────────┘  │
//! │                  │                            │                        │
//! │  ┌───────────────▼─────────────┐  ┌───────────▼─────────────────────┐  │
//! │  │  RecordStore (trait)        │  │  AuthSession (trait)            │  │
//! │  │                             │  │                                 │  │
//! │  │  subscribe() → SnapshotFeed │  │  sign_in / sign_up              │  │
//! │  │  create / set / delete      │  │  send_verification_email        │  │
//! │  └───────────────┬─────────────┘  │  sign_out                       │  │
//! │                  │                └───────────┬─────────────────────┘  │
//! │  ┌───────────────▼─────────────┐  ┌───────────▼─────────────────────┐  │
//! │  │  MemoryRecordStore          │  │  MemoryAuthSession              │  │
//! │  │  (tests + embedded use)     │  │  (tests)                        │  │
//! │  └─────────────────────────────┘  └─────────────────────────────────┘  │
//! │                                                                         │
//! │  A vendor-SDK adapter implements the same traits in production; the     │
//! │  engine cannot tell the difference.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`record_store`] - `RecordStore` trait and the `SnapshotFeed` handle
//! - [`memory`] - In-memory record store with fault injection
//! - [`auth`] - `AuthSession` trait and its in-memory fake
//! - [`error`] - `StoreError` / `AuthError`

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod error;
pub mod memory;
pub mod record_store;

// =============================================================================
// Re-exports
// =============================================================================

pub use auth::{AuthSession, MemoryAuthSession};
pub use error::{AuthError, AuthResult, StoreError, StoreResult};
pub use memory::MemoryRecordStore;
pub use record_store::{RecordStore, SnapshotFeed};
