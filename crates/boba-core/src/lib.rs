//! # boba-core: Pure Domain Logic for Boba Catalog
//!
//! This crate is the **heart** of Boba Catalog. It contains the catalog
//! domain - records, edit sessions, validation, and the image payload codec -
//! as pure logic with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Boba Catalog Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                       Frontend (any)                            │   │
//! │  │    Sign-in UI ──► Catalog list ──► Record form ──► Notices      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ handle + events                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    boba-sync (engine)                           │   │
//! │  │    ProductSyncController, CatalogAgent, credential flows        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ boba-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   error   │  │validation │  │   media   │   │   │
//! │  │   │  Product  │  │  Core     │  │ required  │  │ PNG+b64   │   │   │
//! │  │   │  Session  │  │  errors   │  │  fields   │  │  codec    │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO VENDOR SDK • NO NETWORK • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  boba-store (collaborators)                     │   │
//! │  │         RecordStore / AuthSession traits, in-memory store       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductRecord, CatalogEntry, EditSession, ...)
//! - [`error`] - Domain error types
//! - [`validation`] - Submit-time field validation
//! - [`media`] - Image payload codec (PNG + base64)

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod media;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use boba_core::ProductRecord` instead of
// `use boba_core::types::ProductRecord`

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Name of the remote collection holding product records.
///
/// Deployments keep all records in a single `products` collection; the
/// sync layer accepts an override through its config.
pub const DEFAULT_COLLECTION: &str = "products";
