//! # Record Store Contract
//!
//! The push-subscribable document collection the engine synchronizes
//! against. In production this is an adapter over the vendor SDK; in tests
//! and embedded use it is [`crate::MemoryRecordStore`].
//!
//! ## Feed Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Snapshot Feed Semantics                           │
//! │                                                                         │
//! │  • Every push delivers the WHOLE collection in document order           │
//! │  • The latest snapshot always wins; intermediate ones may be skipped    │
//! │  • A new subscriber's first recv yields the current contents            │
//! │  • Dropping the SnapshotFeed releases the subscription                  │
//! │                                                                         │
//! │  These are exactly the semantics of a tokio watch channel, which is     │
//! │  what SnapshotFeed wraps.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutations are acknowledged out of band: a successful `create` resolves
//! with the new id, but the record becomes visible to readers only through
//! the next snapshot push. No ordering holds between a mutation's ack and
//! the push reflecting it.

use async_trait::async_trait;
use tokio::sync::watch;

use boba_core::types::{ProductRecord, Snapshot};

use crate::error::StoreResult;

// =============================================================================
// Record Store Trait
// =============================================================================

/// A push-subscribable record collection with create/set/delete operations.
///
/// Implementations decide their own scheduling; callers must assume every
/// mutation completes asynchronously and out of order with feed pushes.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Subscribes to full-snapshot pushes.
    ///
    /// The returned feed yields the current collection contents first, then
    /// one snapshot per subsequent change.
    fn subscribe(&self) -> SnapshotFeed;

    /// Creates a new record and resolves with the id the store assigned.
    async fn create(&self, record: ProductRecord) -> StoreResult<String>;

    /// Overwrites the full record at `id`. Materializes the document if it
    /// does not exist (vendor `set` semantics).
    async fn set(&self, id: &str, record: ProductRecord) -> StoreResult<()>;

    /// Deletes the record at `id`. Deleting an absent id is acknowledged
    /// as success (vendor semantics).
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

// =============================================================================
// Snapshot Feed
// =============================================================================

/// A live subscription to the collection's snapshot pushes.
///
/// This is a scoped resource: drop it to unsubscribe. Holding it past the
/// owning context's teardown would deliver pushes into a destroyed owner,
/// so the agent keeps it inside its run loop and releases it on shutdown.
pub struct SnapshotFeed {
    rx: watch::Receiver<Snapshot>,
}

impl SnapshotFeed {
    /// Wraps a watch receiver. The receiver should be marked changed so the
    /// subscriber's first recv observes the current contents.
    pub fn new(rx: watch::Receiver<Snapshot>) -> Self {
        SnapshotFeed { rx }
    }

    /// Returns the most recent snapshot without waiting.
    pub fn latest(&self) -> Snapshot {
        self.rx.borrow().clone()
    }

    /// Waits for the next snapshot push.
    ///
    /// Returns `None` once the store side is gone; the feed never yields
    /// again after that.
    pub async fn recv(&mut self) -> Option<Snapshot> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
