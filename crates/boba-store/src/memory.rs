//! # In-Memory Record Store
//!
//! A [`RecordStore`] implementation backed by process memory. It serves two
//! purposes:
//!
//! 1. Test double - the engine's tests drive it directly and observe the
//!    same snapshot-push behavior the vendor store exhibits.
//! 2. Embedded store - standalone deployments without a cloud backend run
//!    against it unchanged.
//!
//! ## Behavior Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 MemoryRecordStore Behavior                              │
//! │                                                                         │
//! │  create(record) ──► mint uuid, append, push snapshot ──► Ok(id)         │
//! │  set(id, record) ─► overwrite (or materialize), push ──► Ok(())         │
//! │  delete(id) ──────► remove if present, push on change ─► Ok(())         │
//! │                                                                         │
//! │  Documents keep insertion order - the feed order IS arrival order.      │
//! │  set_offline(true) makes every mutation fail with Unavailable,          │
//! │  which is how tests exercise the remote-failure path.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use boba_core::types::{CatalogEntry, ProductRecord, Snapshot};

use crate::error::{StoreError, StoreResult};
use crate::record_store::{RecordStore, SnapshotFeed};

// =============================================================================
// Stored Document
// =============================================================================

/// A record plus the metadata the store keeps about it.
#[derive(Debug, Clone)]
struct StoredDocument {
    id: String,
    record: ProductRecord,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

// =============================================================================
// Memory Record Store
// =============================================================================

/// In-memory push-subscribable record collection.
pub struct MemoryRecordStore {
    /// Collection name, used for log context only.
    collection: String,

    /// Documents in insertion order.
    documents: Mutex<Vec<StoredDocument>>,

    /// Snapshot distribution channel; the latest value is the current
    /// collection contents.
    feed_tx: watch::Sender<Snapshot>,

    /// When set, every mutation fails with `Unavailable`.
    offline: AtomicBool,
}

impl MemoryRecordStore {
    /// Creates an empty store for the default collection.
    pub fn new() -> Self {
        Self::with_collection(boba_core::DEFAULT_COLLECTION)
    }

    /// Creates an empty store for a named collection.
    pub fn with_collection(collection: impl Into<String>) -> Self {
        let (feed_tx, _) = watch::channel(Snapshot::new());
        MemoryRecordStore {
            collection: collection.into(),
            documents: Mutex::new(Vec::new()),
            feed_tx,
            offline: AtomicBool::new(false),
        }
    }

    /// Simulates losing (or regaining) connectivity. While offline, all
    /// mutations fail with [`StoreError::Unavailable`]; the feed stays open.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of documents currently stored.
    pub fn len(&self) -> usize {
        self.documents.lock().expect("record store mutex poisoned").len()
    }

    /// Returns true when the collection holds no documents.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// When the document at `id` was created, if it exists.
    pub fn created_at(&self, id: &str) -> Option<DateTime<Utc>> {
        self.documents
            .lock()
            .expect("record store mutex poisoned")
            .iter()
            .find(|doc| doc.id == id)
            .map(|doc| doc.created_at)
    }

    /// When the document at `id` was last written, if it exists.
    pub fn updated_at(&self, id: &str) -> Option<DateTime<Utc>> {
        self.documents
            .lock()
            .expect("record store mutex poisoned")
            .iter()
            .find(|doc| doc.id == id)
            .map(|doc| doc.updated_at)
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!(
                "collection '{}' is offline",
                self.collection
            )));
        }
        Ok(())
    }

    /// Publishes the current contents to all feed subscribers.
    fn publish(&self, documents: &[StoredDocument]) {
        let snapshot: Snapshot = documents
            .iter()
            .map(|doc| CatalogEntry::new(doc.id.clone(), doc.record.clone()))
            .collect();
        self.feed_tx.send_replace(snapshot);
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    fn subscribe(&self) -> SnapshotFeed {
        let mut rx = self.feed_tx.subscribe();
        // First recv must observe the current contents, like a vendor
        // snapshot listener firing immediately on registration.
        rx.mark_changed();
        SnapshotFeed::new(rx)
    }

    async fn create(&self, record: ProductRecord) -> StoreResult<String> {
        self.check_online()?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let mut documents = self.documents.lock().expect("record store mutex poisoned");
        documents.push(StoredDocument {
            id: id.clone(),
            record,
            created_at: now,
            updated_at: now,
        });

        debug!(collection = %self.collection, id = %id, "Created record");
        self.publish(&documents);
        Ok(id)
    }

    async fn set(&self, id: &str, record: ProductRecord) -> StoreResult<()> {
        self.check_online()?;

        let now = Utc::now();
        let mut documents = self.documents.lock().expect("record store mutex poisoned");

        match documents.iter_mut().find(|doc| doc.id == id) {
            Some(doc) => {
                doc.record = record;
                doc.updated_at = now;
            }
            None => {
                // Vendor `set` materializes missing documents.
                documents.push(StoredDocument {
                    id: id.to_string(),
                    record,
                    created_at: now,
                    updated_at: now,
                });
            }
        }

        debug!(collection = %self.collection, id = %id, "Set record");
        self.publish(&documents);
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.check_online()?;

        let mut documents = self.documents.lock().expect("record store mutex poisoned");
        let before = documents.len();
        documents.retain(|doc| doc.id != id);

        if documents.len() != before {
            debug!(collection = %self.collection, id = %id, "Deleted record");
            self.publish(&documents);
        } else {
            // Deleting an absent id is acknowledged without a push.
            debug!(collection = %self.collection, id = %id, "Delete of absent record");
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
