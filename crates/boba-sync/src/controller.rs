//! # Product Sync Controller
//!
//! Owns the canonical in-memory catalog and the local edit session, and
//! reconciles both against the remote collection.
//!
//! ## State Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  ProductSyncController State                            │
//! │                                                                         │
//! │  catalog: Snapshot            session: EditSession                      │
//! │  ┌──────────────────┐         ┌──────────────────────────┐              │
//! │  │ (id₁, record₁)   │         │ mode:  Creating          │              │
//! │  │ (id₂, record₂)   │         │        | Editing(idₖ)    │              │
//! │  │ ...feed order... │         │ draft: ProductRecord     │              │
//! │  └──────────────────┘         └──────────────────────────┘              │
//! │         ▲                                │                              │
//! │         │ replaced wholesale             │ submit() → create/set        │
//! │         │ on every push                  ▼                              │
//! │  ┌──────┴──────────────────────────────────────────────────┐            │
//! │  │                    RecordStore                          │            │
//! │  └─────────────────────────────────────────────────────────┘            │
//! │                                                                         │
//! │  The catalog is a pure pass-through cache of the last push: no          │
//! │  sorting, no filtering, no dedup, no local optimistic mutation.         │
//! │  The feed is the only source of truth for what is persisted.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering Hazards
//! No ordering holds between a mutation's acknowledgement and the snapshot
//! push reflecting it. Submitting an edit and immediately re-editing the
//! same record can populate the draft from pre-update data; the push that
//! follows does not disturb the session, so the operator's typing survives.
//!
//! ## Threading
//! Not internally synchronized. All methods must be called from the single
//! owning task (see [`crate::agent::CatalogAgent`]); only the spawned
//! mutation futures run elsewhere.

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use boba_core::types::{DraftField, EditMode, EditSession, ProductRecord, Snapshot};
use boba_core::validation;
use boba_store::{RecordStore, StoreError};

use crate::error::{SyncError, SyncResult};

// =============================================================================
// Mutation Tickets
// =============================================================================

/// What a completed mutation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// A new record was created under the returned id.
    Created { id: String },

    /// The record at `id` was overwritten.
    Updated { id: String },

    /// The record at `id` was deleted.
    Deleted { id: String },
}

/// Handle on an in-flight mutation.
///
/// Every mutating operation returns one of these so the remote outcome is
/// observable. Dropping the ticket is allowed and reproduces plain
/// fire-and-forget: the mutation still runs, and the agent still logs and
/// reports its failure.
#[derive(Debug)]
pub struct MutationTicket {
    rx: oneshot::Receiver<Result<MutationOutcome, StoreError>>,
}

impl MutationTicket {
    /// Waits for the remote store to acknowledge or reject the mutation.
    pub async fn outcome(self) -> SyncResult<MutationOutcome> {
        match self.rx.await {
            Ok(Ok(outcome)) => Ok(outcome),
            Ok(Err(err)) => Err(SyncError::Remote(err)),
            Err(_) => Err(SyncError::ChannelError(
                "mutation task dropped its outcome".into(),
            )),
        }
    }
}

/// Spawns `op` onto the runtime and returns the ticket resolving with its
/// result. The operation proceeds whether or not the ticket is kept.
fn dispatch<F>(op: F) -> MutationTicket
where
    F: std::future::Future<Output = Result<MutationOutcome, StoreError>> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let _ = tx.send(op.await);
    });
    MutationTicket { rx }
}

// =============================================================================
// Product Sync Controller
// =============================================================================

/// Reconciles the server-pushed catalog against local editable form state.
pub struct ProductSyncController {
    /// Remote collection, injected at construction.
    store: Arc<dyn RecordStore>,

    /// Last pushed snapshot, in feed order. Exclusively owned.
    catalog: Snapshot,

    /// The active add-new / edit-existing form state.
    session: EditSession,
}

impl ProductSyncController {
    /// Creates a controller over the given store, with an empty catalog and
    /// a fresh Creating session.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        ProductSyncController {
            store,
            catalog: Snapshot::new(),
            session: EditSession::new(),
        }
    }

    /// The last pushed snapshot, in feed order.
    pub fn catalog(&self) -> &Snapshot {
        &self.catalog
    }

    /// The active edit session.
    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// The draft under construction.
    pub fn draft(&self) -> &ProductRecord {
        &self.session.draft
    }

    /// Looks a record up in the current catalog.
    pub fn record(&self, id: &str) -> Option<&ProductRecord> {
        self.catalog
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.record)
    }

    // =========================================================================
    // Feed Side
    // =========================================================================

    /// Applies a snapshot push from the remote feed.
    ///
    /// Replaces the whole catalog with the pushed sequence, preserving its
    /// order - last writer wins, no merging. The edit session is left
    /// untouched, with one exception: if the record under edit no longer
    /// exists in the push, the session is force-reset to Creating so the
    /// operator cannot submit an overwrite of a record someone else
    /// deleted. Returns the abandoned id when that happens.
    pub fn on_remote_update(&mut self, snapshot: Snapshot) -> Option<String> {
        debug!(records = snapshot.len(), "Applying snapshot push");
        self.catalog = snapshot;

        let editing = self.session.editing_id()?.to_string();
        if self.record(&editing).is_some() {
            return None;
        }

        warn!(id = %editing, "Record under edit vanished from the feed; abandoning draft");
        self.session.reset();
        Some(editing)
    }

    // =========================================================================
    // Session Side
    // =========================================================================

    /// Switches the session to editing the record at `id`.
    ///
    /// The draft becomes a copy of the record's current catalog values; any
    /// unsaved draft is discarded without confirmation. Fails with
    /// `NotFound` if `id` is not in the current snapshot.
    pub fn begin_edit(&mut self, id: &str) -> SyncResult<()> {
        let record = self
            .record(id)
            .cloned()
            .ok_or_else(|| SyncError::NotFound(id.to_string()))?;

        debug!(id = %id, "Editing record");
        self.session.begin_edit(id, &record);
        Ok(())
    }

    /// Writes one draft field. No validation; the draft accepts anything
    /// until submit.
    pub fn update_draft_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.session.draft.set_field(field, value);
    }

    /// Submits the draft.
    ///
    /// Preconditions: name, category, and price are non-empty (image may be
    /// empty). On validation failure nothing is sent and the session keeps
    /// its draft. On success the mutation is dispatched to the store -
    /// create in Creating mode, full overwrite in Editing mode - and the
    /// session resets to a fresh Creating draft immediately, without
    /// waiting for the acknowledgement. The submitted record becomes
    /// visible in the catalog only via the next snapshot push.
    pub fn submit(&mut self) -> SyncResult<MutationTicket> {
        validation::validate_draft(&self.session.draft)?;

        let EditSession { mode, draft } = std::mem::take(&mut self.session);
        let store = Arc::clone(&self.store);

        let ticket = match mode {
            EditMode::Creating => {
                info!(name = %draft.name, "Submitting new record");
                dispatch(async move {
                    store
                        .create(draft)
                        .await
                        .map(|id| MutationOutcome::Created { id })
                })
            }
            EditMode::Editing(id) => {
                info!(id = %id, "Submitting record overwrite");
                dispatch(async move {
                    store
                        .set(&id, draft)
                        .await
                        .map(|_| MutationOutcome::Updated { id })
                })
            }
        };

        Ok(ticket)
    }

    /// Deletes the record at `id`.
    ///
    /// Fails with `NotFound` if `id` is not in the current snapshot. There
    /// is no optimistic local removal: the record leaves the catalog only
    /// when a subsequent push reflects the deletion, at which point an edit
    /// session pointing at it is reset by [`Self::on_remote_update`].
    pub fn delete_record(&mut self, id: &str) -> SyncResult<MutationTicket> {
        if self.record(id).is_none() {
            return Err(SyncError::NotFound(id.to_string()));
        }

        info!(id = %id, "Deleting record");
        let store = Arc::clone(&self.store);
        let id = id.to_string();
        Ok(dispatch(async move {
            store
                .delete(&id)
                .await
                .map(|_| MutationOutcome::Deleted { id })
        }))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
