//! # Catalog Agent
//!
//! Single-owner-task driver for [`ProductSyncController`]. The controller
//! is not internally synchronized, so all access funnels through one run
//! loop that drains the snapshot feed and a command channel.
//!
//! ## Agent Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CatalogAgent Architecture                          │
//! │                                                                         │
//! │   frontend ──► CatalogAgentHandle ──mpsc──┐                             │
//! │                                           ▼                             │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                       CatalogAgent run loop                      │  │
//! │  │                                                                  │  │
//! │  │   select! {                                                      │  │
//! │  │       snapshot from feed  ──► controller.on_remote_update        │  │
//! │  │                               emitter.catalog_changed            │  │
//! │  │       command from handle ──► controller.begin_edit / submit /   │  │
//! │  │                               delete_record / ...                │  │
//! │  │       shutdown            ──► break (drops the feed)             │  │
//! │  │   }                                                              │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                           │                             │
//! │   every MutationTicket ──watch task──► emitter.mutation_failed on      │
//! │                                        rejection (never dropped)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dropping out of the run loop releases the feed subscription, so no push
//! can ever land in a destroyed owner.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use boba_core::types::{DraftField, EditSession, Snapshot};
use boba_store::RecordStore;

use crate::config::SyncConfig;
use crate::controller::{MutationTicket, ProductSyncController};
use crate::error::{SyncError, SyncResult};

// =============================================================================
// Event Emitter Trait
// =============================================================================

/// Sink for the transient notices the presentation layer renders
/// (implemented by the frontend integration).
pub trait CatalogEventEmitter: Send + Sync {
    /// The catalog was replaced by a snapshot push; observers must re-render.
    fn catalog_changed(&self, snapshot: &Snapshot);

    /// The record under edit was deleted remotely and the draft was
    /// abandoned; the form should clear.
    fn edit_abandoned(&self, id: &str);

    /// A dispatched create/update/delete was rejected by the backend.
    fn mutation_failed(&self, error: &SyncError);
}

/// No-op event emitter for testing.
pub struct NoOpEmitter;

impl CatalogEventEmitter for NoOpEmitter {
    fn catalog_changed(&self, _snapshot: &Snapshot) {}
    fn edit_abandoned(&self, _id: &str) {}
    fn mutation_failed(&self, _error: &SyncError) {}
}

// =============================================================================
// Commands
// =============================================================================

/// Requests routed from handles into the run loop.
enum Command {
    BeginEdit {
        id: String,
        reply: oneshot::Sender<SyncResult<()>>,
    },
    UpdateDraftField {
        field: DraftField,
        value: String,
    },
    Submit {
        reply: oneshot::Sender<SyncResult<()>>,
    },
    DeleteRecord {
        id: String,
        reply: oneshot::Sender<SyncResult<()>>,
    },
    Catalog {
        reply: oneshot::Sender<Snapshot>,
    },
    Session {
        reply: oneshot::Sender<EditSession>,
    },
}

// =============================================================================
// Catalog Agent
// =============================================================================

/// Owns the controller and the feed subscription; runs until shutdown or
/// until the feed closes.
pub struct CatalogAgent {
    controller: ProductSyncController,
    feed: boba_store::SnapshotFeed,
    emitter: Arc<dyn CatalogEventEmitter>,
    command_rx: mpsc::Receiver<Command>,
    shutdown_rx: mpsc::Receiver<()>,
}

/// Cloneable handle for driving a running [`CatalogAgent`].
#[derive(Clone)]
pub struct CatalogAgentHandle {
    command_tx: mpsc::Sender<Command>,
    shutdown_tx: mpsc::Sender<()>,
}

impl CatalogAgent {
    /// Creates an agent with no event sink.
    pub fn new(store: Arc<dyn RecordStore>, config: &SyncConfig) -> (Self, CatalogAgentHandle) {
        Self::with_emitter(store, config, Arc::new(NoOpEmitter))
    }

    /// Creates an agent that reports to the given emitter.
    ///
    /// The feed subscription is opened here, so the agent's first loop
    /// iteration observes the collection's current contents.
    pub fn with_emitter(
        store: Arc<dyn RecordStore>,
        config: &SyncConfig,
        emitter: Arc<dyn CatalogEventEmitter>,
    ) -> (Self, CatalogAgentHandle) {
        let (command_tx, command_rx) = mpsc::channel(config.agent.command_buffer);
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let agent = CatalogAgent {
            feed: store.subscribe(),
            controller: ProductSyncController::new(store),
            emitter,
            command_rx,
            shutdown_rx,
        };

        let handle = CatalogAgentHandle {
            command_tx,
            shutdown_tx,
        };

        (agent, handle)
    }

    /// Runs the agent loop. Spawn this as a task; it returns after
    /// shutdown, releasing the feed subscription with it.
    pub async fn run(mut self) {
        info!("Catalog agent starting");

        loop {
            tokio::select! {
                snapshot = self.feed.recv() => match snapshot {
                    Some(snapshot) => {
                        if let Some(id) = self.controller.on_remote_update(snapshot) {
                            self.emitter.edit_abandoned(&id);
                        }
                        self.emitter.catalog_changed(self.controller.catalog());
                    }
                    None => {
                        warn!("Snapshot feed closed, catalog agent stopping");
                        break;
                    }
                },

                Some(command) = self.command_rx.recv() => {
                    self.handle_command(command);
                }

                _ = self.shutdown_rx.recv() => {
                    info!("Catalog agent shutting down");
                    break;
                }
            }
        }

        info!("Catalog agent stopped");
    }

    /// Applies one command to the controller.
    fn handle_command(&mut self, command: Command) {
        match command {
            Command::BeginEdit { id, reply } => {
                let _ = reply.send(self.controller.begin_edit(&id));
            }

            Command::UpdateDraftField { field, value } => {
                self.controller.update_draft_field(field, value);
            }

            Command::Submit { reply } => {
                let result = self.controller.submit().map(|t| self.watch_ticket(t));
                let _ = reply.send(result);
            }

            Command::DeleteRecord { id, reply } => {
                let result = self.controller.delete_record(&id).map(|t| self.watch_ticket(t));
                let _ = reply.send(result);
            }

            Command::Catalog { reply } => {
                let _ = reply.send(self.controller.catalog().clone());
            }

            Command::Session { reply } => {
                let _ = reply.send(self.controller.session().clone());
            }
        }
    }

    /// Watches a mutation ticket so remote failures always surface, even
    /// though handle callers get their reply before the remote completes.
    fn watch_ticket(&self, ticket: MutationTicket) {
        let emitter = Arc::clone(&self.emitter);
        tokio::spawn(async move {
            match ticket.outcome().await {
                Ok(outcome) => debug!(?outcome, "Mutation acknowledged"),
                Err(err) => {
                    error!(%err, "Mutation rejected by remote store");
                    emitter.mutation_failed(&err);
                }
            }
        });
    }
}

// =============================================================================
// Handle Operations
// =============================================================================

impl CatalogAgentHandle {
    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> SyncResult<T> {
        let (tx, rx) = oneshot::channel();
        self.command_tx
            .send(make(tx))
            .await
            .map_err(|_| SyncError::ShuttingDown)?;
        rx.await.map_err(|_| SyncError::ShuttingDown)
    }

    /// Switches the session to editing the record at `id`.
    pub async fn begin_edit(&self, id: &str) -> SyncResult<()> {
        let id = id.to_string();
        self.request(|reply| Command::BeginEdit { id, reply }).await?
    }

    /// Writes one draft field.
    pub async fn update_draft_field(
        &self,
        field: DraftField,
        value: impl Into<String>,
    ) -> SyncResult<()> {
        self.command_tx
            .send(Command::UpdateDraftField {
                field,
                value: value.into(),
            })
            .await
            .map_err(|_| SyncError::ShuttingDown)
    }

    /// Submits the draft. The `Ok` reply means validation passed and the
    /// mutation was dispatched; a later rejection arrives through
    /// [`CatalogEventEmitter::mutation_failed`].
    pub async fn submit(&self) -> SyncResult<()> {
        self.request(|reply| Command::Submit { reply }).await?
    }

    /// Deletes the record at `id`. Same reply semantics as [`Self::submit`].
    pub async fn delete_record(&self, id: &str) -> SyncResult<()> {
        let id = id.to_string();
        self.request(|reply| Command::DeleteRecord { id, reply })
            .await?
    }

    /// Reads the current catalog snapshot.
    pub async fn catalog(&self) -> SyncResult<Snapshot> {
        self.request(|reply| Command::Catalog { reply }).await
    }

    /// Reads the current edit session.
    pub async fn session(&self) -> SyncResult<EditSession> {
        self.request(|reply| Command::Session { reply }).await
    }

    /// Signals the agent to shut down gracefully.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}
