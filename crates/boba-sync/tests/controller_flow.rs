//! End-to-end tests for the sync engine against the in-memory store.
//!
//! The `RecordingStore` spy wraps `MemoryRecordStore` and counts remote
//! calls, so the tests can assert not just what reached the store but that
//! nothing did when validation fails.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use boba_core::types::{CatalogEntry, DraftField, EditMode, ProductRecord, Snapshot};
use boba_store::{MemoryRecordStore, RecordStore, SnapshotFeed, StoreResult};
use boba_sync::{
    CatalogAgent, CatalogEventEmitter, MutationOutcome, ProductSyncController, SyncConfig,
    SyncError,
};

// =============================================================================
// Test Doubles
// =============================================================================

/// RecordStore spy: delegates to a memory store and counts every call.
struct RecordingStore {
    inner: MemoryRecordStore,
    creates: AtomicUsize,
    sets: AtomicUsize,
    deletes: AtomicUsize,
}

impl RecordingStore {
    fn new() -> Self {
        RecordingStore {
            inner: MemoryRecordStore::new(),
            creates: AtomicUsize::new(0),
            sets: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        }
    }

    fn remote_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
            + self.sets.load(Ordering::SeqCst)
            + self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for RecordingStore {
    fn subscribe(&self) -> SnapshotFeed {
        self.inner.subscribe()
    }

    async fn create(&self, record: ProductRecord) -> StoreResult<String> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create(record).await
    }

    async fn set(&self, id: &str, record: ProductRecord) -> StoreResult<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(id, record).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(id).await
    }
}

/// Emitter spy recording every event the agent reports.
#[derive(Default)]
struct RecordingEmitter {
    catalog_sizes: Mutex<Vec<usize>>,
    abandoned: Mutex<Vec<String>>,
    failures: Mutex<Vec<String>>,
}

impl CatalogEventEmitter for RecordingEmitter {
    fn catalog_changed(&self, snapshot: &Snapshot) {
        self.catalog_sizes.lock().unwrap().push(snapshot.len());
    }

    fn edit_abandoned(&self, id: &str) {
        self.abandoned.lock().unwrap().push(id.to_string());
    }

    fn mutation_failed(&self, error: &SyncError) {
        self.failures.lock().unwrap().push(error.to_string());
    }
}

/// Polls `check` until it passes or a second elapses.
async fn eventually<F, Fut>(what: &str, mut check: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..100 {
        if check().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached within 1s: {what}");
}

fn draft_fields(ctl: &mut ProductSyncController, name: &str, category: &str, price: &str) {
    ctl.update_draft_field(DraftField::Name, name);
    ctl.update_draft_field(DraftField::Category, category);
    ctl.update_draft_field(DraftField::Price, price);
}

// =============================================================================
// Controller Flows
// =============================================================================

#[tokio::test]
async fn submit_in_creating_mode_issues_one_create_with_exact_fields() {
    let store = Arc::new(RecordingStore::new());
    let mut ctl = ProductSyncController::new(store.clone());

    draft_fields(&mut ctl, "Trà sữa", "Trà", "25000");
    ctl.update_draft_field(DraftField::Image, "AAAA");

    let ticket = ctl.submit().unwrap();

    // Session resets immediately, before any acknowledgement arrives.
    assert_eq!(ctl.session().mode, EditMode::Creating);
    assert_eq!(ctl.draft(), &ProductRecord::default());

    let outcome = ticket.outcome().await.unwrap();
    let id = match outcome {
        MutationOutcome::Created { id } => id,
        other => panic!("expected Created, got {other:?}"),
    };

    assert_eq!(store.creates.load(Ordering::SeqCst), 1);
    assert_eq!(store.remote_calls(), 1);

    // The created record becomes visible only via the next push.
    assert!(ctl.catalog().is_empty());
    ctl.on_remote_update(store.subscribe().latest());

    let expected = ProductRecord::new("Trà sữa", "Trà", "25000").with_image("AAAA");
    assert_eq!(ctl.catalog(), &vec![CatalogEntry::new(id, expected)]);
}

#[tokio::test]
async fn submit_with_missing_field_makes_no_remote_call() {
    let store = Arc::new(RecordingStore::new());
    let mut ctl = ProductSyncController::new(store.clone());
    ctl.on_remote_update(vec![CatalogEntry::new(
        "p1",
        ProductRecord::new("Trà sữa", "Trà", "25000"),
    )]);

    ctl.update_draft_field(DraftField::Name, "Trà đào");
    // category and price left empty

    let err = ctl.submit().unwrap_err();
    assert!(matches!(err, SyncError::Validation(_)));

    // Nothing was sent, and neither the catalog nor the session moved.
    assert_eq!(store.remote_calls(), 0);
    assert_eq!(ctl.catalog().len(), 1);
    assert_eq!(ctl.session().mode, EditMode::Creating);
    assert_eq!(ctl.draft().name, "Trà đào");
}

#[tokio::test]
async fn submit_in_editing_mode_overwrites_the_target_record() {
    let store = Arc::new(RecordingStore::new());
    let id = store
        .create(ProductRecord::new("Trà sữa", "Trà", "25000"))
        .await
        .unwrap();

    let mut ctl = ProductSyncController::new(store.clone());
    ctl.on_remote_update(store.subscribe().latest());

    ctl.begin_edit(&id).unwrap();
    ctl.update_draft_field(DraftField::Price, "32000");

    let ticket = ctl.submit().unwrap();
    assert_eq!(ctl.session().mode, EditMode::Creating);

    assert_eq!(
        ticket.outcome().await.unwrap(),
        MutationOutcome::Updated { id: id.clone() }
    );
    assert_eq!(store.sets.load(Ordering::SeqCst), 1);

    ctl.on_remote_update(store.subscribe().latest());
    assert_eq!(ctl.record(&id).unwrap().price, "32000");
    assert_eq!(ctl.record(&id).unwrap().name, "Trà sữa");
}

#[tokio::test]
async fn delete_then_empty_push_empties_the_catalog() {
    let store = Arc::new(MemoryRecordStore::new());
    let mut ctl = ProductSyncController::new(store.clone());

    ctl.on_remote_update(vec![CatalogEntry::new(
        "p1",
        ProductRecord::new("Trà sữa", "Trà", "25000"),
    )]);
    assert_eq!(ctl.catalog().len(), 1);
    assert_eq!(ctl.catalog()[0].id, "p1");

    let ticket = ctl.delete_record("p1").unwrap();
    assert_eq!(
        ticket.outcome().await.unwrap(),
        MutationOutcome::Deleted { id: "p1".into() }
    );

    ctl.on_remote_update(Snapshot::new());
    assert!(ctl.catalog().is_empty());
}

#[tokio::test]
async fn remote_failure_reaches_the_ticket() {
    let store = Arc::new(MemoryRecordStore::new());
    store.set_offline(true);

    let mut ctl = ProductSyncController::new(store.clone());
    draft_fields(&mut ctl, "Trà sữa", "Trà", "25000");

    // Dispatch succeeds locally; the failure arrives asynchronously.
    let ticket = ctl.submit().unwrap();
    let err = ticket.outcome().await.unwrap_err();
    assert!(err.is_retryable());

    // Nothing was persisted and no push will reflect the attempt.
    assert!(store.is_empty());
}

// =============================================================================
// Agent Flows
// =============================================================================

#[tokio::test]
async fn agent_round_trip_create_edit_delete() {
    let store = Arc::new(MemoryRecordStore::new());
    let emitter = Arc::new(RecordingEmitter::default());
    let (agent, handle) =
        CatalogAgent::with_emitter(store.clone(), &SyncConfig::default(), emitter.clone());
    tokio::spawn(agent.run());

    // Compose and submit a new record through the handle.
    handle
        .update_draft_field(DraftField::Name, "Trà sữa")
        .await
        .unwrap();
    handle
        .update_draft_field(DraftField::Category, "Trà")
        .await
        .unwrap();
    handle
        .update_draft_field(DraftField::Price, "25000")
        .await
        .unwrap();
    handle.submit().await.unwrap();

    let h = handle.clone();
    eventually("created record reaches the catalog", move || {
        let h = h.clone();
        async move { h.catalog().await.unwrap().len() == 1 }
    })
    .await;

    let id = handle.catalog().await.unwrap()[0].id.clone();

    // Edit it, then have "another actor" delete it out from under us.
    handle.begin_edit(&id).await.unwrap();
    assert_eq!(
        handle.session().await.unwrap().mode,
        EditMode::Editing(id.clone())
    );

    store.delete(&id).await.unwrap();

    let h = handle.clone();
    eventually("abandoned edit resets the session", move || {
        let h = h.clone();
        async move { h.session().await.unwrap().mode == EditMode::Creating }
    })
    .await;

    assert_eq!(*emitter.abandoned.lock().unwrap(), vec![id]);
    assert!(emitter
        .catalog_sizes
        .lock()
        .unwrap()
        .iter()
        .any(|&n| n == 1));

    handle.shutdown().await;
}

#[tokio::test]
async fn agent_surfaces_rejected_mutations() {
    let store = Arc::new(MemoryRecordStore::new());
    let emitter = Arc::new(RecordingEmitter::default());
    let (agent, handle) =
        CatalogAgent::with_emitter(store.clone(), &SyncConfig::default(), emitter.clone());
    tokio::spawn(agent.run());

    store.set_offline(true);

    handle
        .update_draft_field(DraftField::Name, "Trà sữa")
        .await
        .unwrap();
    handle
        .update_draft_field(DraftField::Category, "Trà")
        .await
        .unwrap();
    handle
        .update_draft_field(DraftField::Price, "25000")
        .await
        .unwrap();

    // The submit itself succeeds - validation passed and the mutation was
    // dispatched. The rejection arrives as an event.
    handle.submit().await.unwrap();

    let e = emitter.clone();
    eventually("rejection reaches the emitter", move || {
        let e = e.clone();
        async move { !e.failures.lock().unwrap().is_empty() }
    })
    .await;

    handle.shutdown().await;
}

#[tokio::test]
async fn agent_rejects_commands_after_shutdown() {
    let store = Arc::new(MemoryRecordStore::new());
    let (agent, handle) = CatalogAgent::new(store, &SyncConfig::default());
    let task = tokio::spawn(agent.run());

    handle.shutdown().await;
    task.await.unwrap();

    assert!(matches!(
        handle.catalog().await,
        Err(SyncError::ShuttingDown)
    ));
}
