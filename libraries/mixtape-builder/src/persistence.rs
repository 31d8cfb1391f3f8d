//! Background snapshot writer
//!
//! In-memory state is the source of truth. After each mutation the builder
//! queues a full snapshot of the affected collection; a tokio task writes it
//! to the record store. Queued snapshots of the same collection are
//! coalesced so only the latest one is written. Failed writes are logged and
//! reported as events, never rolled back.

use crate::events::BuilderEvent;
use mixtape_core::storage::to_records;
use mixtape_core::{Collection, MixtapeError, RecordStore};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

enum PersistCommand {
    Write {
        collection: Collection,
        records: Vec<serde_json::Value>,
    },
    Flush(oneshot::Sender<()>),
}

/// Fire-and-forget writer in front of a record store
///
/// Dropping the persister closes its queue; the writer task finishes the
/// snapshots already queued and then exits. Those writes only complete while
/// the tokio runtime is alive, so await [`Persister::flush`] before shutting
/// the runtime down.
pub struct Persister {
    tx: mpsc::UnboundedSender<PersistCommand>,
    failures: mpsc::UnboundedReceiver<BuilderEvent>,
    failure_tx: mpsc::UnboundedSender<BuilderEvent>,
}

impl std::fmt::Debug for Persister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persister").finish_non_exhaustive()
    }
}

impl Persister {
    /// Start the writer task
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(store: Arc<dyn RecordStore>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (failure_tx, failures) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(store, rx, failure_tx.clone()));

        Self {
            tx,
            failures,
            failure_tx,
        }
    }

    /// Queue a snapshot of a collection
    pub fn persist<T: Serialize>(&self, collection: Collection, items: &[T]) {
        let records = match to_records(items) {
            Ok(records) => records,
            Err(e) => {
                warn!(%collection, error = %e, "Failed to serialize snapshot");
                self.report(collection, e.to_string());
                return;
            }
        };

        if self
            .tx
            .send(PersistCommand::Write {
                collection,
                records,
            })
            .is_err()
        {
            warn!(%collection, "Persistence writer has stopped");
            self.report(collection, "persistence writer has stopped".to_string());
        }
    }

    /// Wait until every queued snapshot has been written or has failed
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(PersistCommand::Flush(done_tx)).is_ok() {
            let _ = done_rx.await;
        }
    }

    /// Failure events reported so far
    pub fn drain_failures(&mut self) -> Vec<BuilderEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.failures.try_recv() {
            events.push(event);
        }
        events
    }

    fn report(&self, collection: Collection, reason: String) {
        let _ = self.failure_tx.send(write_failed(collection, reason));
    }
}

fn write_failed(collection: Collection, reason: String) -> BuilderEvent {
    BuilderEvent::PersistenceWriteFailed {
        collection,
        message: MixtapeError::persistence(collection.as_str(), reason).to_string(),
    }
}

async fn run_writer(
    store: Arc<dyn RecordStore>,
    mut rx: mpsc::UnboundedReceiver<PersistCommand>,
    failures: mpsc::UnboundedSender<BuilderEvent>,
) {
    while let Some(command) = rx.recv().await {
        let mut pending: HashMap<Collection, Vec<serde_json::Value>> = HashMap::new();
        let mut order: Vec<Collection> = Vec::new();
        let mut waiters: Vec<oneshot::Sender<()>> = Vec::new();

        let mut next = Some(command);
        while let Some(command) = next {
            match command {
                PersistCommand::Write {
                    collection,
                    records,
                } => {
                    if pending.insert(collection, records).is_none() {
                        order.push(collection);
                    }
                }
                PersistCommand::Flush(done) => waiters.push(done),
            }
            next = rx.try_recv().ok();
        }

        for collection in order {
            let Some(records) = pending.remove(&collection) else {
                continue;
            };
            let count = records.len();
            match store.replace_all(collection, records).await {
                Ok(()) => debug!(%collection, count, "Persisted snapshot"),
                Err(e) => {
                    warn!(%collection, error = %e, "Failed to persist snapshot");
                    let _ = failures.send(write_failed(collection, e.to_string()));
                }
            }
        }

        for done in waiters {
            let _ = done.send(());
        }
    }
}
