//! Background vault saver with delayed, coalescing writes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, warn};

use cloudvault_core::AppError;
use cloudvault_entity::identity::IdentityKey;
use cloudvault_persist::VaultPersistence;
use cloudvault_store::DriveStore;

/// One scheduled save: a full vault snapshot bound to its identity key.
#[derive(Debug, Clone)]
struct SavePoint {
    /// Monotonic schedule counter.
    generation: u64,
    /// The key whose blob this snapshot replaces.
    key: IdentityKey,
    /// The snapshot to persist.
    store: DriveStore,
}

/// Schedules vault saves and commits them from a single worker task.
///
/// Scheduling is synchronous and cheap: the snapshot lands in a watch
/// channel, so a burst of mutations coalesces to the latest snapshot and
/// older ones are never written (last-write-wins). The worker sleeps the
/// configured delay before each commit to simulate sync latency.
///
/// The saving signal is generation-based: it turns on the moment a save
/// is scheduled and turns off once the latest scheduled generation has
/// been committed, whether or not the write succeeded. Write failures
/// are recorded and readable via [`Saver::last_error`]; the in-memory
/// store is never touched by the saver.
#[derive(Debug)]
pub struct Saver {
    /// Latest scheduled snapshot, consumed by the worker.
    tx: watch::Sender<Option<SavePoint>>,
    /// Generation of the most recent schedule call.
    scheduled: Arc<AtomicU64>,
    /// Generation of the most recent committed write.
    written: watch::Receiver<u64>,
    /// Outcome of the most recent committed write.
    last_error: Arc<Mutex<Option<AppError>>>,
}

impl Saver {
    /// Spawn the worker task and return its handle.
    ///
    /// The worker exits when the saver is dropped; a snapshot it has
    /// already received is still committed first, so an in-flight save
    /// always completes.
    pub fn new(persistence: Arc<dyn VaultPersistence>, delay: Duration) -> Self {
        let (tx, rx) = watch::channel(None);
        let (written_tx, written_rx) = watch::channel(0u64);
        let last_error = Arc::new(Mutex::new(None));

        tokio::spawn(run_worker(
            persistence,
            rx,
            written_tx,
            delay,
            Arc::clone(&last_error),
        ));

        Self {
            tx,
            scheduled: Arc::new(AtomicU64::new(0)),
            written: written_rx,
            last_error,
        }
    }

    /// Schedule a save of `store` under `key`.
    ///
    /// Returns immediately; the commit happens after the configured
    /// delay. A newer schedule supersedes any older one that has not
    /// committed yet.
    pub fn schedule(&self, key: IdentityKey, store: DriveStore) {
        let generation = self.scheduled.fetch_add(1, Ordering::SeqCst) + 1;
        self.tx.send_replace(Some(SavePoint {
            generation,
            key,
            store,
        }));
    }

    /// Whether a scheduled save has not been committed yet.
    pub fn is_saving(&self) -> bool {
        self.scheduled.load(Ordering::SeqCst) > *self.written.borrow()
    }

    /// The error of the most recent commit, if it failed.
    ///
    /// Cleared by the next successful commit.
    pub fn last_error(&self) -> Option<AppError> {
        self.error_slot().clone()
    }

    /// Wait until every save scheduled before this call has committed.
    pub async fn flush(&self) {
        let target = self.scheduled.load(Ordering::SeqCst);
        let mut written = self.written.clone();
        loop {
            if *written.borrow_and_update() >= target {
                return;
            }
            if written.changed().await.is_err() {
                // Worker is gone; nothing further will commit.
                return;
            }
        }
    }

    fn error_slot(&self) -> MutexGuard<'_, Option<AppError>> {
        self.last_error
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

async fn run_worker(
    persistence: Arc<dyn VaultPersistence>,
    mut rx: watch::Receiver<Option<SavePoint>>,
    written_tx: watch::Sender<u64>,
    delay: Duration,
    last_error: Arc<Mutex<Option<AppError>>>,
) {
    while rx.changed().await.is_ok() {
        sleep(delay).await;

        // Take the latest snapshot after the delay, so a burst of
        // schedules during the sleep commits once.
        let Some(point) = rx.borrow_and_update().clone() else {
            continue;
        };

        let outcome = persistence.save_vault(&point.key, &point.store).await;
        {
            let mut slot = last_error
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            match &outcome {
                Ok(()) => *slot = None,
                Err(e) => *slot = Some(e.clone()),
            }
        }

        match outcome {
            Ok(()) => debug!(identity = %point.key, "Vault saved"),
            Err(e) => warn!(identity = %point.key, error = %e, "Vault save failed"),
        }

        // Mark the generation committed even on failure; the signal
        // tracks completion, not success.
        written_tx.send_replace(point.generation);
    }
}
