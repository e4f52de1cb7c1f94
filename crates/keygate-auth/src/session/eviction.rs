//! Background eviction of dead sessions.
//!
//! Reads that discover a dead session enqueue it here and return at once.
//! A single worker task drains the queue and deletes each session from the
//! backing storage, so read latency never includes cleanup I/O.
//!
//! # Architecture
//!
//! - [`EvictionQueue`] - Producer handle owned by the session store
//! - [`EvictionStats`] - Counters for enqueued, evicted, and failed deletes

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::runtime::Handle;
use tokio::sync::{Mutex, mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::storage::SessionStorage;
use crate::types::Session;
use crate::{AuthError, AuthResult};

enum EvictionMessage {
    Evict(Session),
    Flush(oneshot::Sender<()>),
    Shutdown,
}

/// Statistics about the eviction worker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvictionStats {
    /// Sessions handed to the queue.
    pub enqueued: u64,
    /// Sessions the worker deleted.
    pub evicted: u64,
    /// Deletes the backend rejected.
    pub failed: u64,
}

#[derive(Debug, Default)]
struct Counters {
    enqueued: AtomicU64,
    evicted: AtomicU64,
    failed: AtomicU64,
}

/// Fire-and-forget deletion queue with a dedicated worker task.
pub struct EvictionQueue {
    sender: mpsc::UnboundedSender<EvictionMessage>,
    worker: Mutex<Option<JoinHandle<()>>>,
    counters: Arc<Counters>,
}

impl EvictionQueue {
    /// Starts the worker on the current Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if called outside a Tokio runtime.
    pub fn spawn(storage: Arc<dyn SessionStorage>) -> AuthResult<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| AuthError::internal(format!("eviction worker needs a Tokio runtime: {e}")))?;

        let (sender, receiver) = mpsc::unbounded_channel();
        let counters = Arc::new(Counters::default());
        let worker = runtime.spawn(run(storage, receiver, counters.clone()));

        Ok(Self {
            sender,
            worker: Mutex::new(Some(worker)),
            counters,
        })
    }

    /// Schedules `session` for deletion without waiting for it.
    pub fn enqueue(&self, session: Session) {
        let id = session.id;
        if self.sender.send(EvictionMessage::Evict(session)).is_err() {
            tracing::debug!(session_id = %id, "Eviction worker stopped, dropping eviction");
            return;
        }
        self.counters.enqueued.fetch_add(1, Ordering::Relaxed);
    }

    /// Waits until every eviction enqueued before this call has been processed.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.sender.send(EvictionMessage::Flush(done)).is_ok() {
            let _ = wait.await;
        }
    }

    /// Drains pending evictions and stops the worker.
    ///
    /// Evictions enqueued afterwards are dropped. Calling this twice is a no-op.
    pub async fn shutdown(&self) {
        let _ = self.sender.send(EvictionMessage::Shutdown);
        let worker = self.worker.lock().await.take();
        if let Some(worker) = worker {
            if let Err(e) = worker.await {
                tracing::error!(error = %e, "Eviction worker terminated abnormally");
            }
        }
    }

    /// Get eviction statistics.
    #[must_use]
    pub fn stats(&self) -> EvictionStats {
        EvictionStats {
            enqueued: self.counters.enqueued.load(Ordering::Relaxed),
            evicted: self.counters.evicted.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for EvictionQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvictionQueue")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

async fn run(
    storage: Arc<dyn SessionStorage>,
    mut receiver: mpsc::UnboundedReceiver<EvictionMessage>,
    counters: Arc<Counters>,
) {
    tracing::info!("Session eviction worker started");

    while let Some(message) = receiver.recv().await {
        match message {
            EvictionMessage::Evict(session) => match storage.delete(&session).await {
                Ok(()) => {
                    counters.evicted.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(session_id = %session.id, "Evicted expired session");
                }
                Err(e) => {
                    counters.failed.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(
                        session_id = %session.id,
                        error = %e,
                        "Failed to evict expired session"
                    );
                }
            },
            EvictionMessage::Flush(done) => {
                let _ = done.send(());
            }
            EvictionMessage::Shutdown => break,
        }
    }

    tracing::info!("Session eviction worker stopped");
}
