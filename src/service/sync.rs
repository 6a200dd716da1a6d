// src/service/sync.rs

use std::future::Future;

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use crate::error::AppError;

/// Entity classes an observer can register interest in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Exams,
    Submissions,
    Announcements,
}

/// Fan-out bus for remote change notifications.
///
/// A push update (or any local hint that remote data changed) is
/// reduced to "this entity class is stale"; interested workers then
/// run one full refetch each. There is no incremental merge:
/// last-fetch-wins.
#[derive(Clone)]
pub struct SyncBus {
    tx: broadcast::Sender<EntityKind>,
}

impl SyncBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    /// Marks an entity class stale. A notification with no listeners
    /// is dropped, which is fine: nobody was showing that data.
    pub fn notify(&self, kind: EntityKind) {
        let _ = self.tx.send(kind);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EntityKind> {
        self.tx.subscribe()
    }
}

impl Default for SyncBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs one bounded refetch per notification of its entity kind.
///
/// Dropping the worker aborts the task, so an unmounting screen stops
/// refetching and any in-flight result is discarded with the future.
pub struct RefetchWorker {
    handle: tokio::task::JoinHandle<()>,
}

impl RefetchWorker {
    pub fn spawn<F, Fut>(bus: &SyncBus, kind: EntityKind, mut refetch: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), AppError>> + Send,
    {
        let mut rx = bus.subscribe();

        let handle = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(k) if k == kind => {}
                    Ok(_) => continue,
                    // Missed notifications collapse into the single
                    // refetch below, last-fetch-wins.
                    Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => break,
                }

                if let Err(e) = refetch().await {
                    tracing::error!("Refetch for {:?} failed: {:?}", kind, e);
                }
            }
        });

        Self { handle }
    }
}

impl Drop for RefetchWorker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
