//! Background writer for collection snapshots.
//!
//! A single task owns the storage handle and applies commands in the order
//! they were queued, so writes to the collection key never interleave.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use crate::storage::{StorageAdapter, RECIPES_KEY};

enum PersistCommand {
    Write(String),
    Remove,
    Flush(oneshot::Sender<()>),
}

pub(crate) struct PersistQueue {
    tx: mpsc::UnboundedSender<PersistCommand>,
}

impl PersistQueue {
    /// Starts the worker. Must be called from within an async runtime.
    pub(crate) fn spawn(storage: Arc<dyn StorageAdapter>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        spawn_worker(run(storage, rx));
        Self { tx }
    }

    pub(crate) fn write(&self, snapshot: String) {
        self.send(PersistCommand::Write(snapshot));
    }

    pub(crate) fn remove(&self) {
        self.send(PersistCommand::Remove);
    }

    /// Resolves once every command queued before this call has been applied.
    pub(crate) async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.tx.send(PersistCommand::Flush(done)).is_ok() {
            let _ = wait.await;
        }
    }

    fn send(&self, command: PersistCommand) {
        if self.tx.send(command).is_err() {
            tracing::error!("Persist worker has stopped, recipes were not saved");
        }
    }
}

async fn run(storage: Arc<dyn StorageAdapter>, mut rx: mpsc::UnboundedReceiver<PersistCommand>) {
    let mut pending: Option<PersistCommand> = None;

    loop {
        let command = match pending.take() {
            Some(command) => command,
            None => match rx.recv().await {
                Some(command) => command,
                None => break,
            },
        };

        match command {
            PersistCommand::Write(mut snapshot) => {
                // Only the newest queued snapshot needs to reach storage
                while let Ok(next) = rx.try_recv() {
                    match next {
                        PersistCommand::Write(newer) => snapshot = newer,
                        other => {
                            pending = Some(other);
                            break;
                        }
                    }
                }

                match storage.set(RECIPES_KEY, &snapshot).await {
                    Ok(()) => tracing::debug!("Saved {} bytes to {}", snapshot.len(), RECIPES_KEY),
                    Err(e) => tracing::error!("Failed to save recipes: {}", e),
                }
            }
            PersistCommand::Remove => match storage.remove(RECIPES_KEY).await {
                Ok(()) => tracing::debug!("Removed {}", RECIPES_KEY),
                Err(e) => tracing::error!("Failed to remove saved recipes: {}", e),
            },
            PersistCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }

    tracing::debug!("Persist worker stopped");
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_worker<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(future);
}

#[cfg(target_arch = "wasm32")]
fn spawn_worker<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}
