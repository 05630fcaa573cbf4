//! Shutdown coordination for the host loop.

use tokio::sync::broadcast;

/// Stop signal for [`host::run`](crate::host::run).
///
/// Cloned into whatever may end the loop (the Ctrl+C task, a handler);
/// the loop subscribes once and leaves after the dispatch in progress.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every subscribed loop to stop. A trigger with no subscriber is dropped.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
