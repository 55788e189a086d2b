//! Per-activation cancellation scope.
//!
//! A screen opens a fresh scope each time it becomes active. Requests are raced
//! against the scope's cancel signal, so a response arriving after the screen was
//! left is dropped instead of mutating state.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::errors::ClientError;

/// Clones share one cancel signal.
#[derive(Debug, Clone)]
pub struct ActivationScope {
    cancel_tx: Arc<watch::Sender<bool>>,
    cancel_rx: watch::Receiver<bool>,
}

/// Cloneable handle that cancels one activation.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    cancel_tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancel_tx.send_replace(true);
    }
}

impl Default for ActivationScope {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivationScope {
    pub fn new() -> Self {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        Self {
            cancel_tx: Arc::new(cancel_tx),
            cancel_rx,
        }
    }

    pub fn handle(&self) -> CancelHandle {
        CancelHandle {
            cancel_tx: Arc::clone(&self.cancel_tx),
        }
    }

    pub fn cancel(&self) {
        self.cancel_tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel_rx.borrow()
    }

    /// Run `fut` unless the scope is cancelled first.
    pub async fn guard<F, T>(&self, fut: F) -> Result<T, ClientError>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        if self.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        let mut cancel_rx = self.cancel_rx.clone();
        tokio::select! {
            result = fut => result,
            _ = cancel_rx.wait_for(|cancelled| *cancelled) => {
                tracing::debug!("Request abandoned: screen cancelled");
                Err(ClientError::Cancelled)
            }
        }
    }
}
