//! The outbound seam to the order notification service.

use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::checkout::OrderSnapshot;

/// Failure delivering an order to the notification service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The dispatch task panicked or was dropped by the runtime.
    #[error("Dispatch aborted: {0}")]
    Aborted(String),
}

impl From<serde_json::Error> for DispatchError {
    fn from(e: serde_json::Error) -> Self {
        DispatchError::Serialization(e.to_string())
    }
}

/// Receives placed orders and sends the confirmation email.
///
/// Implementations decide what counts as delivered; the checkout flow never
/// retries.
#[async_trait]
pub trait OrderNotifier: Send + Sync {
    async fn notify(&self, order: &OrderSnapshot) -> Result<(), DispatchError>;
}

/// Notifier that only logs the payload. Used for dry runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl OrderNotifier for LogNotifier {
    async fn notify(&self, order: &OrderSnapshot) -> Result<(), DispatchError> {
        let body = order.to_json()?;
        tracing::info!(payload = %body, "dry run, order not sent");
        Ok(())
    }
}

/// A dispatch running in the background.
///
/// Dropping the handle does not cancel the dispatch.
#[derive(Debug)]
pub struct DispatchHandle {
    task: JoinHandle<Result<(), DispatchError>>,
}

impl DispatchHandle {
    pub(crate) fn new(task: JoinHandle<Result<(), DispatchError>>) -> Self {
        Self { task }
    }

    /// Check if the dispatch has finished.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the dispatch outcome.
    pub async fn outcome(self) -> Result<(), DispatchError> {
        match self.task.await {
            Ok(result) => result,
            Err(e) => Err(DispatchError::Aborted(e.to_string())),
        }
    }
}
