//! The pending handle returned by `submit`.

use callweave_core::{CallTransactionResult, ExecutorError};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Future over the result of a submitted transaction.
///
/// Resolves once the sequencing thread delivers the transaction's result.
/// If the executor shuts down before the submission is processed, resolves
/// to [`ExecutorError::Shutdown`] instead of hanging.
#[derive(Debug)]
pub struct PendingResult {
    rx: oneshot::Receiver<CallTransactionResult>,
}

impl PendingResult {
    pub(crate) fn new(rx: oneshot::Receiver<CallTransactionResult>) -> Self {
        Self { rx }
    }

    /// Block the calling thread until the result arrives.
    ///
    /// For non-async callers. Must not be called from the sequencing thread
    /// or from within an async runtime.
    pub fn blocking_wait(self) -> Result<CallTransactionResult, ExecutorError> {
        self.rx.blocking_recv().map_err(|_| ExecutorError::Shutdown)
    }
}

impl Future for PendingResult {
    type Output = Result<CallTransactionResult, ExecutorError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|res| res.map_err(|_| ExecutorError::Shutdown))
    }
}
