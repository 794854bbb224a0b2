//! Error types crossing crate boundaries.

/// Error raised by a transaction during its synchronous prelude.
///
/// These never reach the submitter directly: the executor converts them into
/// a failed [`CallTransactionResult`](crate::CallTransactionResult).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionError {
    /// The context's extension data was already assembled once. A second
    /// assembly means the context was erroneously reused across submissions.
    #[error("extension data already built for this context")]
    ExtrasAlreadyBuilt,

    /// Unclassified internal fault.
    #[error("internal transaction fault: {0}")]
    Internal(String),
}

/// Error surfaced through a pending result handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutorError {
    /// The executor shut down before the submission produced a result.
    #[error("transaction executor shut down")]
    Shutdown,
}
