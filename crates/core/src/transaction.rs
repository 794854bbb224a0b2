//! The abstract transaction execution unit.

use crate::error::TransactionError;
use crate::lock::SequencingLock;
use crate::result::CallTransactionResult;
use callweave_types::Call;
use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

/// Lifecycle of a transaction.
///
/// ```text
/// Created → Running → (AwaitingContinuation) → Completed | Failed
/// ```
///
/// `Completed` and `Failed` are terminal; a transaction never re-enters
/// `Running`. `Failed` is reserved for internal faults caught at the
/// executor boundary — a transaction that delivers a NOT_PERMITTED result
/// still completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Created,
    Running,
    AwaitingContinuation,
    Completed,
    Failed,
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransactionState::Created => "CREATED",
            TransactionState::Running => "RUNNING",
            TransactionState::AwaitingContinuation => "AWAITING_CONTINUATION",
            TransactionState::Completed => "COMPLETED",
            TransactionState::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

/// Continuation run on the sequencing thread once the origination future
/// resolves.
pub type Continuation = Box<dyn FnOnce(Option<Arc<Call>>) -> CallTransactionResult + Send>;

/// A deferred result: the origination future paired with the continuation
/// that turns its resolution into a final result.
pub struct PendingContinuation {
    /// Resolves off the sequencing thread; the lock is not held across it.
    pub future: BoxFuture<'static, Option<Arc<Call>>>,
    /// Runs back on the sequencing thread, under the shared lock.
    pub continuation: Continuation,
}

impl fmt::Debug for PendingContinuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingContinuation").finish_non_exhaustive()
    }
}

/// What a transaction's synchronous prelude produced.
#[derive(Debug)]
pub enum TransactionOutcome {
    /// The transaction finished without suspending (e.g. permission denied).
    Complete(CallTransactionResult),
    /// An asynchronous origination is in flight; the executor awaits the
    /// future and schedules the continuation.
    Pending(PendingContinuation),
}

/// The abstract execution unit: owns a context, runs under the shared
/// serialization lock, and produces a result through a possibly-asynchronous
/// continuation chain.
///
/// Created per origination attempt, submitted once, and discarded after its
/// result is delivered.
pub trait CallTransaction: Send {
    /// Handle to the single shared serialization lock. All transactions in
    /// the subsystem return clones of the same lock.
    fn lock(&self) -> &SequencingLock;

    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Synchronous prelude, invoked on the sequencing thread with the shared
    /// lock held. Must not block; the only suspension point in a
    /// transaction's life is the origination future inside a
    /// [`TransactionOutcome::Pending`].
    fn process(&mut self) -> Result<TransactionOutcome, TransactionError>;
}
