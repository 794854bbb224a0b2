//! The transaction executor and its sequencing loop.

use crate::pending::PendingResult;
use callweave_core::{
    CallTransaction, CallTransactionResult, Continuation, PendingContinuation, ResultCode,
    SequencingLock, TransactionOutcome, TransactionState,
};
use callweave_types::Call;
use crossbeam::channel::{bounded, unbounded, Receiver, Sender};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::JoinHandle;
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

/// A transaction handed to the sequencing thread, paired with the channel
/// its single result is delivered on.
struct Submission {
    transaction: Box<dyn CallTransaction>,
    result_tx: oneshot::Sender<CallTransactionResult>,
}

/// A resolved origination future ready for its continuation.
///
/// Sent back to the sequencing thread in completion order; the transaction
/// itself is gone by now, only its lock handle, continuation, and result
/// channel survive the suspension.
struct ResolvedContinuation {
    name: &'static str,
    lock: SequencingLock,
    continuation: Continuation,
    resolved: Option<Arc<Call>>,
    result_tx: oneshot::Sender<CallTransactionResult>,
}

/// Schedules transaction execution on a dedicated sequencing thread.
///
/// `submit` may be called from any thread; the prelude and every continuation
/// run on the single sequencing thread, so no two transactions interleave
/// their mutations of shared call state. Suspended origination futures are
/// awaited on the supplied tokio runtime, off the sequencing thread, with
/// the shared lock released.
pub struct TransactionExecutor {
    submit_tx: Sender<Submission>,
    shutdown_tx: Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl TransactionExecutor {
    /// Spawn the sequencing thread.
    ///
    /// `runtime` is the handle origination futures are awaited on.
    pub fn new(runtime: tokio::runtime::Handle) -> Self {
        let (submit_tx, submit_rx) = unbounded::<Submission>();
        let (continuation_tx, continuation_rx) = unbounded::<ResolvedContinuation>();
        let (shutdown_tx, shutdown_rx) = bounded::<()>(1);

        let thread = std::thread::Builder::new()
            .name("call-sequencing".to_string())
            .spawn(move || {
                run_sequencing_loop(submit_rx, continuation_tx, continuation_rx, shutdown_rx, runtime)
            })
            .expect("failed to spawn call-sequencing thread");

        Self {
            submit_tx,
            shutdown_tx,
            thread: Some(thread),
        }
    }

    /// Submit a freshly created transaction for execution.
    ///
    /// Returns a pending handle that resolves to the transaction's result.
    /// Exactly one result is delivered per submission the sequencing loop
    /// processes; a shutdown before processing surfaces as
    /// [`ExecutorError::Shutdown`](callweave_core::ExecutorError) on the
    /// handle.
    pub fn submit(&self, transaction: Box<dyn CallTransaction>) -> PendingResult {
        let name = transaction.name();
        let (result_tx, result_rx) = oneshot::channel();
        debug!(transaction = name, "submitting transaction");
        if self
            .submit_tx
            .send(Submission {
                transaction,
                result_tx,
            })
            .is_err()
        {
            warn!(transaction = name, "submission after executor shutdown");
        }
        PendingResult::new(result_rx)
    }

    /// Signal the sequencing thread to stop and wait for it to exit.
    ///
    /// In-flight continuations that have not yet been dispatched are dropped;
    /// their pending handles resolve to a shutdown error.
    pub fn shutdown(mut self) {
        self.shutdown_inner();
    }

    fn shutdown_inner(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = self.shutdown_tx.send(());
            if thread.join().is_err() {
                error!("call-sequencing thread panicked during shutdown");
            }
        }
    }
}

impl Drop for TransactionExecutor {
    fn drop(&mut self) {
        self.shutdown_inner();
    }
}

/// The sequencing loop body.
///
/// Priority cascade: continuations before new submissions, so a transaction
/// already past its suspension point finishes ahead of fresh work. When
/// nothing is ready, blocks on `select!` with the shutdown arm.
fn run_sequencing_loop(
    submit_rx: Receiver<Submission>,
    continuation_tx: Sender<ResolvedContinuation>,
    continuation_rx: Receiver<ResolvedContinuation>,
    shutdown_rx: Receiver<()>,
    runtime: tokio::runtime::Handle,
) {
    info!("call-sequencing loop starting");

    loop {
        if shutdown_rx.try_recv().is_ok() {
            info!("call-sequencing loop received shutdown signal");
            break;
        }

        if let Ok(resolved) = continuation_rx.try_recv() {
            run_continuation(resolved);
            continue;
        }
        if let Ok(submission) = submit_rx.try_recv() {
            run_prelude(submission, &runtime, &continuation_tx);
            continue;
        }

        crossbeam::channel::select! {
            recv(shutdown_rx) -> _ => {
                info!("call-sequencing loop received shutdown signal (select)");
                break;
            }
            recv(continuation_rx) -> msg => {
                if let Ok(resolved) = msg {
                    run_continuation(resolved);
                }
            }
            recv(submit_rx) -> msg => {
                if let Ok(submission) = msg {
                    run_prelude(submission, &runtime, &continuation_tx);
                }
            }
        }
    }

    info!("call-sequencing loop exiting");
}

/// Run one transaction's synchronous prelude under the shared lock.
///
/// Faults (an `Err` from the prelude, or a panic) never escape: they are
/// logged and converted into a failed result, and the scoped lock guard is
/// released on the unwind path like any other.
fn run_prelude(
    submission: Submission,
    runtime: &tokio::runtime::Handle,
    continuation_tx: &Sender<ResolvedContinuation>,
) {
    let Submission {
        mut transaction,
        result_tx,
    } = submission;
    let name = transaction.name();
    let lock = transaction.lock().clone();

    debug!(transaction = name, state = %TransactionState::Running, "running prelude");

    let outcome = {
        let _guard = lock.acquire();
        catch_unwind(AssertUnwindSafe(|| transaction.process()))
    };

    match outcome {
        Ok(Ok(TransactionOutcome::Complete(result))) => {
            debug!(
                transaction = name,
                state = %TransactionState::Completed,
                code = %result.code(),
                "transaction completed in prelude"
            );
            let _ = result_tx.send(result);
        }
        Ok(Ok(TransactionOutcome::Pending(pending))) => {
            debug!(
                transaction = name,
                state = %TransactionState::AwaitingContinuation,
                "origination pending"
            );
            let PendingContinuation {
                future,
                continuation,
            } = pending;
            let continuation_tx = continuation_tx.clone();
            // Awaited off the sequencing thread; completion order decides
            // dispatch order on the continuation channel.
            runtime.spawn(async move {
                let resolved = future.await;
                let _ = continuation_tx.send(ResolvedContinuation {
                    name,
                    lock,
                    continuation,
                    resolved,
                    result_tx,
                });
            });
        }
        Ok(Err(err)) => {
            error!(transaction = name, %err, "prelude failed");
            let _ = result_tx.send(synthesized_failure(name, &err.to_string()));
        }
        Err(panic) => {
            let detail = panic_message(panic.as_ref());
            error!(transaction = name, detail, "prelude panicked");
            let _ = result_tx.send(synthesized_failure(name, detail));
        }
    }
}

/// Run one continuation under the shared lock and deliver the final result.
fn run_continuation(resolved: ResolvedContinuation) {
    let ResolvedContinuation {
        name,
        lock,
        continuation,
        resolved,
        result_tx,
    } = resolved;

    let result = {
        let _guard = lock.acquire();
        catch_unwind(AssertUnwindSafe(|| continuation(resolved)))
    };

    match result {
        Ok(result) => {
            debug!(
                transaction = name,
                state = %TransactionState::Completed,
                code = %result.code(),
                "transaction completed in continuation"
            );
            let _ = result_tx.send(result);
        }
        Err(panic) => {
            let detail = panic_message(panic.as_ref());
            error!(transaction = name, detail, "continuation panicked");
            let _ = result_tx.send(synthesized_failure(name, detail));
        }
    }
}

/// Failure synthesized for a fault caught at the executor boundary.
fn synthesized_failure(name: &str, detail: &str) -> CallTransactionResult {
    CallTransactionResult::failed(
        ResultCode::NotPermitted,
        format!("transaction {name} failed internally: {detail}"),
    )
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
