//! Tests for the sequencing-thread transaction executor.
//!
//! These exercise the executor's contract independently of any concrete
//! transaction semantics: exactly-one result delivery, the pending ⇒
//! continuation path, fault containment, continuation dispatch order, and
//! shutdown behavior.

use callweave_core::{
    CallTransaction, CallTransactionResult, ExecutorError, PendingContinuation, ResultCode,
    SequencingLock, TransactionError, TransactionOutcome,
};
use callweave_executor::TransactionExecutor;
use callweave_types::{Address, Call, CallId};
use futures::FutureExt;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// What a scripted test transaction does in its prelude.
enum Behavior {
    Immediate(CallTransactionResult),
    Fail(TransactionError),
    Panic(&'static str),
    /// Suspend on a manually resolved future; the continuation appends `tag`
    /// to `log` before producing its result.
    Pending {
        resolver: Option<oneshot::Receiver<Option<Arc<Call>>>>,
        log: Arc<Mutex<Vec<&'static str>>>,
        tag: &'static str,
    },
    /// Suspend on a manually resolved future whose continuation panics.
    PanicInContinuation {
        resolver: Option<oneshot::Receiver<Option<Arc<Call>>>>,
        msg: &'static str,
    },
}

struct ScriptedTransaction {
    lock: SequencingLock,
    behavior: Option<Behavior>,
}

impl ScriptedTransaction {
    fn new(lock: SequencingLock, behavior: Behavior) -> Box<Self> {
        Box::new(Self {
            lock,
            behavior: Some(behavior),
        })
    }
}

impl CallTransaction for ScriptedTransaction {
    fn lock(&self) -> &SequencingLock {
        &self.lock
    }

    fn name(&self) -> &'static str {
        "ScriptedTransaction"
    }

    fn process(&mut self) -> Result<TransactionOutcome, TransactionError> {
        match self.behavior.take().expect("process called twice") {
            Behavior::Immediate(result) => Ok(TransactionOutcome::Complete(result)),
            Behavior::Fail(err) => Err(err),
            Behavior::Panic(msg) => panic!("{}", msg),
            Behavior::Pending { resolver, log, tag } => {
                let rx = resolver.expect("pending behavior needs a resolver");
                Ok(TransactionOutcome::Pending(PendingContinuation {
                    future: async move { rx.await.unwrap_or(None) }.boxed(),
                    continuation: Box::new(move |call| {
                        log.lock().unwrap().push(tag);
                        match call {
                            Some(call) => CallTransactionResult::succeeded(call),
                            None => CallTransactionResult::failed(
                                ResultCode::NotPermitted,
                                "no call",
                            ),
                        }
                    }),
                }))
            }
            Behavior::PanicInContinuation { resolver, msg } => {
                let rx = resolver.expect("pending behavior needs a resolver");
                Ok(TransactionOutcome::Pending(PendingContinuation {
                    future: async move { rx.await.unwrap_or(None) }.boxed(),
                    continuation: Box::new(move |_| panic!("{}", msg)),
                }))
            }
        }
    }
}

fn test_call(id: &str) -> Arc<Call> {
    Arc::new(Call::new(CallId::new(id), Address::new("tel:+15550000000")))
}

/// An immediately completing transaction delivers exactly its result.
#[tokio::test]
async fn immediate_completion_delivers_result() {
    let executor = TransactionExecutor::new(tokio::runtime::Handle::current());
    let lock = SequencingLock::new();

    let result = executor
        .submit(ScriptedTransaction::new(
            lock,
            Behavior::Immediate(CallTransactionResult::failed(
                ResultCode::NotPermitted,
                "scripted denial",
            )),
        ))
        .await
        .expect("executor alive");

    assert!(!result.is_success());
    assert_eq!(result.message(), Some("scripted denial"));
}

/// A pending transaction suspends, then its continuation produces the final
/// result once the origination future resolves.
#[tokio::test]
async fn pending_continuation_produces_final_result() {
    let executor = TransactionExecutor::new(tokio::runtime::Handle::current());
    let lock = SequencingLock::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    let (resolve_tx, resolve_rx) = oneshot::channel();
    let pending = executor.submit(ScriptedTransaction::new(
        lock,
        Behavior::Pending {
            resolver: Some(resolve_rx),
            log: Arc::clone(&log),
            tag: "t1",
        },
    ));

    let call = test_call("c1");
    resolve_tx.send(Some(Arc::clone(&call))).unwrap();

    let result = pending.await.expect("executor alive");
    assert!(result.is_success());
    assert!(Arc::ptr_eq(result.call().unwrap(), &call));
    assert_eq!(*log.lock().unwrap(), vec!["t1"]);
}

/// A prelude returning `Err` is converted into a failed result instead of
/// propagating, and the executor keeps processing.
#[tokio::test]
async fn prelude_error_is_contained() {
    let executor = TransactionExecutor::new(tokio::runtime::Handle::current());
    let lock = SequencingLock::new();

    let result = executor
        .submit(ScriptedTransaction::new(
            lock.clone(),
            Behavior::Fail(TransactionError::Internal("boom".into())),
        ))
        .await
        .expect("executor alive");

    assert!(!result.is_success());
    assert_eq!(result.code(), ResultCode::NotPermitted);
    assert!(result.message().unwrap().contains("failed internally"));

    // The shared lock was released on the failure path.
    let ok = executor
        .submit(ScriptedTransaction::new(
            lock,
            Behavior::Immediate(CallTransactionResult::succeeded(test_call("c2"))),
        ))
        .await
        .expect("executor alive");
    assert!(ok.is_success());
}

/// A panicking prelude must not strand the shared lock or kill the
/// sequencing thread.
#[tokio::test]
async fn prelude_panic_is_contained() {
    let executor = TransactionExecutor::new(tokio::runtime::Handle::current());
    let lock = SequencingLock::new();

    let result = executor
        .submit(ScriptedTransaction::new(
            lock.clone(),
            Behavior::Panic("prelude exploded"),
        ))
        .await
        .expect("executor alive");

    assert!(!result.is_success());
    assert!(result.message().unwrap().contains("prelude exploded"));

    let ok = executor
        .submit(ScriptedTransaction::new(
            lock,
            Behavior::Immediate(CallTransactionResult::succeeded(test_call("c3"))),
        ))
        .await
        .expect("executor alive");
    assert!(ok.is_success());
}

/// A panicking continuation must not escape either: the submitter still
/// gets a synthesized failure carrying the panic message, and the
/// sequencing thread keeps running.
#[tokio::test]
async fn continuation_panic_is_contained() {
    let executor = TransactionExecutor::new(tokio::runtime::Handle::current());
    let lock = SequencingLock::new();

    let (resolve_tx, resolve_rx) = oneshot::channel();
    let pending = executor.submit(ScriptedTransaction::new(
        lock.clone(),
        Behavior::PanicInContinuation {
            resolver: Some(resolve_rx),
            msg: "continuation exploded",
        },
    ));
    resolve_tx.send(Some(test_call("c4"))).unwrap();

    let result = pending.await.expect("executor alive");
    assert!(!result.is_success());
    assert_eq!(result.code(), ResultCode::NotPermitted);
    assert!(result.message().unwrap().contains("continuation exploded"));

    // The shared lock was released on the unwind path.
    let ok = executor
        .submit(ScriptedTransaction::new(
            lock,
            Behavior::Immediate(CallTransactionResult::succeeded(test_call("c5"))),
        ))
        .await
        .expect("executor alive");
    assert!(ok.is_success());
}

/// Continuations are dispatched in the order their origination futures
/// complete, not in submission order.
#[tokio::test]
async fn continuations_run_in_completion_order() {
    let executor = TransactionExecutor::new(tokio::runtime::Handle::current());
    let lock = SequencingLock::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    let (resolve_a, rx_a) = oneshot::channel();
    let (resolve_b, rx_b) = oneshot::channel();

    let pending_a = executor.submit(ScriptedTransaction::new(
        lock.clone(),
        Behavior::Pending {
            resolver: Some(rx_a),
            log: Arc::clone(&log),
            tag: "a",
        },
    ));
    let pending_b = executor.submit(ScriptedTransaction::new(
        lock,
        Behavior::Pending {
            resolver: Some(rx_b),
            log: Arc::clone(&log),
            tag: "b",
        },
    ));

    // Resolve the later submission first and wait for its result before
    // resolving the earlier one.
    resolve_b.send(Some(test_call("cb"))).unwrap();
    let result_b = pending_b.await.expect("executor alive");
    assert!(result_b.is_success());

    resolve_a.send(Some(test_call("ca"))).unwrap();
    let result_a = pending_a.await.expect("executor alive");
    assert!(result_a.is_success());

    assert_eq!(*log.lock().unwrap(), vec!["b", "a"]);
}

/// Submissions never processed because of shutdown resolve to a shutdown
/// error rather than hanging.
#[test]
fn shutdown_resolves_outstanding_handles() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap();

    let executor = TransactionExecutor::new(runtime.handle().clone());
    let lock = SequencingLock::new();

    // A pending transaction suspends; its resolver is dropped only after
    // shutdown, so the continuation can never dispatch to the sequencing
    // thread.
    let (resolve, rx) = oneshot::channel::<Option<Arc<Call>>>();
    let log = Arc::new(Mutex::new(Vec::new()));
    let pending = executor.submit(ScriptedTransaction::new(
        lock.clone(),
        Behavior::Pending {
            resolver: Some(rx),
            log,
            tag: "never",
        },
    ));

    // Let the prelude run before shutting down.
    let warmup = executor.submit(ScriptedTransaction::new(
        lock,
        Behavior::Immediate(CallTransactionResult::failed(
            ResultCode::NotPermitted,
            "warmup",
        )),
    ));
    warmup.blocking_wait().expect("executor alive");

    executor.shutdown();
    drop(resolve);

    assert!(matches!(pending.blocking_wait(), Err(ExecutorError::Shutdown)));
}
