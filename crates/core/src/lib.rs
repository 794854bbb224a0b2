//! Core abstractions for the callweave call-origination engine.
//!
//! This crate defines the transaction model the rest of the workspace is
//! built on:
//!
//! - [`CallTransaction`]: the abstract execution unit
//! - [`TransactionOutcome`]: immediate result or deferred result + continuation
//! - [`TransactionContext`]: immutable per-invocation input
//! - [`CallTransactionResult`]: the sum-typed outcome delivered to submitters
//! - [`SequencingLock`]: the single process-wide serialization lock
//! - Collaborator capability traits ([`PermissionGate`],
//!   [`CallOriginationService`])
//!
//! # Architecture
//!
//! ```text
//! caller → TransactionContext → CallTransaction ─submit→ TransactionExecutor
//!                                                              │
//!                           prelude under SequencingLock ◄─────┘
//!                                    │
//!              Complete(result) ── or ── Pending(future + continuation)
//!                                                │
//!                     continuation runs later, on the same sequencing
//!                     thread, under the same lock, in completion order
//! ```
//!
//! The executor itself lives in `callweave-executor`; this crate stays free
//! of any runtime so transactions remain trivially testable.

mod config;
mod context;
mod error;
mod lock;
mod result;
mod traits;
mod transaction;

pub use config::FeatureConfig;
pub use context::TransactionContext;
pub use error::{ExecutorError, TransactionError};
pub use lock::SequencingLock;
pub use result::{
    CallTransactionResult, ResultCode, CALL_CREATION_FAILED_MSG, CALL_NOT_PERMITTED_MSG,
};
pub use traits::{
    CallOriginationService, OriginationFuture, OriginationIntent, OriginationRequest,
    PermissionGate,
};
pub use transaction::{
    CallTransaction, Continuation, PendingContinuation, TransactionOutcome, TransactionState,
};
