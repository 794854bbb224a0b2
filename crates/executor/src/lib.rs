//! Sequencing-thread executor for call transactions.
//!
//! [`TransactionExecutor`] runs every transaction prelude and every
//! continuation on one dedicated `std::thread`. This is not a thread pool: it
//! exists to give the call-management subsystem a total order over all of its
//! mutations, trading parallelism for correctness simplicity.
//!
//! ```text
//! any thread ──submit──► [sequencing thread]
//!                          │ prelude, under the shared lock
//!                          │   Complete ──────────────► result delivered
//!                          │   Pending: future spawned on tokio handle
//!                          │            (lock NOT held across the await)
//!                          ▼
//!                        continuation channel ◄── future resolved
//!                          │ continuation, under the shared lock,
//!                          │ in completion order
//!                          └────────────────────────► result delivered
//! ```
//!
//! The receive loop is a `try_recv` cascade with priority
//! **continuations > submissions**, falling back to a blocking
//! `crossbeam::select!` with a shutdown arm — the same shape as a pinned
//! event loop with prioritized channels.

mod executor;
mod pending;

pub use executor::TransactionExecutor;
pub use pending::PendingResult;
