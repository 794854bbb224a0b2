//! The shared serialization lock.

use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// Cloneable handle to the single serialization lock guarding synchronous
/// mutation of call-management state.
///
/// Every transaction in the subsystem references the *same* underlying mutex:
/// the lock is created once at subsystem startup and each transaction is
/// handed a clone at construction. Acquisition is always scoped through
/// [`acquire`](Self::acquire), so the lock is released on every exit path,
/// including unwinds out of a misbehaving transaction.
#[derive(Debug, Clone, Default)]
pub struct SequencingLock {
    inner: Arc<Mutex<()>>,
}

impl SequencingLock {
    /// Create the subsystem lock. Call once at startup; share via `clone()`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for a synchronous mutation scope.
    pub fn acquire(&self) -> MutexGuard<'_, ()> {
        self.inner.lock()
    }

    /// Whether two handles refer to the same underlying lock.
    pub fn shares_lock_with(&self, other: &SequencingLock) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_lock() {
        let lock = SequencingLock::new();
        let clone = lock.clone();
        assert!(lock.shares_lock_with(&clone));
        assert!(!lock.shares_lock_with(&SequencingLock::new()));
    }

    #[test]
    fn guard_releases_on_scope_exit() {
        let lock = SequencingLock::new();
        {
            let _guard = lock.acquire();
        }
        // Would deadlock if the scoped guard above were still held.
        let _guard = lock.acquire();
    }
}
