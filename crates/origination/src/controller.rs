//! Caller-facing entry point for call origination.

use crate::outgoing::OutgoingCallTransaction;
use callweave_core::{
    CallOriginationService, FeatureConfig, PermissionGate, SequencingLock, TransactionContext,
};
use callweave_executor::{PendingResult, TransactionExecutor};
use callweave_types::{CallAttributes, CallId, ExtensionData};
use std::sync::Arc;
use tracing::instrument;

/// Owns the sequencing executor and the subsystem's shared serialization
/// lock, and wraps call-origination requests into transactions.
///
/// One controller per call-management subsystem; it lives from subsystem
/// startup to shutdown, and every transaction it creates references its
/// single [`SequencingLock`].
pub struct OriginationController {
    executor: TransactionExecutor,
    permissions: Arc<dyn PermissionGate>,
    calls: Arc<dyn CallOriginationService>,
    lock: SequencingLock,
}

impl OriginationController {
    /// Create the controller and spawn its sequencing thread.
    pub fn new(
        runtime: tokio::runtime::Handle,
        permissions: Arc<dyn PermissionGate>,
        calls: Arc<dyn CallOriginationService>,
    ) -> Self {
        Self {
            executor: TransactionExecutor::new(runtime),
            permissions,
            calls,
            lock: SequencingLock::new(),
        }
    }

    /// The subsystem's shared serialization lock.
    pub fn sequencing_lock(&self) -> &SequencingLock {
        &self.lock
    }

    /// Submit one outgoing-call origination transaction.
    ///
    /// The sole entry point a caller uses to request origination. Returns a
    /// pending handle resolving to the transaction's result; the transaction
    /// itself runs on the sequencing thread.
    #[instrument(skip_all, fields(call_id = %call_id))]
    pub fn submit_outgoing_call(
        &self,
        call_id: CallId,
        attributes: CallAttributes,
        calling_identity: impl Into<String>,
        extras_seed: ExtensionData,
        config: FeatureConfig,
    ) -> PendingResult {
        let context = TransactionContext::new(call_id, attributes, calling_identity, extras_seed);
        let transaction = OutgoingCallTransaction::new(
            context,
            Arc::clone(&self.permissions),
            Arc::clone(&self.calls),
            config,
            self.lock.clone(),
        );
        self.executor.submit(Box::new(transaction))
    }

    /// Stop the sequencing thread and wait for it to exit.
    pub fn shutdown(self) {
        self.executor.shutdown();
    }
}
