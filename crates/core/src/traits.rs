//! Capability traits for the external collaborators.
//!
//! The engine consumes these at the boundary and never implements them; each
//! is independently substitutable for testing (see
//! `callweave-test-helpers`).

use callweave_types::{Address, Call, ExtensionData, PhoneAccountHandle, UserHandle};
use futures::future::BoxFuture;
use std::sync::Arc;

/// Deferred call-creation result returned by the origination collaborator.
///
/// Resolves to `Some(call)` when the call was created, `None` when it could
/// not be.
pub type OriginationFuture = BoxFuture<'static, Option<Arc<Call>>>;

/// Which origination variant the transaction logically requests.
///
/// Selected by the privilege check; it shapes the downstream request and does
/// not by itself change the success/failure outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginationIntent {
    Standard,
    Privileged,
}

/// Validated request handed to [`CallOriginationService::originate_call`].
#[derive(Debug, Clone)]
pub struct OriginationRequest {
    pub address: Address,
    pub phone_account_handle: PhoneAccountHandle,
    pub extras: ExtensionData,
    pub user: UserHandle,
    pub intent: OriginationIntent,
    pub calling_identity: String,
}

/// Answers whether a caller may place a privileged call.
pub trait PermissionGate: Send + Sync {
    fn has_privileged_call_capability(&self, calling_identity: &str) -> bool;
}

/// The external component that performs actual call creation and owns the
/// downstream call state.
pub trait CallOriginationService: Send + Sync {
    /// Admission check: whether origination is currently permitted for the
    /// given phone account. Independent of privilege level.
    fn is_origination_permitted(&self, handle: &PhoneAccountHandle) -> bool;

    /// Start creating a call. Returns `None` to signal immediate rejection,
    /// or a future that resolves to the created call (or to `None` if the
    /// call could not be created).
    fn originate_call(&self, request: OriginationRequest) -> Option<OriginationFuture>;

    /// Fire-and-forget transition of a created call into the DIALING state,
    /// widening the anomaly watchdog's stuck-call window.
    fn mark_dialing(&self, call: &Arc<Call>);
}
