//! Test helpers for callweave — scripted fake collaborators.
//!
//! [`FakeCallsManager`] implements both collaborator capability traits
//! ([`PermissionGate`] and [`CallOriginationService`]) with scripted
//! behavior and full recording, so tests can drive every branch of a
//! transaction and then assert on exactly what the engine asked of its
//! collaborators.
//!
//! # Example
//!
//! ```rust
//! use callweave_test_helpers::{FakeCallsManager, OriginationBehavior};
//! use callweave_types::{Address, Call, CallId};
//! use std::sync::Arc;
//!
//! let call = Arc::new(Call::new(CallId::new("c1"), Address::new("tel:+1555")));
//! let calls = FakeCallsManager::builder()
//!     .privileged(true)
//!     .behavior(OriginationBehavior::ResolveCall(Arc::clone(&call)))
//!     .build();
//!
//! // ... run a transaction against `calls`, then:
//! assert!(calls.dialing_marks().is_empty());
//! ```

use callweave_core::{
    CallOriginationService, OriginationFuture, OriginationRequest, PermissionGate,
};
use callweave_types::{Call, CallId, PhoneAccountHandle};
use futures::FutureExt;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::oneshot;

/// How the fake responds to `originate_call`.
#[derive(Debug, Clone)]
pub enum OriginationBehavior {
    /// Return no future at all (immediate rejection).
    NoFuture,
    /// Return a future that resolves to an absent call.
    ResolveAbsent,
    /// Return a future that resolves to the given call.
    ResolveCall(Arc<Call>),
    /// Return a future the test resolves explicitly via
    /// [`FakeCallsManager::resolve_next`]. Useful for ordering tests.
    Manual,
}

/// Builder for [`FakeCallsManager`].
#[derive(Debug, Clone)]
pub struct FakeCallsManagerBuilder {
    admission_permitted: bool,
    privileged: bool,
    behavior: OriginationBehavior,
}

impl FakeCallsManagerBuilder {
    /// Whether the admission check passes. Default: true.
    pub fn admission(mut self, permitted: bool) -> Self {
        self.admission_permitted = permitted;
        self
    }

    /// Whether the privilege gate grants the caller. Default: false.
    pub fn privileged(mut self, privileged: bool) -> Self {
        self.privileged = privileged;
        self
    }

    /// Scripted origination behavior. Default: `ResolveAbsent`.
    pub fn behavior(mut self, behavior: OriginationBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn build(self) -> Arc<FakeCallsManager> {
        Arc::new(FakeCallsManager {
            admission_permitted: self.admission_permitted,
            privileged: self.privileged,
            behavior: self.behavior,
            permission_queries: Mutex::new(Vec::new()),
            admission_queries: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            dialing: Mutex::new(Vec::new()),
            manual_slots: Mutex::new(VecDeque::new()),
        })
    }
}

/// Scripted implementation of both collaborator traits.
///
/// Recorders are interior-mutable so the fake can be shared as
/// `Arc<FakeCallsManager>` across the test and the sequencing thread.
pub struct FakeCallsManager {
    admission_permitted: bool,
    privileged: bool,
    behavior: OriginationBehavior,
    permission_queries: Mutex<Vec<String>>,
    admission_queries: Mutex<Vec<PhoneAccountHandle>>,
    requests: Mutex<Vec<OriginationRequest>>,
    dialing: Mutex<Vec<CallId>>,
    manual_slots: Mutex<VecDeque<oneshot::Sender<Option<Arc<Call>>>>>,
}

impl FakeCallsManager {
    pub fn builder() -> FakeCallsManagerBuilder {
        FakeCallsManagerBuilder {
            admission_permitted: true,
            privileged: false,
            behavior: OriginationBehavior::ResolveAbsent,
        }
    }

    /// Resolve the oldest outstanding `Manual` origination future.
    ///
    /// # Panics
    ///
    /// Panics if no manual origination is outstanding.
    pub fn resolve_next(&self, call: Option<Arc<Call>>) {
        let sender = self
            .manual_slots
            .lock()
            .pop_front()
            .expect("no outstanding manual origination");
        let _ = sender.send(call);
    }

    /// Identities the privilege gate was asked about, in order.
    pub fn permission_queries(&self) -> Vec<String> {
        self.permission_queries.lock().clone()
    }

    /// Phone accounts the admission check was asked about, in order.
    pub fn admission_queries(&self) -> Vec<PhoneAccountHandle> {
        self.admission_queries.lock().clone()
    }

    /// Every origination request received, in order.
    pub fn origination_requests(&self) -> Vec<OriginationRequest> {
        self.requests.lock().clone()
    }

    /// Calls marked DIALING, in order.
    pub fn dialing_marks(&self) -> Vec<CallId> {
        self.dialing.lock().clone()
    }
}

impl PermissionGate for FakeCallsManager {
    fn has_privileged_call_capability(&self, calling_identity: &str) -> bool {
        self.permission_queries
            .lock()
            .push(calling_identity.to_owned());
        self.privileged
    }
}

impl CallOriginationService for FakeCallsManager {
    fn is_origination_permitted(&self, handle: &PhoneAccountHandle) -> bool {
        self.admission_queries.lock().push(handle.clone());
        self.admission_permitted
    }

    fn originate_call(&self, request: OriginationRequest) -> Option<OriginationFuture> {
        self.requests.lock().push(request);
        match &self.behavior {
            OriginationBehavior::NoFuture => None,
            OriginationBehavior::ResolveAbsent => Some(async { None }.boxed()),
            OriginationBehavior::ResolveCall(call) => {
                let call = Arc::clone(call);
                Some(async move { Some(call) }.boxed())
            }
            OriginationBehavior::Manual => {
                let (tx, rx) = oneshot::channel();
                self.manual_slots.lock().push_back(tx);
                Some(async move { rx.await.unwrap_or(None) }.boxed())
            }
        }
    }

    fn mark_dialing(&self, call: &Arc<Call>) {
        self.dialing.lock().push(call.id().clone());
    }
}
