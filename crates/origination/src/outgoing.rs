//! The outgoing-call transaction.

use callweave_core::{
    CallOriginationService, CallTransaction, CallTransactionResult, FeatureConfig,
    OriginationIntent, OriginationRequest, PendingContinuation, PermissionGate, ResultCode,
    SequencingLock, TransactionContext, TransactionError, TransactionOutcome,
    CALL_CREATION_FAILED_MSG, CALL_NOT_PERMITTED_MSG,
};
use callweave_types::{extras, video, Call, CallId, ExtensionData};
use std::sync::Arc;
use tracing::debug;

/// Transaction that originates one outgoing call.
///
/// ```text
/// privilege check ─ selects Standard vs Privileged intent
///        │
/// admission check ─ denied ⇒ NOT_PERMITTED, nothing else touched
///        │
/// extras assembly ─ exactly once per context
///        │
/// originate_call ─ no future ⇒ NOT_PERMITTED
///        │
/// continuation (sequencing thread):
///   absent call ⇒ NOT_PERMITTED │ present ⇒ [mark DIALING] ⇒ SUCCESS
/// ```
pub struct OutgoingCallTransaction {
    context: TransactionContext,
    permissions: Arc<dyn PermissionGate>,
    calls: Arc<dyn CallOriginationService>,
    config: FeatureConfig,
    lock: SequencingLock,
}

impl OutgoingCallTransaction {
    pub fn new(
        context: TransactionContext,
        permissions: Arc<dyn PermissionGate>,
        calls: Arc<dyn CallOriginationService>,
        config: FeatureConfig,
        lock: SequencingLock,
    ) -> Self {
        Self {
            context,
            permissions,
            calls,
            config,
            lock,
        }
    }

    /// Assemble the extension data for the origination request.
    ///
    /// Layers the per-attempt entries onto the caller-supplied seed: the
    /// verbatim call-id, capability bits, the video state (translated through
    /// the fixed table when the translation feature is enabled, raw
    /// pass-through otherwise), and the display name. Callable exactly once
    /// per context; a second call reports the context as erroneously reused.
    pub fn build_extras(&mut self) -> Result<ExtensionData, TransactionError> {
        let builder = self.context.take_extras_seed()?;
        let attributes = self.context.attributes();

        let video_state = if self.config.video_state_translation_enabled {
            video::transactional_to_video_profile_state(attributes.call_type())
        } else {
            attributes.call_type().as_raw()
        };

        Ok(builder
            .put(extras::CALL_ID_KEY, self.context.call_id().as_str())
            .put(
                extras::CALL_CAPABILITIES_KEY,
                attributes.capabilities().bits() as i32,
            )
            .put(extras::VIDEO_STATE_KEY, video_state)
            .put(extras::DISPLAY_NAME_KEY, attributes.display_name())
            .build())
    }

    fn not_permitted() -> TransactionOutcome {
        TransactionOutcome::Complete(CallTransactionResult::failed(
            ResultCode::NotPermitted,
            CALL_NOT_PERMITTED_MSG,
        ))
    }
}

impl CallTransaction for OutgoingCallTransaction {
    fn lock(&self) -> &SequencingLock {
        &self.lock
    }

    fn name(&self) -> &'static str {
        "OutgoingCallTransaction"
    }

    fn process(&mut self) -> Result<TransactionOutcome, TransactionError> {
        let call_id = self.context.call_id().clone();
        debug!(%call_id, "processing outgoing call transaction");

        // Privilege selects the intent variant; it does not gate the outcome.
        let intent = if self
            .permissions
            .has_privileged_call_capability(self.context.calling_identity())
        {
            OriginationIntent::Privileged
        } else {
            OriginationIntent::Standard
        };

        let account = self.context.attributes().phone_account_handle().clone();
        if !self.calls.is_origination_permitted(&account) {
            debug!(%call_id, %account, "origination not permitted");
            return Ok(Self::not_permitted());
        }
        debug!(%call_id, "outgoing call permitted");

        let extras = self.build_extras()?;
        let attributes = self.context.attributes();
        let request = OriginationRequest {
            address: attributes.address().clone(),
            phone_account_handle: account.clone(),
            extras,
            user: account.user,
            intent,
            calling_identity: self.context.calling_identity().to_owned(),
        };

        let Some(future) = self.calls.originate_call(request) else {
            debug!(%call_id, "origination service returned no future");
            return Ok(Self::not_permitted());
        };

        let calls = Arc::clone(&self.calls);
        let config = self.config;
        Ok(TransactionOutcome::Pending(PendingContinuation {
            future,
            continuation: Box::new(move |call| finish_origination(call_id, call, calls, config)),
        }))
    }
}

/// Continuation for a resolved origination future. Runs on the sequencing
/// thread, under the shared lock.
fn finish_origination(
    call_id: CallId,
    call: Option<Arc<Call>>,
    calls: Arc<dyn CallOriginationService>,
    config: FeatureConfig,
) -> CallTransactionResult {
    let Some(call) = call else {
        debug!(%call_id, "origination resolved without a call");
        return CallTransactionResult::failed(ResultCode::NotPermitted, CALL_CREATION_FAILED_MSG);
    };
    debug!(%call_id, call = %call, "origination complete");

    if config.extended_startup_timeout_enabled {
        // DIALING widens the anomaly watchdog's window for self-managed call
        // setup from the short default to one minute.
        calls.mark_dialing(&call);
    }

    CallTransactionResult::succeeded(call)
}
