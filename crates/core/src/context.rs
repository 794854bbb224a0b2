//! Immutable per-invocation transaction input.

use crate::error::TransactionError;
use callweave_types::{CallAttributes, CallId, ExtensionData, ExtensionDataBuilder};

/// Everything a transaction needs about one origination attempt.
///
/// Immutable after construction, except that the extension-data seed may be
/// taken exactly once during the transaction prelude. Taking it a second
/// time means the context was reused across submissions, which is an error
/// rather than a silent double-population.
#[derive(Debug)]
pub struct TransactionContext {
    call_id: CallId,
    attributes: CallAttributes,
    calling_identity: String,
    extras_seed: Option<ExtensionData>,
}

impl TransactionContext {
    pub fn new(
        call_id: CallId,
        attributes: CallAttributes,
        calling_identity: impl Into<String>,
        extras_seed: ExtensionData,
    ) -> Self {
        Self {
            call_id,
            attributes,
            calling_identity: calling_identity.into(),
            extras_seed: Some(extras_seed),
        }
    }

    pub fn call_id(&self) -> &CallId {
        &self.call_id
    }

    pub fn attributes(&self) -> &CallAttributes {
        &self.attributes
    }

    /// The requesting package/identity, captured at construction.
    pub fn calling_identity(&self) -> &str {
        &self.calling_identity
    }

    /// Take the extension-data seed for the once-only extras assembly.
    ///
    /// Returns [`TransactionError::ExtrasAlreadyBuilt`] on a second take.
    pub fn take_extras_seed(&mut self) -> Result<ExtensionDataBuilder, TransactionError> {
        self.extras_seed
            .take()
            .map(ExtensionData::into_builder)
            .ok_or(TransactionError::ExtrasAlreadyBuilt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use callweave_types::{Address, CallAttributes, PhoneAccountHandle, UserHandle};

    fn context() -> TransactionContext {
        let attributes = CallAttributes::builder(
            Address::new("tel:+15550001111"),
            PhoneAccountHandle::new("com.example/Svc", "acct0", UserHandle(0)),
        )
        .build();
        TransactionContext::new(
            CallId::new("c1"),
            attributes,
            "com.example.dialer",
            ExtensionData::empty(),
        )
    }

    #[test]
    fn extras_seed_is_single_use() {
        let mut ctx = context();
        assert!(ctx.take_extras_seed().is_ok());
        assert_eq!(
            ctx.take_extras_seed().unwrap_err(),
            TransactionError::ExtrasAlreadyBuilt
        );
    }
}
