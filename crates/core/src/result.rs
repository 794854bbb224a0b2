//! The sum-typed outcome of a transaction.

use callweave_types::Call;
use std::fmt;
use std::sync::Arc;

/// Literal failure message for the admission-check and missing-future
/// branches.
///
/// The wording says "incoming" even though both branches concern outgoing
/// origination; the string is preserved byte-for-byte from the legacy
/// implementation because downstream consumers match on it.
pub const CALL_NOT_PERMITTED_MSG: &str = "incoming call not permitted at the current time";

/// Literal failure message for an origination future that resolves without a
/// call.
pub const CALL_CREATION_FAILED_MSG: &str = "call could not be created at this time";

/// Enumerated transaction outcome code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ResultCode {
    Success,
    NotPermitted,
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultCode::Success => f.write_str("SUCCESS"),
            ResultCode::NotPermitted => f.write_str("NOT_PERMITTED"),
        }
    }
}

/// Result delivered to the submitter of a transaction: exactly one per
/// submission.
///
/// Constructors are the only way to build one, which keeps the invariants
/// `success == (code == Success)` and `call.is_some() == success` true by
/// construction. Some consumers branch on the explicit `success` flag rather
/// than the code, so both are carried.
#[derive(Debug, Clone)]
pub struct CallTransactionResult {
    code: ResultCode,
    message: Option<String>,
    call: Option<Arc<Call>>,
    success: bool,
}

impl CallTransactionResult {
    /// Successful origination. Ownership of the call handle transfers to the
    /// submitter.
    pub fn succeeded(call: Arc<Call>) -> Self {
        Self {
            code: ResultCode::Success,
            message: None,
            call: Some(call),
            success: true,
        }
    }

    /// Failed origination with a diagnostic message.
    pub fn failed(code: ResultCode, message: impl Into<String>) -> Self {
        debug_assert!(code != ResultCode::Success, "failed() with Success code");
        Self {
            code,
            message: Some(message.into()),
            call: None,
            success: false,
        }
    }

    pub fn code(&self) -> ResultCode {
        self.code
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn call(&self) -> Option<&Arc<Call>> {
        self.call.as_ref()
    }

    /// Take ownership of the produced call handle.
    pub fn into_call(self) -> Option<Arc<Call>> {
        self.call
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

impl fmt::Display for CallTransactionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.message, &self.call) {
            (Some(msg), _) => write!(f, "{}: {}", self.code, msg),
            (None, Some(call)) => write!(f, "{}: {}", self.code, call),
            (None, None) => write!(f, "{}", self.code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use callweave_types::{Address, CallId};

    #[test]
    fn success_flag_agrees_with_code() {
        let call = Arc::new(Call::new(CallId::new("c1"), Address::new("tel:+1555")));
        let ok = CallTransactionResult::succeeded(call);
        assert!(ok.is_success());
        assert_eq!(ok.code(), ResultCode::Success);
        assert!(ok.call().is_some());
        assert!(ok.message().is_none());

        let failed = CallTransactionResult::failed(ResultCode::NotPermitted, CALL_NOT_PERMITTED_MSG);
        assert!(!failed.is_success());
        assert_eq!(failed.code(), ResultCode::NotPermitted);
        assert!(failed.call().is_none());
        assert_eq!(failed.message(), Some(CALL_NOT_PERMITTED_MSG));
    }

    #[test]
    fn into_call_transfers_the_handle() {
        let call = Arc::new(Call::new(CallId::new("c2"), Address::new("tel:+1666")));
        let result = CallTransactionResult::succeeded(Arc::clone(&call));
        let taken = result.into_call().unwrap();
        assert!(Arc::ptr_eq(&taken, &call));
    }
}
