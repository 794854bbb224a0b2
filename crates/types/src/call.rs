//! The call object produced by a successful origination.

use crate::identifiers::{Address, CallId};
use std::fmt;

/// A created call, produced by the origination collaborator.
///
/// Handed around as `Arc<Call>`. On a successful transaction, ownership of
/// the handle transfers to the submitter; the transaction retains no
/// reference after resolving its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    id: CallId,
    address: Address,
}

impl Call {
    pub fn new(id: CallId, address: Address) -> Self {
        Self { id, address }
    }

    pub fn id(&self) -> &CallId {
        &self.id
    }

    pub fn address(&self) -> &Address {
        &self.address
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "call[{}]", self.id)
    }
}
