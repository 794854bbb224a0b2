//! Requested call attributes.

use crate::identifiers::{Address, PhoneAccountHandle};
use std::fmt;

/// Whether the caller is requesting an audio-only or a video call.
///
/// Raw values follow the transactional call-attributes vocabulary; see
/// [`crate::video`] for the mapping into the video-profile vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallType {
    Audio,
    Video,
}

impl CallType {
    /// Stable raw value as carried in extension data when video-state
    /// translation is disabled.
    pub fn as_raw(self) -> i32 {
        match self {
            CallType::Audio => 1,
            CallType::Video => 2,
        }
    }
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallType::Audio => f.write_str("audio"),
            CallType::Video => f.write_str("video"),
        }
    }
}

/// Capability bits advertised for the requested call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CallCapabilities(pub u32);

impl CallCapabilities {
    pub const SUPPORTS_SET_INACTIVE: Self = Self(1 << 1);
    pub const SUPPORTS_STREAM: Self = Self(1 << 2);
    pub const SUPPORTS_TRANSFER: Self = Self(1 << 3);
    pub const SUPPORTS_VIDEO_CALLING: Self = Self(1 << 4);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn bits(self) -> u32 {
        self.0
    }
}

/// Structured attributes of one origination attempt.
///
/// Immutable once built; construct via [`CallAttributes::builder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallAttributes {
    address: Address,
    phone_account_handle: PhoneAccountHandle,
    capabilities: CallCapabilities,
    display_name: String,
    call_type: CallType,
}

impl CallAttributes {
    pub fn builder(
        address: Address,
        phone_account_handle: PhoneAccountHandle,
    ) -> CallAttributesBuilder {
        CallAttributesBuilder {
            address,
            phone_account_handle,
            capabilities: CallCapabilities::default(),
            display_name: String::new(),
            call_type: CallType::Audio,
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn phone_account_handle(&self) -> &PhoneAccountHandle {
        &self.phone_account_handle
    }

    pub fn capabilities(&self) -> CallCapabilities {
        self.capabilities
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn call_type(&self) -> CallType {
        self.call_type
    }
}

/// Builder for [`CallAttributes`].
#[derive(Debug, Clone)]
pub struct CallAttributesBuilder {
    address: Address,
    phone_account_handle: PhoneAccountHandle,
    capabilities: CallCapabilities,
    display_name: String,
    call_type: CallType,
}

impl CallAttributesBuilder {
    pub fn capabilities(mut self, capabilities: CallCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn call_type(mut self, call_type: CallType) -> Self {
        self.call_type = call_type;
        self
    }

    pub fn build(self) -> CallAttributes {
        CallAttributes {
            address: self.address,
            phone_account_handle: self.phone_account_handle,
            capabilities: self.capabilities,
            display_name: self.display_name,
            call_type: self.call_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::UserHandle;

    fn handle() -> PhoneAccountHandle {
        PhoneAccountHandle::new("com.example/Svc", "acct0", UserHandle(0))
    }

    #[test]
    fn builder_populates_all_fields() {
        let attrs = CallAttributes::builder(Address::new("tel:+15551234567"), handle())
            .capabilities(
                CallCapabilities::SUPPORTS_SET_INACTIVE
                    .union(CallCapabilities::SUPPORTS_VIDEO_CALLING),
            )
            .display_name("Alice")
            .call_type(CallType::Video)
            .build();

        assert_eq!(attrs.address().as_str(), "tel:+15551234567");
        assert_eq!(attrs.display_name(), "Alice");
        assert_eq!(attrs.call_type(), CallType::Video);
        assert!(attrs
            .capabilities()
            .contains(CallCapabilities::SUPPORTS_VIDEO_CALLING));
        assert!(!attrs
            .capabilities()
            .contains(CallCapabilities::SUPPORTS_TRANSFER));
    }

    #[test]
    fn capability_union_is_bitwise() {
        let caps = CallCapabilities::SUPPORTS_STREAM.union(CallCapabilities::SUPPORTS_TRANSFER);
        assert_eq!(caps.bits(), (1 << 2) | (1 << 3));
    }
}
