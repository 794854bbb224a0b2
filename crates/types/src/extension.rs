//! Extension data: auxiliary key/value parameters threaded through to the
//! origination collaborator.
//!
//! The map is built exactly once per origination attempt via
//! [`ExtensionDataBuilder`], which is consumed by `build()`. A context that
//! tries to assemble its extras twice gets a hard error from the layer above
//! instead of silently appending values a second time.

use std::collections::btree_map;
use std::collections::BTreeMap;

/// Well-known extension-data keys.
pub mod extras {
    /// Correlates the origination request with the submitting transaction.
    pub const CALL_ID_KEY: &str = "transaction.call_id";
    /// Capability bits for the requested call.
    pub const CALL_CAPABILITIES_KEY: &str = "call.capabilities";
    /// Video state to start the call with (raw or translated).
    pub const VIDEO_STATE_KEY: &str = "call.start_video_state";
    /// Caller display name.
    pub const DISPLAY_NAME_KEY: &str = "call.display_name";
}

/// A value stored in extension data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraValue {
    Str(String),
    Int(i32),
}

impl ExtraValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ExtraValue::Str(s) => Some(s),
            ExtraValue::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            ExtraValue::Int(i) => Some(*i),
            ExtraValue::Str(_) => None,
        }
    }
}

impl From<&str> for ExtraValue {
    fn from(s: &str) -> Self {
        ExtraValue::Str(s.to_owned())
    }
}

impl From<String> for ExtraValue {
    fn from(s: String) -> Self {
        ExtraValue::Str(s)
    }
}

impl From<i32> for ExtraValue {
    fn from(i: i32) -> Self {
        ExtraValue::Int(i)
    }
}

/// Immutable, ordered extension-data map.
///
/// Owned exclusively by a single transaction until the origination request is
/// issued; never shared across transactions and never mutated after build.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtensionData {
    entries: BTreeMap<String, ExtraValue>,
}

impl ExtensionData {
    /// Empty map, usable as a seed for [`ExtensionDataBuilder`].
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&ExtraValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ExtraValue> {
        self.entries.iter()
    }

    /// Reopen as a builder. Used once, during the transaction prelude, to
    /// layer the per-attempt entries onto a caller-supplied seed.
    pub fn into_builder(self) -> ExtensionDataBuilder {
        ExtensionDataBuilder {
            entries: self.entries,
        }
    }
}

/// One-shot builder producing an [`ExtensionData`].
///
/// `build()` consumes the builder, so a finished map cannot be appended to.
#[derive(Debug, Default)]
pub struct ExtensionDataBuilder {
    entries: BTreeMap<String, ExtraValue>,
}

impl ExtensionDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(mut self, key: impl Into<String>, value: impl Into<ExtraValue>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> ExtensionData {
        ExtensionData {
            entries: self.entries,
        }
    }
}
