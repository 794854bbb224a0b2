//! Foundation types for the callweave call-origination engine.
//!
//! This crate provides the types shared by every other workspace crate:
//!
//! - **Identifiers**: [`CallId`], [`Address`], [`UserHandle`],
//!   [`PhoneAccountHandle`]
//! - **Call shape**: [`CallAttributes`], [`CallCapabilities`], [`CallType`],
//!   [`Call`]
//! - **Extension data**: the immutable key/value map threaded through to the
//!   origination collaborator, built exactly once per attempt
//! - **Video state**: the translation shim between the transactional
//!   call-type vocabulary and the video-profile vocabulary
//!
//! # Design Philosophy
//!
//! This crate is self-contained with minimal dependencies. It does not depend
//! on any other workspace crates, making it the foundation layer.

mod attributes;
mod call;
mod extension;
mod identifiers;
pub mod video;

pub use attributes::{CallAttributes, CallAttributesBuilder, CallCapabilities, CallType};
pub use call::Call;
pub use extension::{extras, ExtensionData, ExtensionDataBuilder, ExtraValue};
pub use identifiers::{Address, CallId, PhoneAccountHandle, UserHandle};
