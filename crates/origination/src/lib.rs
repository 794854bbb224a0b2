//! Outgoing call origination.
//!
//! [`OutgoingCallTransaction`] encodes the steps required to originate one
//! call: privilege resolution → admission check → once-only extension-data
//! assembly → origination request → continuation. The transaction itself is
//! runtime-free; [`OriginationController`] wires it to the sequencing
//! executor and is the sole entry point callers use.

mod controller;
mod outgoing;

pub use controller::OriginationController;
pub use outgoing::OutgoingCallTransaction;
