//! Advisory anomaly watchdog for stuck calls.
//!
//! The watchdog observes calls entering the DIALING marker state and flags
//! any that fail to reach a terminal state within the allowed window. It is
//! purely diagnostic: it never cancels an in-flight transaction, only raises
//! a warning for operators.
//!
//! The window depends on configuration: the short default for ordinary
//! calls, or one minute when the extended startup timeout is enabled,
//! because self-managed/VoIP call setup can legitimately take longer.

mod tracker;

pub use tracker::{
    watch_window, CallAnomalyWatchdog, DEFAULT_TRANSITORY_WINDOW, EXTENDED_DIALING_WINDOW,
};
