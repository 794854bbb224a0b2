//! Tracker for calls that may be stuck in call setup.

use callweave_core::FeatureConfig;
use callweave_types::CallId;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::warn;

/// Window allowed for a call in an ordinary transitory state.
pub const DEFAULT_TRANSITORY_WINDOW: Duration = Duration::from_secs(5);

/// Window allowed for a DIALING call when the extended startup timeout is
/// enabled.
pub const EXTENDED_DIALING_WINDOW: Duration = Duration::from_secs(60);

/// Select the stuck-call window for the given configuration.
pub fn watch_window(config: &FeatureConfig) -> Duration {
    if config.extended_startup_timeout_enabled {
        EXTENDED_DIALING_WINDOW
    } else {
        DEFAULT_TRANSITORY_WINDOW
    }
}

#[derive(Debug, Clone)]
struct WatchedCall {
    deadline: Instant,
    flagged: bool,
}

/// Tracks calls that entered DIALING and flags those overdue for a terminal
/// state.
///
/// Each watched call is flagged at most once; a terminal transition removes
/// it from the tracker entirely.
#[derive(Debug, Default)]
pub struct CallAnomalyWatchdog {
    watched: HashMap<CallId, WatchedCall>,
}

impl CallAnomalyWatchdog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start watching a call that just entered DIALING.
    ///
    /// Re-recording an already-watched call resets its deadline.
    pub fn record_dialing(&mut self, call_id: CallId, now: Instant, window: Duration) {
        self.watched.insert(
            call_id,
            WatchedCall {
                deadline: now + window,
                flagged: false,
            },
        );
    }

    /// The call reached a terminal state; stop watching it.
    pub fn record_terminal(&mut self, call_id: &CallId) {
        self.watched.remove(call_id);
    }

    /// Flag calls whose window has elapsed without a terminal transition.
    ///
    /// Returns the newly flagged call ids; each is also logged. Flagged
    /// calls stay tracked (a late terminal transition still cleans them up)
    /// but are not reported twice.
    pub fn scan(&mut self, now: Instant) -> Vec<CallId> {
        let mut anomalous = Vec::new();
        for (call_id, watched) in &mut self.watched {
            if !watched.flagged && now >= watched.deadline {
                watched.flagged = true;
                warn!(%call_id, "call stuck in dialing past its allowed window");
                anomalous.push(call_id.clone());
            }
        }
        anomalous
    }

    /// Number of calls currently watched.
    pub fn len(&self) -> usize {
        self.watched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watched.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_follows_the_extended_flag() {
        assert_eq!(
            watch_window(&FeatureConfig::default()),
            DEFAULT_TRANSITORY_WINDOW
        );
        let extended = FeatureConfig {
            extended_startup_timeout_enabled: true,
            ..FeatureConfig::default()
        };
        assert_eq!(watch_window(&extended), EXTENDED_DIALING_WINDOW);
    }

    #[test]
    fn overdue_call_is_flagged_once() {
        let mut watchdog = CallAnomalyWatchdog::new();
        let start = Instant::now();
        watchdog.record_dialing(CallId::new("c1"), start, DEFAULT_TRANSITORY_WINDOW);

        assert!(watchdog.scan(start).is_empty());

        let late = start + DEFAULT_TRANSITORY_WINDOW;
        assert_eq!(watchdog.scan(late), vec![CallId::new("c1")]);
        // Not reported again on the next scan.
        assert!(watchdog.scan(late + Duration::from_secs(1)).is_empty());
        assert_eq!(watchdog.len(), 1);
    }

    #[test]
    fn terminal_transition_stops_watching() {
        let mut watchdog = CallAnomalyWatchdog::new();
        let start = Instant::now();
        watchdog.record_dialing(CallId::new("c1"), start, DEFAULT_TRANSITORY_WINDOW);
        watchdog.record_terminal(&CallId::new("c1"));

        assert!(watchdog.is_empty());
        assert!(watchdog
            .scan(start + EXTENDED_DIALING_WINDOW)
            .is_empty());
    }

    #[test]
    fn extended_window_outlasts_the_default() {
        let mut watchdog = CallAnomalyWatchdog::new();
        let start = Instant::now();
        watchdog.record_dialing(CallId::new("c1"), start, EXTENDED_DIALING_WINDOW);

        // Past the short default but inside the extended window.
        assert!(watchdog.scan(start + DEFAULT_TRANSITORY_WINDOW).is_empty());
        assert_eq!(
            watchdog.scan(start + EXTENDED_DIALING_WINDOW),
            vec![CallId::new("c1")]
        );
    }
}
