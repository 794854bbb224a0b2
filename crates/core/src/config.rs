//! Feature configuration consumed by transactions.

/// Configuration flags passed into a transaction at construction.
///
/// The engine consumes these but does not own them; callers decide the
/// setting per submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureConfig {
    /// When true, the raw transactional call type is remapped through the
    /// fixed translation table into the video-profile vocabulary before being
    /// placed into extension data. When false, the raw value passes through
    /// unchanged.
    pub video_state_translation_enabled: bool,

    /// When true, a successfully created call is marked DIALING before the
    /// success result is delivered, widening the watchdog's stuck-call window
    /// from the short default to one minute. Self-managed/VoIP call setup can
    /// legitimately take that long.
    pub extended_startup_timeout_enabled: bool,
}

impl FeatureConfig {
    pub fn all_enabled() -> Self {
        Self {
            video_state_translation_enabled: true,
            extended_startup_timeout_enabled: true,
        }
    }
}
