//! Translation between the transactional call-type vocabulary and the
//! video-profile state vocabulary.
//!
//! The transactional call-attributes API speaks in [`CallType`] (audio/video);
//! the legacy call-management model speaks in video-profile states. When the
//! translation feature is enabled, the raw call type supplied by a caller is
//! remapped through the fixed table below before it is placed into extension
//! data. The shim is a compatibility layer and must stay table-driven: the
//! same input always yields the same output.

use crate::attributes::CallType;

/// Video-profile state: audio only, no video.
pub const STATE_AUDIO_ONLY: i32 = 0;
/// Video-profile state: transmitting video.
pub const STATE_TX_ENABLED: i32 = 1;
/// Video-profile state: receiving video.
pub const STATE_RX_ENABLED: i32 = 2;
/// Video-profile state: bidirectional video.
pub const STATE_BIDIRECTIONAL: i32 = STATE_TX_ENABLED | STATE_RX_ENABLED;

/// Map a transactional call type to its video-profile state.
pub fn transactional_to_video_profile_state(call_type: CallType) -> i32 {
    match call_type {
        CallType::Audio => STATE_AUDIO_ONLY,
        CallType::Video => STATE_BIDIRECTIONAL,
    }
}

/// Map a video-profile state back to a transactional call type.
///
/// Any state carrying video in either direction maps to [`CallType::Video`];
/// everything else collapses to [`CallType::Audio`].
pub fn video_profile_state_to_transactional(state: i32) -> CallType {
    match state {
        STATE_TX_ENABLED | STATE_RX_ENABLED | STATE_BIDIRECTIONAL => CallType::Video,
        _ => CallType::Audio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_table_is_fixed() {
        assert_eq!(
            transactional_to_video_profile_state(CallType::Audio),
            STATE_AUDIO_ONLY
        );
        assert_eq!(
            transactional_to_video_profile_state(CallType::Video),
            STATE_BIDIRECTIONAL
        );
    }

    #[test]
    fn forward_table_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(
                transactional_to_video_profile_state(CallType::Video),
                STATE_BIDIRECTIONAL
            );
        }
    }

    #[test]
    fn reverse_collapses_unknown_states_to_audio() {
        assert_eq!(
            video_profile_state_to_transactional(STATE_AUDIO_ONLY),
            CallType::Audio
        );
        assert_eq!(
            video_profile_state_to_transactional(STATE_TX_ENABLED),
            CallType::Video
        );
        assert_eq!(
            video_profile_state_to_transactional(STATE_RX_ENABLED),
            CallType::Video
        );
        assert_eq!(
            video_profile_state_to_transactional(STATE_BIDIRECTIONAL),
            CallType::Video
        );
        assert_eq!(video_profile_state_to_transactional(99), CallType::Audio);
    }

    #[test]
    fn roundtrip_through_both_tables() {
        for call_type in [CallType::Audio, CallType::Video] {
            let state = transactional_to_video_profile_state(call_type);
            assert_eq!(video_profile_state_to_transactional(state), call_type);
        }
    }
}
