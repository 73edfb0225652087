//! Host lifecycle events.
//!
//! Every callback the watch host can deliver is one variant of
//! [`WatchFaceEvent`], consumed by
//! [`WatchFaceEngine::handle`](crate::engine::WatchFaceEngine::handle).
//! Raw integer codes coming from the host are decoded with `TryFrom<i32>`.

use crate::error::FaceError;

/// Host-side notification filter. `None` means the user muted everything.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InterruptionFilter {
    /// All notifications pass.
    All,
    /// Only priority notifications pass.
    Priority,
    /// Nothing passes (mute mode).
    None,
    /// Only alarms pass.
    Alarms,
}

impl InterruptionFilter {
    /// Whether this filter puts the face into mute mode.
    #[inline]
    pub const fn is_mute(self) -> bool {
        matches!(self, Self::None)
    }
}

impl TryFrom<i32> for InterruptionFilter {
    type Error = FaceError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::All),
            2 => Ok(Self::Priority),
            3 => Ok(Self::None),
            4 => Ok(Self::Alarms),
            other => Err(FaceError::UnknownInterruptionFilter(other)),
        }
    }
}

/// Phase of a touch gesture on the face.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TapType {
    /// The user started touching the screen.
    Touch,
    /// The touch turned into another gesture or was cancelled.
    TouchCancel,
    /// A completed tap.
    Tap,
}

impl TryFrom<i32> for TapType {
    type Error = FaceError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Touch),
            1 => Ok(Self::TouchCancel),
            2 => Ok(Self::Tap),
            other => Err(FaceError::UnknownTapType(other)),
        }
    }
}

/// A lifecycle callback from the watch host.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WatchFaceEvent {
    /// The engine was attached to a surface.
    Created,
    /// The face became visible or hidden.
    VisibilityChanged(bool),
    /// Ambient (low power) mode entered or left.
    AmbientChanged(bool),
    /// The drawing surface changed size.
    SurfaceChanged { width: i32, height: i32 },
    /// The notification filter changed.
    InterruptionChanged(InterruptionFilter),
    /// A touch gesture on the face.
    Tap {
        kind: TapType,
        x: i32,
        y: i32,
        event_time: i64,
    },
    /// Periodic host tick (once per minute in ambient mode).
    TimeTick,
    /// The system timezone changed.
    TimeZoneChanged,
    /// The engine is being torn down.
    Destroyed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interruption_filter_codes() {
        assert_eq!(InterruptionFilter::try_from(1), Ok(InterruptionFilter::All));
        assert_eq!(InterruptionFilter::try_from(2), Ok(InterruptionFilter::Priority));
        assert_eq!(InterruptionFilter::try_from(3), Ok(InterruptionFilter::None));
        assert_eq!(InterruptionFilter::try_from(4), Ok(InterruptionFilter::Alarms));
    }

    #[test]
    fn test_interruption_filter_unknown_code() {
        assert_eq!(
            InterruptionFilter::try_from(0),
            Err(FaceError::UnknownInterruptionFilter(0))
        );
        assert_eq!(
            InterruptionFilter::try_from(7),
            Err(FaceError::UnknownInterruptionFilter(7))
        );
    }

    #[test]
    fn test_only_filter_none_mutes() {
        assert!(InterruptionFilter::None.is_mute());
        assert!(!InterruptionFilter::All.is_mute());
        assert!(!InterruptionFilter::Priority.is_mute());
        assert!(!InterruptionFilter::Alarms.is_mute());
    }

    #[test]
    fn test_tap_type_codes() {
        assert_eq!(TapType::try_from(0), Ok(TapType::Touch));
        assert_eq!(TapType::try_from(1), Ok(TapType::TouchCancel));
        assert_eq!(TapType::try_from(2), Ok(TapType::Tap));
        assert_eq!(TapType::try_from(-1), Err(FaceError::UnknownTapType(-1)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FaceError::UnknownTapType(9).to_string(),
            "unknown tap type: 9"
        );
        assert_eq!(
            FaceError::UnknownInterruptionFilter(5).to_string(),
            "unknown interruption filter: 5"
        );
    }
}
