//! Face geometry and hand angles.
//!
//! Geometry is recomputed on every surface size change and otherwise
//! left alone. Angles are recomputed on every frame from the clock.
//!
//! # Angle Convention
//!
//! Angles are degrees clockwise from 12 o'clock, which is the direction a
//! positive canvas rotation turns a mark drawn straight up from the center.
//!
//! ```text
//! second = (second + millisecond / 1000) * 6
//! minute = minute * 6
//! hour   = (hour mod 12) * 30 + minute / 2
//! ```
//!
//! The hour hand creeps continuously through the hour; the minute hand
//! jumps once per minute.

use crate::clock::WatchClock;
use crate::config::{HOUR_HAND_RATIO, MINUTE_HAND_RATIO, SECOND_HAND_RATIO};

/// Center point and hand lengths for the current surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FaceGeometry {
    pub center_x: f32,
    pub center_y: f32,
    pub second_hand_length: f32,
    pub minute_hand_length: f32,
    pub hour_hand_length: f32,
}

impl FaceGeometry {
    /// Compute geometry for a `width` x `height` surface.
    ///
    /// The center ignores window insets so round screens with a flat "chin"
    /// stay centered on the full panel. Hand lengths are fractions of the face
    /// radius (half the shorter dimension). Degenerate sizes give zero-length
    /// hands.
    pub fn from_surface(width: i32, height: i32) -> Self {
        let radius = (width.min(height) as f32 / 2.0).max(0.0);
        Self {
            center_x: width as f32 / 2.0,
            center_y: height as f32 / 2.0,
            second_hand_length: radius * SECOND_HAND_RATIO,
            minute_hand_length: radius * MINUTE_HAND_RATIO,
            hour_hand_length: radius * HOUR_HAND_RATIO,
        }
    }
}

/// Rotation of each hand, in degrees clockwise from 12 o'clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandAngles {
    pub hour: f32,
    pub minute: f32,
    pub second: f32,
}

impl HandAngles {
    /// Angles for a wall-clock reading. `hour` may be on either dial.
    pub fn at(hour: u32, minute: u32, second: u32, millisecond: u32) -> Self {
        let seconds = second as f32 + millisecond as f32 / 1000.0;
        let minute_rotation = minute as f32 * 6.0;
        let hour_hand_offset = minute as f32 / 2.0;
        Self {
            hour: (hour % 12) as f32 * 30.0 + hour_hand_offset,
            minute: minute_rotation,
            second: seconds * 6.0,
        }
    }

    /// Angles for the instant captured by `clock`.
    pub fn from_clock(clock: &WatchClock) -> Self {
        Self::at(clock.hour12(), clock.minute(), clock.second(), clock.millisecond())
    }
}
