//! Watch face configuration constants.
//!
//! Everything that shapes the face is fixed at compile time: stroke widths,
//! tick lengths, text offsets, alpha levels and the redraw cadence. Geometry
//! that depends on the surface size (center, hand lengths) lives in
//! [`geometry`](crate::geometry) and is recomputed on surface changes.
//!
//! # Tick Layout
//!
//! Ticks are drawn at the 12 o'clock position and the canvas is rotated
//! between them, so these are plain y coordinates measured from the top edge:
//!
//! ```text
//!   y = 0   ┬  long tick (every 5th)
//!           │
//!   y = 12  ┴
//!   y = 14  ┬  short tick (every tick)
//!   y = 16  ┴
//! ```

// =============================================================================
// Timing Configuration
// =============================================================================

/// Redraw period in interactive mode. One redraw per second advances the
/// second hand; the timer aligns each fire to a wall-clock second boundary.
pub const INTERACTIVE_UPDATE_RATE_MS: i64 = 1_000;

/// Interval of the host "time tick" in ambient mode (once per minute).
pub const AMBIENT_TICK_MS: i64 = 60_000;

// =============================================================================
// Hand Configuration
// =============================================================================

/// Hour hand stroke width in pixels.
pub const HOUR_STROKE_WIDTH: u32 = 5;

/// Minute hand stroke width in pixels.
pub const MINUTE_STROKE_WIDTH: u32 = 3;

/// Second hand and tick stroke width in pixels.
pub const SECOND_TICK_STROKE_WIDTH: u32 = 2;

/// Gap between the center and the start of each hand, also the hub radius.
pub const CENTER_GAP_AND_CIRCLE_RADIUS: f32 = 4.0;

/// Second hand length as a fraction of the face radius.
pub const SECOND_HAND_RATIO: f32 = 0.875;

/// Minute hand length as a fraction of the face radius.
pub const MINUTE_HAND_RATIO: f32 = 0.75;

/// Hour hand length as a fraction of the face radius.
pub const HOUR_HAND_RATIO: f32 = 0.5;

/// Drop shadow radius used by every paint in interactive mode.
pub const SHADOW_RADIUS: u32 = 4;

// =============================================================================
// Tick Configuration
// =============================================================================

/// Number of tick marks around the bezel.
pub const TICK_COUNT: u32 = 60;

/// Canvas rotation between two ticks, in degrees.
pub const TICK_ROTATION: f32 = 360.0 / TICK_COUNT as f32;

/// Every n-th tick gets a long mark.
pub const LONG_TICK_EVERY: u32 = 5;

/// End of the long tick (starts at the bezel, y = 0).
pub const LONG_TICK_STOP: f32 = 12.0;

/// Start of the short tick.
pub const SHORT_TICK_START: f32 = 14.0;

/// End of the short tick.
pub const SHORT_TICK_STOP: f32 = 16.0;

// =============================================================================
// Text Layout
// =============================================================================

/// Nominal date text size. Text rows are offset from the vertical center
/// by multiples of this value.
pub const DATE_TEXT_SIZE: f32 = 26.0;

/// Date row: `height / 2 - DATE_TEXT_SIZE - DATE_ROW_GAP`.
pub const DATE_ROW_GAP: f32 = 20.0;

/// Battery row: `height / 2 + DATE_TEXT_SIZE + BATTERY_ROW_GAP`.
pub const BATTERY_ROW_GAP: f32 = 40.0;

/// Notification row: `height / 2 + DATE_TEXT_SIZE + NOTIFICATION_ROW_GAP`.
pub const NOTIFICATION_ROW_GAP: f32 = 80.0;

/// Horizontal gap between the digits and the center in digital mode.
pub const DIGITAL_DIGIT_GAP: f32 = 10.0;

/// Inset of the white disc from the seconds arc in digital mode.
pub const DIGITAL_RING_WIDTH: f32 = 10.0;

// =============================================================================
// Alpha Levels
// =============================================================================

/// Fully opaque.
pub const ALPHA_OPAQUE: u8 = 255;

/// Second hand alpha in normal operation (translucent white).
pub const SECOND_HAND_ALPHA: u8 = 80;

/// Hour and minute hand alpha while muted.
pub const MUTED_HAND_ALPHA: u8 = 100;

/// Second hand alpha while muted.
pub const MUTED_SECOND_ALPHA: u8 = 80;

// =============================================================================
// Simulator Configuration
// =============================================================================

/// Simulated round screen width in pixels.
pub const SCREEN_WIDTH: u32 = 320;

/// Simulated round screen height in pixels.
pub const SCREEN_HEIGHT: u32 = 320;

/// Window pixel scale of the simulator.
pub const SIMULATOR_SCALE: u32 = 2;

/// Main loop poll period of the simulator.
pub const SIMULATOR_POLL_MS: u64 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_rotation_is_six_degrees() {
        assert!((TICK_ROTATION - 6.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_hand_ratios_ordered() {
        assert!(HOUR_HAND_RATIO < MINUTE_HAND_RATIO);
        assert!(MINUTE_HAND_RATIO < SECOND_HAND_RATIO);
        assert!(SECOND_HAND_RATIO < 1.0, "Second hand must stay inside the bezel");
    }

    #[test]
    fn test_tick_stops_do_not_overlap() {
        assert!(LONG_TICK_STOP < SHORT_TICK_START);
        assert!(SHORT_TICK_START < SHORT_TICK_STOP);
    }
}
