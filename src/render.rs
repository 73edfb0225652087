//! Frame rendering on top of a [`Canvas`].
//!
//! Every frame is drawn from scratch in this order:
//!
//! | Step | Element | Paint |
//! |------|---------|-------|
//! | 1 | Background fill (black in ambient, dark gray otherwise) | - |
//! | 2 | 60 ticks, rotating the canvas 6° between them | tick |
//! | 3 | Date and weekday, centered | date |
//! | 4 | Battery percentage, centered | date |
//! | 5 | Unread notifications (only when > 0), centered | minute |
//! | 6 | Hour, minute and (interactive only) second hand | hands |
//! | 7 | Center hub | tick |
//!
//! Digital mode draws a seconds arc and a white disc between steps 2 and 3,
//! so the status rows stay on top, and replaces steps 6 and 7 with the hour
//! and minute digits.
//!
//! Hands are drawn pointing straight up from the center and rotated into
//! place. Each rotation is applied on top of the previous one, so the canvas
//! is turned by the *difference* between consecutive hand angles.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::Rectangle;
use heapless::String;

use crate::canvas::Canvas;
use crate::clock::WatchClock;
use crate::colors::{BLACK, DARK_GRAY};
use crate::config::{
    BATTERY_ROW_GAP,
    CENTER_GAP_AND_CIRCLE_RADIUS,
    DATE_ROW_GAP,
    DATE_TEXT_SIZE,
    DIGITAL_DIGIT_GAP,
    DIGITAL_RING_WIDTH,
    LONG_TICK_EVERY,
    LONG_TICK_STOP,
    NOTIFICATION_ROW_GAP,
    SHORT_TICK_START,
    SHORT_TICK_STOP,
    TICK_COUNT,
    TICK_ROTATION,
};
use crate::date::{Locale, STATUS_TEXT_CAPACITY, write_battery};
use crate::geometry::{FaceGeometry, HandAngles};
use crate::paint::{FacePaints, FontSize, Paint, PaintStyle};

/// Background color for the current mode.
#[inline]
pub const fn background_color(ambient: bool) -> Rgb565 {
    if ambient { BLACK } else { DARK_GRAY }
}

/// Fill the background and draw the tick ring.
///
/// A long tick is drawn before each rotation on every fifth position, a short
/// tick after every rotation. The canvas transform is saved and restored
/// around the ring.
pub fn draw_background<C: Canvas>(canvas: &mut C, geometry: &FaceGeometry, paints: &FacePaints, ambient: bool) {
    canvas.draw_color(background_color(ambient));

    let paint = &paints.tick_and_circle;
    let cx = geometry.center_x;

    canvas.save();
    for tick in 0..TICK_COUNT {
        if tick % LONG_TICK_EVERY == 0 {
            canvas.draw_line(cx, 0.0, cx, LONG_TICK_STOP, paint);
        }
        canvas.rotate(TICK_ROTATION, cx, geometry.center_y);
        canvas.draw_line(cx, SHORT_TICK_START, cx, SHORT_TICK_STOP, paint);
    }
    canvas.restore();
}

/// Draw `text` horizontally centered with its baseline at `y`.
fn draw_centered<C: Canvas>(canvas: &mut C, text: &str, y: f32, paint: &Paint) {
    let x = (canvas.width() as f32 - canvas.measure_text(text, paint)) / 2.0;
    canvas.draw_text(text, x, y, paint);
}

/// Draw the date, battery and notification rows.
///
/// Rows are positioned from the current canvas height. The notification row
/// is skipped when there is nothing unread.
pub fn draw_status<C: Canvas>(
    canvas: &mut C,
    paints: &FacePaints,
    locale: Locale,
    date_text: &str,
    battery_percent: u8,
    unread: u32,
) {
    let half_height = (canvas.height() / 2) as f32;

    draw_centered(canvas, date_text, half_height - DATE_TEXT_SIZE - DATE_ROW_GAP, &paints.date);

    let mut line: String<STATUS_TEXT_CAPACITY> = String::new();
    write_battery(&mut line, battery_percent);
    draw_centered(canvas, &line, half_height + DATE_TEXT_SIZE + BATTERY_ROW_GAP, &paints.date);

    if unread > 0 {
        locale.write_notifications(&mut line, unread);
        draw_centered(canvas, &line, half_height + DATE_TEXT_SIZE + NOTIFICATION_ROW_GAP, &paints.minute);
    }
}

/// Draw the hands and the hub. The second hand is skipped in ambient mode.
pub fn draw_hands<C: Canvas>(
    canvas: &mut C,
    geometry: &FaceGeometry,
    paints: &FacePaints,
    angles: &HandAngles,
    ambient: bool,
) {
    let (cx, cy) = (geometry.center_x, geometry.center_y);
    let hand_start = cy - CENTER_GAP_AND_CIRCLE_RADIUS;

    canvas.save();

    canvas.rotate(angles.hour, cx, cy);
    canvas.draw_line(cx, hand_start, cx, cy - geometry.hour_hand_length, &paints.hour);

    canvas.rotate(angles.minute - angles.hour, cx, cy);
    canvas.draw_line(cx, hand_start, cx, cy - geometry.minute_hand_length, &paints.minute);

    if !ambient {
        canvas.rotate(angles.second - angles.minute, cx, cy);
        canvas.draw_line(cx, hand_start, cx, cy - geometry.second_hand_length, &paints.second);
    }

    canvas.draw_circle(cx, cy, CENTER_GAP_AND_CIRCLE_RADIUS, &paints.tick_and_circle);

    canvas.restore();
}

/// Digital face backdrop: a seconds arc over `bounds` and a disc on top,
/// leaving a ring of the arc visible at the edge.
pub fn draw_seconds_disc<C: Canvas>(
    canvas: &mut C,
    bounds: Rectangle,
    geometry: &FaceGeometry,
    paints: &FacePaints,
    clock: &WatchClock,
) {
    let center = bounds.center();
    let radius = bounds.size.width.min(bounds.size.height) as f32 / 2.0;
    let seconds = clock.second() as f32 + clock.millisecond() as f32 / 1000.0;

    let arc_paint = paints.second.with_style(PaintStyle::Fill);
    canvas.draw_arc(center.x as f32, center.y as f32, radius, -90.0, seconds * 6.0, &arc_paint);
    canvas.draw_circle(
        geometry.center_x,
        geometry.center_y,
        geometry.center_x - DIGITAL_RING_WIDTH,
        &paints.background,
    );
}

/// Two-digit 12-hour hour and minute either side of the center.
pub fn draw_digits<C: Canvas>(canvas: &mut C, paints: &FacePaints, clock: &WatchClock) {
    let hour_paint = paints.hour.with_font(FontSize::Digit);
    let minute_paint = paints.minute.with_font(FontSize::Digit);

    let mut hour: String<4> = String::new();
    let mut minute: String<4> = String::new();
    let _ = write!(hour, "{:02}", clock.hour12());
    let _ = write!(minute, "{:02}", clock.minute());

    let half_width = canvas.width() as f32 / 2.0;
    let digit_height = FontSize::Digit.mono_font().baseline as f32;
    let y = canvas.height() as f32 / 2.0 + digit_height / 2.0;

    let hour_x = half_width - DIGITAL_DIGIT_GAP - canvas.measure_text(&hour, &minute_paint);
    canvas.draw_text(&hour, hour_x, y, &hour_paint);
    canvas.draw_text(&minute, half_width + DIGITAL_DIGIT_GAP, y, &minute_paint);
}

#[cfg(test)]
mod tests {
    use chrono::{Offset, Utc};
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::prelude::*;

    use super::*;
    use crate::canvas::recording::{Op, RecordingCanvas};
    use crate::canvas::{DisplayCanvas, text_width};
    use crate::colors::WHITE;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn square() -> (RecordingCanvas, FaceGeometry) {
        (RecordingCanvas::new(320, 320), FaceGeometry::from_surface(320, 320))
    }

    #[test]
    fn test_background_color_by_mode() {
        let (mut canvas, geometry) = square();
        draw_background(&mut canvas, &geometry, &FacePaints::new(), false);
        assert_eq!(canvas.ops[0], Op::Color(DARK_GRAY));

        let (mut canvas, geometry) = square();
        draw_background(&mut canvas, &geometry, &FacePaints::new(), true);
        assert_eq!(canvas.ops[0], Op::Color(BLACK));
    }

    #[test]
    fn test_tick_ring_counts() {
        let (mut canvas, geometry) = square();
        draw_background(&mut canvas, &geometry, &FacePaints::new(), false);

        let long = canvas
            .lines()
            .filter(|op| matches!(op, Op::Line { from, to, .. } if approx(from.1, 0.0) && approx(to.1, LONG_TICK_STOP)))
            .count();
        let short = canvas
            .lines()
            .filter(|op| matches!(op, Op::Line { from, .. } if approx(from.1, SHORT_TICK_START)))
            .count();
        let rotations = canvas.ops.iter().filter(|op| matches!(op, Op::Rotate(_))).count();

        assert_eq!(long, 12);
        assert_eq!(short, 60);
        assert_eq!(rotations, 60);
        assert_eq!(canvas.depth(), 0, "Ring leaves the canvas unrotated");
    }

    #[test]
    fn test_long_ticks_sit_on_hour_positions() {
        let (mut canvas, geometry) = square();
        draw_background(&mut canvas, &geometry, &FacePaints::new(), false);

        for op in canvas.lines() {
            if let Op::Line { from, rotation, .. } = op {
                if approx(from.1, 0.0) {
                    let hour_offset = rotation.rem_euclid(30.0);
                    assert!(hour_offset < 1e-2 || hour_offset > 30.0 - 1e-2, "long tick at {rotation}");
                }
            }
        }
    }

    #[test]
    fn test_status_rows() {
        let mut canvas = RecordingCanvas::new(320, 320);
        let paints = FacePaints::new();
        draw_status(&mut canvas, &paints, Locale::English, "03/05  Tuesday", 42, 3);

        assert_eq!(canvas.texts(), ["03/05  Tuesday", "42%", "3 new notifications"]);

        let Some(Op::Text { x, y, paint, .. }) = canvas.text_op("42%") else {
            panic!("battery row missing");
        };
        assert!(approx(*y, 160.0 + 26.0 + 40.0));
        assert!(approx(*x, (320.0 - text_width("42%", &paints.date)) / 2.0));
        assert_eq!(*paint, paints.date);

        let Some(Op::Text { y, paint, .. }) = canvas.text_op("03/05  Tuesday") else {
            panic!("date row missing");
        };
        assert!(approx(*y, 160.0 - 26.0 - 20.0));
        assert_eq!(*paint, paints.date);

        let Some(Op::Text { y, paint, .. }) = canvas.text_op("3 new notifications") else {
            panic!("notification row missing");
        };
        assert!(approx(*y, 160.0 + 26.0 + 80.0));
        assert_eq!(*paint, paints.minute);
    }

    #[test]
    fn test_no_notification_row_when_nothing_unread() {
        let mut canvas = RecordingCanvas::new(320, 320);
        draw_status(&mut canvas, &FacePaints::new(), Locale::English, "03/05  Tuesday", 100, 0);
        assert_eq!(canvas.texts(), ["03/05  Tuesday", "100%"]);
    }

    #[test]
    fn test_hands_interactive() {
        let (mut canvas, geometry) = square();
        let paints = FacePaints::new();
        let angles = HandAngles::at(3, 15, 30, 500);
        draw_hands(&mut canvas, &geometry, &paints, &angles, false);

        let hands: std::vec::Vec<(f32, f32, Paint)> = canvas
            .lines()
            .filter_map(|op| match op {
                Op::Line { to, rotation, paint, .. } => Some((to.1, *rotation, *paint)),
                _ => None,
            })
            .collect();
        assert_eq!(hands.len(), 3);

        let (hour_end, hour_rot, hour_paint) = hands[0];
        assert!(approx(hour_end, 160.0 - 80.0));
        assert!(approx(hour_rot, 97.5), "hour at {hour_rot}");
        assert_eq!(hour_paint, paints.hour);

        let (minute_end, minute_rot, _) = hands[1];
        assert!(approx(minute_end, 160.0 - 120.0));
        assert!(approx(minute_rot, 90.0), "minute at {minute_rot}");

        let (second_end, second_rot, second_paint) = hands[2];
        assert!(approx(second_end, 160.0 - 140.0));
        assert!(approx(second_rot, 183.0), "second at {second_rot}");
        assert_eq!(second_paint, paints.second);
    }

    #[test]
    fn test_hands_start_at_center_gap() {
        let (mut canvas, geometry) = square();
        draw_hands(&mut canvas, &geometry, &FacePaints::new(), &HandAngles::at(0, 0, 0, 0), false);
        for op in canvas.lines() {
            if let Op::Line { from, .. } = op {
                assert!(approx(from.0, 160.0));
                assert!(approx(from.1, 160.0 - CENTER_GAP_AND_CIRCLE_RADIUS));
            }
        }
    }

    #[test]
    fn test_ambient_hides_second_hand() {
        let (mut canvas, geometry) = square();
        let mut paints = FacePaints::new();
        paints.apply_ambient(true);
        draw_hands(&mut canvas, &geometry, &paints, &HandAngles::at(3, 15, 30, 500), true);

        assert_eq!(canvas.lines().count(), 2);
        assert!(!canvas.ops.iter().any(|op| matches!(op, Op::Line { paint, .. } if *paint == paints.second)));
    }

    #[test]
    fn test_hub_drawn_with_tick_paint() {
        let (mut canvas, geometry) = square();
        let paints = FacePaints::new();
        draw_hands(&mut canvas, &geometry, &paints, &HandAngles::at(0, 0, 0, 0), true);

        let hub = canvas.ops.iter().find(|op| matches!(op, Op::Circle { .. }));
        assert_eq!(
            hub,
            Some(&Op::Circle {
                center: (160.0, 160.0),
                radius: CENTER_GAP_AND_CIRCLE_RADIUS,
                paint: paints.tick_and_circle,
            })
        );
        assert_eq!(canvas.ops.last(), Some(&Op::Restore));
    }

    #[test]
    fn test_digital_face() {
        let (mut canvas, geometry) = square();
        let paints = FacePaints::new();
        let mut clock = WatchClock::new(Utc.fix());
        // 2024-03-03 15:07:15.000 UTC
        clock.set_time_millis(1_709_478_435_000);
        let bounds = Rectangle::new(Point::zero(), Size::new(320, 320));

        draw_seconds_disc(&mut canvas, bounds, &geometry, &paints, &clock);
        draw_digits(&mut canvas, &paints, &clock);

        let Some(Op::Arc { start, sweep, radius, paint, .. }) =
            canvas.ops.iter().find(|op| matches!(op, Op::Arc { .. }))
        else {
            panic!("seconds arc missing");
        };
        assert!(approx(*start, -90.0));
        assert!(approx(*sweep, 90.0));
        assert!(approx(*radius, 160.0));
        assert_eq!(paint.style, PaintStyle::Fill);

        assert!(canvas.ops.iter().any(|op| matches!(op, Op::Circle { radius, .. } if approx(*radius, 150.0))));
        assert_eq!(canvas.texts(), ["03", "07"]);

        let Some(Op::Text { x, .. }) = canvas.text_op("07") else {
            panic!("minute digits missing");
        };
        assert!(approx(*x, 170.0));
    }

    #[test]
    fn test_full_frame_on_mock_display() {
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        let geometry = FaceGeometry::from_surface(64, 64);
        let paints = FacePaints::new();

        let mut canvas = DisplayCanvas::new(&mut display);
        draw_background(&mut canvas, &geometry, &paints, false);
        draw_hands(&mut canvas, &geometry, &paints, &HandAngles::at(0, 0, 0, 0), false);

        let white_in = |xs: core::ops::RangeInclusive<i32>, ys: core::ops::RangeInclusive<i32>| {
            xs.clone()
                .any(|x| ys.clone().any(|y| display.get_pixel(Point::new(x, y)) == Some(WHITE)))
        };
        // 12 o'clock long tick at the top, hub ring around the center
        assert!(white_in(30..=34, 1..=3));
        assert!(white_in(27..=37, 27..=37));
        // Corners stay background
        assert_eq!(display.get_pixel(Point::new(1, 62)), Some(DARK_GRAY));
    }
}
