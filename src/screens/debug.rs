//! Debug page.
//!
//! Shows frame timing, engine counters, the engine state flags and the
//! engine's debug log. Toggled with `Y` in the simulator.
//!
//! # Layout
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │ DEBUG VIEW            UP 00:12:34          │
//! ├────────────────────────────────────────────┤
//! │ TIMING         │ ENGINE        │ STATE     │
//! │ Frame: 1.0s    │ Draws: 753    │ VIS  ON   │
//! │ Draw:  0.4ms   │ Inval: 761    │ AMB  OFF  │
//! │ Idle:  999ms   │ Fires: 740    │ MUTE OFF  │
//! │ Min:   0.9s    │ Dates: 1      │ TMR  RUN  │
//! │ Max:   1.0s    │ TZ:    1      │ ANALOG    │
//! │ Avg:   1.0s    │ Taps:  2      │ +02:00    │
//! │                │               │ LANG EN   │
//! ├────────────────────────────────────────────┤
//! │ > Visible: ON                              │
//! │ > Timer: RUNNING                           │
//! │ > _                                        │
//! └────────────────────────────────────────────┘
//! ```

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use heapless::String;

use crate::clock::TimeSource;
use crate::colors::{BLACK, GRAY, GREEN, ORANGE, WHITE, YELLOW};
use crate::date::Locale;
use crate::device::DeviceStatus;
use crate::engine::{FaceMode, WatchFaceEngine};
use crate::paint::LABEL_FONT;
use crate::profiling::RenderMetrics;
use crate::timer::TimerState;

// =============================================================================
// Layout Constants
// =============================================================================

/// Header Y position (text baseline)
const HEADER_Y: i32 = 12;

const HEADER_DIVIDER_Y: i32 = 18;

const SECTION_HEADER_Y: i32 = 30;

/// Y position of the first stat row
const STATS_Y: i32 = 44;

const LOG_DIVIDER_Y: i32 = 130;

/// Y position of the first log line
const LOG_Y: i32 = 144;

const LOG_LINE_HEIGHT: i32 = 12;

const COL1_X: i32 = 8;
const COL2_X: i32 = 118;
const COL3_X: i32 = 224;

const STAT_LINE_HEIGHT: i32 = 13;

// =============================================================================
// Colors
// =============================================================================

const DEBUG_BG: Rgb565 = BLACK;
const HEADER_COLOR: Rgb565 = GREEN;
const SECTION_COLOR: Rgb565 = GRAY;
const VALUE_COLOR: Rgb565 = WHITE;
const HIGHLIGHT_COLOR: Rgb565 = YELLOW;
const LOG_PROMPT_COLOR: Rgb565 = GREEN;
const LOG_TEXT_COLOR: Rgb565 = ORANGE;
const DIVIDER_COLOR: Rgb565 = GRAY;

/// Dark green tint behind the log lines.
const LOG_BG: Rgb565 = Rgb565::new(1, 2, 1);

// =============================================================================
// Debug Page Drawing
// =============================================================================

/// Draw the debug page over the whole target.
pub fn draw_debug_page<D, T, S>(display: &mut D, metrics: &RenderMetrics, engine: &WatchFaceEngine<T, S>)
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
    T: TimeSource,
    S: DeviceStatus,
{
    display.clear(DEBUG_BG).ok();

    draw_header(display, metrics);
    draw_horizontal_line(display, HEADER_DIVIDER_Y);
    draw_section_headers(display);

    draw_timing_column(display, metrics);
    draw_engine_column(display, engine);
    draw_state_column(display, engine);

    draw_horizontal_line(display, LOG_DIVIDER_Y);
    draw_log_terminal(display, engine.log().iter());
}

/// Draw a line of label-font text at (`x`, `y`).
fn label<D: DrawTarget<Color = Rgb565>>(display: &mut D, text: &str, x: i32, y: i32, color: Rgb565) {
    Text::new(text, Point::new(x, y), MonoTextStyle::new(LABEL_FONT, color))
        .draw(display)
        .ok();
}

fn draw_header<D: DrawTarget<Color = Rgb565>>(display: &mut D, metrics: &RenderMetrics) {
    label(display, "DEBUG VIEW", COL1_X, HEADER_Y, HEADER_COLOR);

    let mut uptime: String<24> = String::new();
    let _ = write!(uptime, "UP {}", metrics.uptime_string());
    label(display, &uptime, 160, HEADER_Y, VALUE_COLOR);
}

fn draw_section_headers<D: DrawTarget<Color = Rgb565>>(display: &mut D) {
    label(display, "TIMING", COL1_X, SECTION_HEADER_Y, SECTION_COLOR);
    label(display, "ENGINE", COL2_X, SECTION_HEADER_Y, SECTION_COLOR);
    label(display, "STATE", COL3_X, SECTION_HEADER_Y, SECTION_COLOR);
}

/// Format microseconds as `ms` below one second, `s` above.
fn write_duration(s: &mut String<20>, name: &str, us: u32) {
    if us >= 1_000_000 {
        let _ = write!(s, "{name}{:.2}s", us as f32 / 1_000_000.0);
    } else {
        let _ = write!(s, "{name}{:.1}ms", us as f32 / 1000.0);
    }
}

fn draw_timing_column<D: DrawTarget<Color = Rgb565>>(display: &mut D, metrics: &RenderMetrics) {
    let min_us = if metrics.frame_time_min_us == u32::MAX {
        0
    } else {
        metrics.frame_time_min_us
    };

    let rows = [
        ("Frame: ", metrics.frame_time_us, VALUE_COLOR),
        ("Draw:  ", metrics.draw_time_us, VALUE_COLOR),
        ("Idle:  ", metrics.idle_time_us, VALUE_COLOR),
        ("Min:   ", min_us, HIGHLIGHT_COLOR),
        ("Max:   ", metrics.frame_time_max_us, HIGHLIGHT_COLOR),
        ("Avg:   ", metrics.frame_time_avg_us(), HIGHLIGHT_COLOR),
    ];

    let mut y = STATS_Y;
    for (name, us, color) in rows {
        let mut s: String<20> = String::new();
        write_duration(&mut s, name, us);
        label(display, &s, COL1_X, y, color);
        y += STAT_LINE_HEIGHT;
    }
}

fn draw_engine_column<D, T, S>(display: &mut D, engine: &WatchFaceEngine<T, S>)
where
    D: DrawTarget<Color = Rgb565>,
    T: TimeSource,
    S: DeviceStatus,
{
    let counters = engine.counters();
    let rows = [
        ("Draws: ", counters.draws),
        ("Inval: ", counters.invalidations),
        ("Fires: ", counters.timer_fires),
        ("Dates: ", engine.date_cache().rebuilds()),
        ("TZ:    ", counters.timezone_refreshes),
        ("Taps:  ", counters.taps),
    ];

    let mut y = STATS_Y;
    for (name, value) in rows {
        let mut s: String<20> = String::new();
        let _ = write!(s, "{name}{value}");
        label(display, &s, COL2_X, y, VALUE_COLOR);
        y += STAT_LINE_HEIGHT;
    }
}

fn draw_state_column<D, T, S>(display: &mut D, engine: &WatchFaceEngine<T, S>)
where
    D: DrawTarget<Color = Rgb565>,
    T: TimeSource,
    S: DeviceStatus,
{
    let flags = [
        ("VIS  ", engine.is_visible()),
        ("AMB  ", engine.is_ambient()),
        ("MUTE ", engine.is_muted()),
        ("TMR  ", engine.timer_state() == TimerState::Running),
    ];

    let mut y = STATS_Y;
    for (name, on) in flags {
        let mut s: String<20> = String::new();
        let _ = write!(s, "{name}{}", if on { "ON" } else { "OFF" });
        label(display, &s, COL3_X, y, if on { HIGHLIGHT_COLOR } else { VALUE_COLOR });
        y += STAT_LINE_HEIGHT;
    }

    let mode = match engine.mode() {
        FaceMode::Analog => "ANALOG",
        FaceMode::Digital => "DIGITAL",
    };
    label(display, mode, COL3_X, y, VALUE_COLOR);
    y += STAT_LINE_HEIGHT;

    let mut offset: String<20> = String::new();
    let _ = write!(offset, "{}", engine.clock().offset());
    label(display, &offset, COL3_X, y, VALUE_COLOR);
    y += STAT_LINE_HEIGHT;

    label(display, locale_label(engine.locale()), COL3_X, y, VALUE_COLOR);
}

const fn locale_label(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "LANG EN",
        Locale::Chinese => "LANG ZH",
    }
}

/// Draw the log lines, oldest first, followed by a cursor.
fn draw_log_terminal<'a, D>(display: &mut D, lines: impl Iterator<Item = &'a str>)
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
{
    let size = display.size();
    let top = LOG_DIVIDER_Y + 2;
    Rectangle::new(
        Point::new(0, top),
        Size::new(size.width, size.height.saturating_sub(top as u32)),
    )
    .into_styled(PrimitiveStyle::with_fill(LOG_BG))
    .draw(display)
    .ok();

    let mut y = LOG_Y;
    for line in lines {
        label(display, ">", COL1_X, y, LOG_PROMPT_COLOR);
        label(display, line, COL1_X + 10, y, LOG_TEXT_COLOR);
        y += LOG_LINE_HEIGHT;
    }

    label(display, "> _", COL1_X, y, LOG_PROMPT_COLOR);
}

fn draw_horizontal_line<D>(display: &mut D, y: i32)
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
{
    let right = display.size().width as i32 - 2;
    Line::new(Point::new(2, y), Point::new(right, y))
        .into_styled(PrimitiveStyle::with_stroke(DIVIDER_COLOR, 1))
        .draw(display)
        .ok();
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;

    use super::*;

    fn display() -> MockDisplay<Rgb565> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        display
    }

    #[test]
    fn test_duration_units() {
        let mut s: String<20> = String::new();
        write_duration(&mut s, "Draw: ", 1_500);
        assert_eq!(s.as_str(), "Draw: 1.5ms");

        let mut s: String<20> = String::new();
        write_duration(&mut s, "Frame: ", 1_000_000);
        assert_eq!(s.as_str(), "Frame: 1.00s");
    }

    #[test]
    fn test_divider_spans_target_width() {
        let mut display = display();
        draw_horizontal_line(&mut display, 10);
        assert_eq!(display.get_pixel(Point::new(2, 10)), Some(DIVIDER_COLOR));
        assert_eq!(display.get_pixel(Point::new(62, 10)), Some(DIVIDER_COLOR));
        assert_eq!(display.get_pixel(Point::new(1, 10)), None);
    }

    #[test]
    fn test_locale_labels() {
        assert_eq!(locale_label(Locale::English), "LANG EN");
        assert_eq!(locale_label(Locale::Chinese), "LANG ZH");
    }

    #[test]
    fn test_header_draws_title() {
        let mut display = display();
        draw_header(&mut display, &RenderMetrics::new());
        let lit = (0..64).any(|x| (0..HEADER_Y + 2).any(|y| display.get_pixel(Point::new(x, y)) == Some(HEADER_COLOR)));
        assert!(lit);
    }
}
