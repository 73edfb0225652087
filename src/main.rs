// Crate-level lints: host loop math between pixels, millis and durations
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)] // main() is one event loop

//! Desktop host for the analog watch face.
//!
//! Plays the role of the watch system: it owns the window, delivers
//! lifecycle events, schedules the redraw timer and calls `draw` whenever
//! the engine asks for a redraw.
//!
//! # Controls
//!
//! | Input | Event |
//! |-------|-------|
//! | `A` | Toggle ambient mode |
//! | `V` | Toggle visibility |
//! | `M` | Toggle mute (interruption filter None/All) |
//! | `Z` | Cycle the simulated timezone |
//! | `N` / `Shift+N` | Unread notifications up/down |
//! | `B` / `Shift+B` | Battery up/down by 5% |
//! | `Y` | Switch between face and debug page |
//! | `R` | Reset frame timing min/max/average |
//! | Mouse press/release | Touch / tap (tap toggles the digital face) |
//!
//! In ambient mode the host delivers a time tick once per minute instead of
//! running the one-second timer.

use std::thread;
use std::time::{Duration, Instant};

use analog_watchface::canvas::DisplayCanvas;
use analog_watchface::clock::{SystemTimeSource, TimeSource};
use analog_watchface::colors::BLACK;
use analog_watchface::config::{AMBIENT_TICK_MS, SCREEN_HEIGHT, SCREEN_WIDTH, SIMULATOR_POLL_MS, SIMULATOR_SCALE};
use analog_watchface::date::Locale;
use analog_watchface::device::SimulatedDevice;
use analog_watchface::engine::WatchFaceEngine;
use analog_watchface::event::{InterruptionFilter, TapType, WatchFaceEvent};
use analog_watchface::pages::Page;
use analog_watchface::profiling::RenderMetrics;
use analog_watchface::screens::draw_debug_page;
use chrono::FixedOffset;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::{Keycode, Mod};
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};

/// Offsets cycled by `Z`, in seconds east of UTC. `None` is the system zone.
const ZONE_CYCLE: [Option<i32>; 5] = [
    None,
    Some(2 * 3_600),
    Some(-5 * 3_600),
    Some(9 * 3_600),
    Some(5 * 3_600 + 1_800),
];

/// Battery step for `B` / `Shift+B`.
const BATTERY_STEP: i16 = 5;

/// System clock with a switchable timezone.
struct SimulatorTimeSource {
    system: SystemTimeSource,
    zone: usize,
}

impl SimulatorTimeSource {
    const fn new() -> Self {
        Self {
            system: SystemTimeSource,
            zone: 0,
        }
    }

    const fn next_zone(&mut self) {
        self.zone = (self.zone + 1) % ZONE_CYCLE.len();
    }
}

impl TimeSource for SimulatorTimeSource {
    fn now_millis(&self) -> i64 {
        self.system.now_millis()
    }

    fn default_offset(&self) -> FixedOffset {
        ZONE_CYCLE[self.zone]
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| self.system.default_offset())
    }
}

fn main() {
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(SIMULATOR_SCALE).build();
    let mut window = Window::new("Analog Watch Face", &output_settings);

    display.clear(BLACK).ok();
    window.update(&display);

    let mut engine = WatchFaceEngine::new(SimulatorTimeSource::new(), SimulatedDevice::new(76, 3), Locale::English);

    // Same order a watch host attaches a face
    engine.handle(WatchFaceEvent::Created);
    engine.handle(WatchFaceEvent::SurfaceChanged {
        width: SCREEN_WIDTH as i32,
        height: SCREEN_HEIGHT as i32,
    });
    engine.handle(WatchFaceEvent::InterruptionChanged(InterruptionFilter::All));
    engine.handle(WatchFaceEvent::VisibilityChanged(true));

    let bounds = display.bounding_box();
    let mut current_page = Page::default();
    let mut metrics = RenderMetrics::new();
    let mut last_frame = Instant::now();
    let mut last_ambient_tick = engine.time_source().now_millis();

    loop {
        let loop_start = Instant::now();
        // Host-side changes that the engine does not track (device status, page)
        let mut force_redraw = false;

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => {
                    engine.handle(WatchFaceEvent::Destroyed);
                    return;
                }
                SimulatorEvent::KeyDown {
                    keycode, keymod, repeat, ..
                } => {
                    if repeat {
                        continue;
                    }
                    let shift = keymod.intersects(Mod::LSHIFTMOD | Mod::RSHIFTMOD);
                    match keycode {
                        Keycode::A => {
                            let ambient = !engine.is_ambient();
                            engine.handle(WatchFaceEvent::AmbientChanged(ambient));
                            last_ambient_tick = engine.time_source().now_millis();
                        }
                        Keycode::V => {
                            let visible = !engine.is_visible();
                            engine.handle(WatchFaceEvent::VisibilityChanged(visible));
                            force_redraw = true;
                        }
                        Keycode::M => {
                            let filter = if engine.is_muted() {
                                InterruptionFilter::All
                            } else {
                                InterruptionFilter::None
                            };
                            engine.handle(WatchFaceEvent::InterruptionChanged(filter));
                        }
                        Keycode::Z => {
                            engine.time_source_mut().next_zone();
                            engine.handle(WatchFaceEvent::TimeZoneChanged);
                        }
                        Keycode::N => {
                            if shift {
                                engine.device_mut().decrement_unread();
                            } else {
                                engine.device_mut().increment_unread();
                            }
                            force_redraw = true;
                        }
                        Keycode::B => {
                            engine
                                .device_mut()
                                .adjust_battery(if shift { -BATTERY_STEP } else { BATTERY_STEP });
                            force_redraw = true;
                        }
                        Keycode::Y => {
                            current_page = current_page.toggle();
                            force_redraw = true;
                        }
                        Keycode::R => {
                            metrics.reset_stats();
                            force_redraw = true;
                        }
                        _ => {}
                    }
                }
                SimulatorEvent::MouseButtonDown { point, .. } => {
                    let tap = tap_event(TapType::Touch, point, engine.time_source());
                    engine.handle(tap);
                }
                SimulatorEvent::MouseButtonUp { point, .. } => {
                    let tap = tap_event(TapType::Tap, point, engine.time_source());
                    engine.handle(tap);
                }
                _ => {}
            }
        }

        // Service the redraw timer
        let now = engine.time_source().now_millis();
        if let Some(at) = engine.next_timer_fire()
            && now >= at
        {
            engine.on_timer_fired(now);
        }

        // Ambient mode gets one tick per minute
        if engine.is_ambient() && engine.is_visible() && now - last_ambient_tick >= AMBIENT_TICK_MS {
            engine.handle(WatchFaceEvent::TimeTick);
            last_ambient_tick = now;
        }

        if engine.take_invalidate() || force_redraw {
            let draw_start = Instant::now();
            match current_page {
                Page::Face if engine.is_visible() => {
                    engine.draw(&mut DisplayCanvas::new(&mut display), bounds);
                }
                Page::Face => {
                    display.clear(BLACK).ok();
                }
                Page::Debug => draw_debug_page(&mut display, &metrics, &engine),
            }
            let draw_time = draw_start.elapsed();
            let idle_time = draw_start.duration_since(last_frame);
            metrics.record_frame(last_frame.elapsed(), draw_time, idle_time);
            last_frame = Instant::now();
        }

        window.update(&display);

        let busy = loop_start.elapsed();
        let poll = Duration::from_millis(SIMULATOR_POLL_MS);
        if busy < poll {
            thread::sleep(poll.saturating_sub(busy));
        }
    }
}

/// Tap event at a point in display coordinates.
fn tap_event(kind: TapType, point: Point, time: &impl TimeSource) -> WatchFaceEvent {
    WatchFaceEvent::Tap {
        kind,
        x: point.x,
        y: point.y,
        event_time: time.now_millis(),
    }
}
