// Crate-level lints: pixel math casts between f32, i32 and u32 everywhere
#![allow(clippy::cast_possible_truncation)] // f32 -> i32 when snapping to the pixel grid
#![allow(clippy::cast_precision_loss)] // u32/i32 -> f32 in layout math
#![allow(clippy::cast_possible_wrap)] // u32 -> i32 for surface sizes
#![allow(clippy::cast_sign_loss)] // f32 -> u32 for diameters, always clamped to >= 0
#![allow(clippy::struct_excessive_bools)] // engine lifecycle flags
#![allow(clippy::too_many_arguments)] // canvas primitives take coordinates plus a paint

//! Analog watch face engine for round wearable screens.
//!
//! One stateful [`WatchFaceEngine`](engine::WatchFaceEngine) paints the hands,
//! 60 tick marks, the date and weekday, the battery level and the unread
//! notification count. The host drives it with lifecycle
//! [events](event::WatchFaceEvent) and a one-second [redraw timer](timer).
//!
//! # Modules
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Lifecycle state machine and frame drawing |
//! | [`render`] | Background, status rows, hands, digital face |
//! | [`canvas`] | `Canvas` trait and the `embedded-graphics` adapter |
//! | [`paint`] | Paints and the ambient/interactive/mute variants |
//! | [`geometry`] | Center, hand lengths and hand angles |
//! | [`clock`] | Time source and calendar fields in the current timezone |
//! | [`date`] | Localized date line, cached per calendar day |
//! | [`device`] | Battery and unread notification status |
//! | [`timer`] | Redraw timer aligned to second boundaries |
//! | [`event`] | Host events and raw code decoding |
//! | [`profiling`] | Render metrics, engine counters, debug log |
//! | [`screens`] | Debug page |
//!
//! # Example
//!
//! ```
//! use analog_watchface::canvas::DisplayCanvas;
//! use analog_watchface::clock::SystemTimeSource;
//! use analog_watchface::date::Locale;
//! use analog_watchface::device::SimulatedDevice;
//! use analog_watchface::engine::WatchFaceEngine;
//! use analog_watchface::event::WatchFaceEvent;
//! use embedded_graphics::mock_display::MockDisplay;
//! use embedded_graphics::pixelcolor::Rgb565;
//! use embedded_graphics::prelude::*;
//!
//! let mut engine = WatchFaceEngine::new(SystemTimeSource, SimulatedDevice::new(80, 2), Locale::English);
//! engine.handle(WatchFaceEvent::Created);
//! engine.handle(WatchFaceEvent::SurfaceChanged { width: 64, height: 64 });
//! assert!(engine.handle(WatchFaceEvent::VisibilityChanged(true)));
//!
//! let mut display: MockDisplay<Rgb565> = MockDisplay::new();
//! display.set_allow_overdraw(true);
//! display.set_allow_out_of_bounds_drawing(true);
//! let bounds = display.bounding_box();
//! engine.draw(&mut DisplayCanvas::new(&mut display), bounds);
//! ```

pub mod canvas;
pub mod clock;
pub mod colors;
pub mod config;
pub mod date;
pub mod device;
pub mod engine;
pub mod error;
pub mod event;
pub mod geometry;
pub mod pages;
pub mod paint;
pub mod profiling;
pub mod render;
pub mod screens;
pub mod timer;

pub use error::FaceError;
