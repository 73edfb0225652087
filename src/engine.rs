//! The watch face engine: lifecycle state, redraw timer and frame drawing.
//!
//! The host owns the engine and drives it from a single thread:
//!
//! 1. Lifecycle callbacks arrive as [`WatchFaceEvent`]s through
//!    [`WatchFaceEngine::handle`], which returns whether to redraw.
//! 2. While the face is visible and interactive the [`RedrawTimer`] runs. The
//!    host polls [`WatchFaceEngine::next_timer_fire`] and calls
//!    [`WatchFaceEngine::on_timer_fired`] when it is due.
//! 3. The host calls [`WatchFaceEngine::draw`] whenever a redraw is pending
//!    ([`WatchFaceEngine::take_invalidate`]).
//!
//! # State Flags
//!
//! | Flag | Set by | Effect |
//! |------|--------|--------|
//! | visible | `VisibilityChanged` | timer, timezone receiver |
//! | ambient | `AmbientChanged` | timer, paint variant, second hand |
//! | mute | `InterruptionChanged` | hand alpha |
//! | receiver registered | visibility | `TimeZoneChanged` delivery |
//! | destroyed | `Destroyed` | terminal, later events ignored |

use embedded_graphics::primitives::Rectangle;

use crate::canvas::Canvas;
use crate::clock::{TimeSource, WatchClock};
use crate::date::{DateCache, Locale};
use crate::device::{DeviceStatus, clamp_battery};
use crate::event::{InterruptionFilter, TapType, WatchFaceEvent};
use crate::geometry::{FaceGeometry, HandAngles};
use crate::paint::FacePaints;
use crate::profiling::{DebugLog, FaceCounters};
use crate::render;
use crate::timer::{RedrawTimer, TimerState};

/// System UI options the face asks for at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WatchFaceStyle {
    /// Taps are delivered as [`WatchFaceEvent::Tap`].
    pub accepts_tap_events: bool,
    /// The system notification dot is hidden; the face draws its own count.
    pub hide_notification_indicator: bool,
    pub show_unread_count_indicator: bool,
}

/// Style requested by this face.
pub const FACE_STYLE: WatchFaceStyle = WatchFaceStyle {
    accepts_tap_events: true,
    hide_notification_indicator: true,
    show_unread_count_indicator: true,
};

/// What the face shows in the middle of the dial.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FaceMode {
    /// Hands and hub.
    #[default]
    Analog,
    /// Seconds arc and hour/minute digits.
    Digital,
}

impl FaceMode {
    #[inline]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Analog => Self::Digital,
            Self::Digital => Self::Analog,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Analog => "ANALOG",
            Self::Digital => "DIGITAL",
        }
    }
}

const fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

/// Stateful watch face.
pub struct WatchFaceEngine<T, S> {
    time: T,
    device: S,
    locale: Locale,

    clock: WatchClock,
    date: DateCache,
    geometry: FaceGeometry,
    paints: FacePaints,
    style: WatchFaceStyle,
    mode: FaceMode,

    created: bool,
    destroyed: bool,
    visible: bool,
    ambient: bool,
    mute: bool,
    receiver_registered: bool,
    invalidated: bool,

    timer: RedrawTimer,
    log: DebugLog,
    counters: FaceCounters,
}

impl<T: TimeSource, S: DeviceStatus> WatchFaceEngine<T, S> {
    /// Create an engine in the default (interactive, not muted, invisible)
    /// state, with the clock in the system default timezone.
    pub fn new(time: T, device: S, locale: Locale) -> Self {
        let clock = WatchClock::new(time.default_offset());
        Self {
            time,
            device,
            locale,
            clock,
            date: DateCache::new(),
            geometry: FaceGeometry::default(),
            paints: FacePaints::new(),
            style: FACE_STYLE,
            mode: FaceMode::Analog,
            created: false,
            destroyed: false,
            visible: false,
            ambient: false,
            mute: false,
            receiver_registered: false,
            invalidated: false,
            timer: RedrawTimer::new(),
            log: DebugLog::new(),
            counters: FaceCounters::default(),
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Apply a host event. Returns `true` when the face needs a redraw.
    ///
    /// Every event after [`WatchFaceEvent::Destroyed`] is ignored.
    pub fn handle(&mut self, event: WatchFaceEvent) -> bool {
        if self.destroyed {
            return false;
        }

        match event {
            WatchFaceEvent::Created => self.on_create(),
            WatchFaceEvent::VisibilityChanged(visible) => self.on_visibility_changed(visible),
            WatchFaceEvent::AmbientChanged(ambient) => self.on_ambient_changed(ambient),
            WatchFaceEvent::SurfaceChanged { width, height } => self.on_surface_changed(width, height),
            WatchFaceEvent::InterruptionChanged(filter) => self.on_interruption_changed(filter),
            WatchFaceEvent::Tap { kind, .. } => self.on_tap(kind),
            WatchFaceEvent::TimeTick => self.request_redraw(),
            WatchFaceEvent::TimeZoneChanged => self.on_time_zone_changed(),
            WatchFaceEvent::Destroyed => self.on_destroy(),
        }
    }

    fn on_create(&mut self) -> bool {
        self.created = true;
        self.style = FACE_STYLE;
        self.clock.set_offset(self.time.default_offset());
        self.log.push("Engine: CREATED");
        false
    }

    fn on_visibility_changed(&mut self, visible: bool) -> bool {
        self.visible = visible;
        self.log.push_fmt(format_args!("Visible: {}", on_off(visible)));

        let redraw = if visible {
            self.register_receiver();
            // The timezone may have changed while hidden
            self.refresh_time_zone();
            self.request_redraw()
        } else {
            self.unregister_receiver();
            false
        };

        self.update_timer();
        redraw
    }

    fn on_ambient_changed(&mut self, ambient: bool) -> bool {
        if ambient != self.ambient {
            self.counters.ambient_changes = self.counters.ambient_changes.wrapping_add(1);
            self.log.push_fmt(format_args!("Ambient: {}", on_off(ambient)));
        }
        self.ambient = ambient;
        self.paints.apply_ambient(ambient);
        self.update_timer();
        self.request_redraw()
    }

    fn on_surface_changed(&mut self, width: i32, height: i32) -> bool {
        self.geometry = FaceGeometry::from_surface(width, height);
        self.log.push_fmt(format_args!("Surface: {width}x{height}"));
        false
    }

    fn on_interruption_changed(&mut self, filter: InterruptionFilter) -> bool {
        let mute = filter.is_mute();
        if mute == self.mute {
            return false;
        }
        self.mute = mute;
        self.paints.apply_mute(mute);
        self.log.push_fmt(format_args!("Mute: {}", on_off(mute)));
        self.request_redraw()
    }

    fn on_tap(&mut self, kind: TapType) -> bool {
        self.counters.taps = self.counters.taps.wrapping_add(1);
        if kind == TapType::Tap {
            self.mode = self.mode.toggle();
            self.log.push_fmt(format_args!("Mode: {}", self.mode.label()));
        }
        self.request_redraw()
    }

    fn on_time_zone_changed(&mut self) -> bool {
        if !self.receiver_registered {
            return false;
        }
        self.refresh_time_zone();
        self.request_redraw()
    }

    fn on_destroy(&mut self) -> bool {
        self.timer.stop();
        self.unregister_receiver();
        self.destroyed = true;
        self.invalidated = false;
        self.log.push("Engine: DESTROYED");
        false
    }

    fn register_receiver(&mut self) {
        if !self.receiver_registered {
            self.receiver_registered = true;
            self.log.push("Receiver: REGISTERED");
        }
    }

    fn unregister_receiver(&mut self) {
        if self.receiver_registered {
            self.receiver_registered = false;
            self.log.push("Receiver: UNREGISTERED");
        }
    }

    fn refresh_time_zone(&mut self) {
        let offset = self.time.default_offset();
        self.clock.set_offset(offset);
        self.counters.timezone_refreshes = self.counters.timezone_refreshes.wrapping_add(1);
        self.log.push_fmt(format_args!("Timezone: {offset}"));
    }

    fn request_redraw(&mut self) -> bool {
        self.invalidated = true;
        self.counters.invalidations = self.counters.invalidations.wrapping_add(1);
        true
    }

    // =========================================================================
    // Timer
    // =========================================================================

    /// Whether the one-second redraw timer should run.
    #[inline]
    pub const fn should_timer_be_running(&self) -> bool {
        self.visible && !self.ambient && !self.destroyed
    }

    /// Cancel any pending fire, then restart with an immediate fire if the
    /// face should be ticking.
    fn update_timer(&mut self) {
        let was = self.timer.state();
        self.timer.stop();
        if self.should_timer_be_running() {
            self.timer.start(self.time.now_millis());
        }
        let now = self.timer.state();
        if now != was {
            let label = match now {
                TimerState::Running => "RUNNING",
                TimerState::Stopped => "STOPPED",
            };
            self.log.push_fmt(format_args!("Timer: {label}"));
        }
    }

    /// Time of the pending timer fire, in epoch milliseconds.
    #[inline]
    pub const fn next_timer_fire(&self) -> Option<i64> {
        self.timer.next_fire_at()
    }

    /// Consume a timer fire at `now_ms`. Invalidates and schedules the next
    /// fire on the following second boundary while the face should tick.
    ///
    /// Returns `true` when the fire was due and a redraw was requested.
    pub fn on_timer_fired(&mut self, now_ms: i64) -> bool {
        if self.destroyed || !self.timer.is_due(now_ms) {
            return false;
        }
        let keep_running = self.should_timer_be_running();
        if !self.timer.fire(now_ms, keep_running) {
            return false;
        }
        self.counters.timer_fires = self.counters.timer_fires.wrapping_add(1);
        if !keep_running {
            self.log.push("Timer: STOPPED");
        }
        self.request_redraw()
    }

    /// Return and clear the pending redraw request.
    #[inline]
    pub const fn take_invalidate(&mut self) -> bool {
        let pending = self.invalidated;
        self.invalidated = false;
        pending
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Draw one frame at the current time.
    ///
    /// `bounds` is the full surface; the digital face sizes its seconds arc
    /// from it. Drawing also satisfies any pending redraw request. Does
    /// nothing once destroyed.
    pub fn draw<C: Canvas>(&mut self, canvas: &mut C, bounds: Rectangle) {
        if self.destroyed {
            return;
        }
        self.clock.set_time_millis(self.time.now_millis());

        render::draw_background(canvas, &self.geometry, &self.paints, self.ambient);
        if self.mode == FaceMode::Digital {
            render::draw_seconds_disc(canvas, bounds, &self.geometry, &self.paints, &self.clock);
        }

        self.date
            .refresh(&self.clock, self.locale, canvas.width(), canvas.height());
        let battery = clamp_battery(self.device.battery_percent());
        let unread = self.device.unread_count();
        render::draw_status(canvas, &self.paints, self.locale, self.date.text(), battery, unread);

        match self.mode {
            FaceMode::Analog => {
                let angles = HandAngles::from_clock(&self.clock);
                render::draw_hands(canvas, &self.geometry, &self.paints, &angles, self.ambient);
            }
            FaceMode::Digital => render::draw_digits(canvas, &self.paints, &self.clock),
        }

        self.counters.draws = self.counters.draws.wrapping_add(1);
        self.invalidated = false;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub const fn is_created(&self) -> bool {
        self.created
    }

    #[inline]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[inline]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub const fn is_ambient(&self) -> bool {
        self.ambient
    }

    #[inline]
    pub const fn is_muted(&self) -> bool {
        self.mute
    }

    #[inline]
    pub const fn is_receiver_registered(&self) -> bool {
        self.receiver_registered
    }

    #[inline]
    pub const fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    #[inline]
    pub const fn mode(&self) -> FaceMode {
        self.mode
    }

    #[inline]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    #[inline]
    pub const fn style(&self) -> WatchFaceStyle {
        self.style
    }

    #[inline]
    pub const fn paints(&self) -> &FacePaints {
        &self.paints
    }

    #[inline]
    pub const fn geometry(&self) -> &FaceGeometry {
        &self.geometry
    }

    #[inline]
    pub const fn clock(&self) -> &WatchClock {
        &self.clock
    }

    #[inline]
    pub const fn date_cache(&self) -> &DateCache {
        &self.date
    }

    #[inline]
    pub const fn log(&self) -> &DebugLog {
        &self.log
    }

    #[inline]
    pub const fn counters(&self) -> &FaceCounters {
        &self.counters
    }

    #[inline]
    pub const fn device(&self) -> &S {
        &self.device
    }

    #[inline]
    pub const fn device_mut(&mut self) -> &mut S {
        &mut self.device
    }

    #[inline]
    pub const fn time_source(&self) -> &T {
        &self.time
    }

    #[inline]
    pub const fn time_source_mut(&mut self) -> &mut T {
        &mut self.time
    }
}
