//! Self-rescheduling redraw timer.
//!
//! The engine only decides whether the timer runs. The host owns the actual
//! scheduling: it polls [`RedrawTimer::next_fire_at`] and reports fires back
//! through the engine, which calls [`RedrawTimer::fire`].
//!
//! # State Machine
//!
//! ```text
//!            start(now)                 fire(now, true)
//!  Stopped ───────────────► Running ◄──────────────────┐
//!     ▲                        │  next fire = now      │
//!     │       stop()           │  + delay_until_next_second(now)
//!     └────────────────────────┴───────────────────────┘
//!          or fire(now, false)
//! ```
//!
//! Starting always schedules an immediate fire. Every later fire lands on a
//! wall-clock second boundary.

use crate::config::INTERACTIVE_UPDATE_RATE_MS;

/// Whether a redraw fire is pending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimerState {
    #[default]
    Stopped,
    Running,
}

/// Milliseconds from `now_ms` to the next whole second, in `(0, 1000]`.
#[inline]
pub const fn delay_until_next_second(now_ms: i64) -> i64 {
    INTERACTIVE_UPDATE_RATE_MS - now_ms.rem_euclid(INTERACTIVE_UPDATE_RATE_MS)
}

/// Redraw timer with a single pending fire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RedrawTimer {
    state: TimerState,
    next_fire: Option<i64>,
}

impl RedrawTimer {
    pub const fn new() -> Self {
        Self {
            state: TimerState::Stopped,
            next_fire: None,
        }
    }

    /// Enter `Running` with a fire due immediately. Replaces any pending fire.
    pub const fn start(&mut self, now_ms: i64) {
        self.state = TimerState::Running;
        self.next_fire = Some(now_ms);
    }

    /// Cancel the pending fire.
    pub const fn stop(&mut self) {
        self.state = TimerState::Stopped;
        self.next_fire = None;
    }

    #[inline]
    pub const fn state(&self) -> TimerState {
        self.state
    }

    /// Time of the pending fire, if any.
    #[inline]
    pub const fn next_fire_at(&self) -> Option<i64> {
        self.next_fire
    }

    /// Whether the pending fire is due at `now_ms`.
    pub const fn is_due(&self, now_ms: i64) -> bool {
        match self.next_fire {
            Some(at) => now_ms >= at,
            None => false,
        }
    }

    /// Consume a fire. Reschedules on the next second boundary when
    /// `keep_running`, stops otherwise.
    ///
    /// Returns `false` when no fire was pending (a stale host callback).
    pub fn fire(&mut self, now_ms: i64, keep_running: bool) -> bool {
        if self.next_fire.is_none() {
            return false;
        }
        if keep_running {
            self.next_fire = Some(now_ms + delay_until_next_second(now_ms));
        } else {
            self.stop();
        }
        true
    }
}
