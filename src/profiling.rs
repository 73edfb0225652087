//! Render metrics, engine counters and the in-app debug log.
//!
//! Shown on the debug page of the simulator.
//!
//! # Usage
//!
//! ```ignore
//! let mut metrics = RenderMetrics::new();
//!
//! // In the host loop:
//! let frame_start = Instant::now();
//! engine.draw(&mut canvas, bounds);
//! let draw_time = frame_start.elapsed();
//! // ... sleep until the next event ...
//! metrics.record_frame(frame_start.elapsed(), draw_time, idle_time);
//!
//! // Engine side:
//! log.push_fmt(format_args!("Timezone: {offset}"));
//! ```

use core::fmt::{self, Write};
use std::time::{Duration, Instant};

use heapless::{Deque, String};

// =============================================================================
// Debug Log Configuration
// =============================================================================

/// Maximum number of log lines to keep in the ring buffer.
pub const LOG_BUFFER_SIZE: usize = 8;

/// Maximum characters per log line.
pub const LOG_LINE_LENGTH: usize = 40;

// =============================================================================
// Render Metrics
// =============================================================================

/// Frame timing measured by the host loop.
pub struct RenderMetrics {
    /// Total frame time (draw + idle + overhead)
    pub frame_time_us: u32,
    /// Time spent inside `draw`
    pub draw_time_us: u32,
    /// Time spent waiting for the next event
    pub idle_time_us: u32,

    pub frame_time_min_us: u32,
    pub frame_time_max_us: u32,
    /// Exponential moving average of the frame time
    frame_time_avg_us: f32,

    /// Frames drawn since startup
    pub total_frames: u64,

    start_time: Instant,
}

impl RenderMetrics {
    /// Create empty metrics, starting the uptime timer.
    pub fn new() -> Self {
        Self {
            frame_time_us: 0,
            draw_time_us: 0,
            idle_time_us: 0,
            frame_time_min_us: u32::MAX,
            frame_time_max_us: 0,
            frame_time_avg_us: 0.0,
            total_frames: 0,
            start_time: Instant::now(),
        }
    }

    /// Smoothing factor of the moving average.
    const EMA_ALPHA: f32 = 0.1;

    /// Record timing for one drawn frame.
    pub fn record_frame(&mut self, total_time: Duration, draw_time: Duration, idle_time: Duration) {
        let total_us = saturating_micros(total_time);

        self.frame_time_us = total_us;
        self.draw_time_us = saturating_micros(draw_time);
        self.idle_time_us = saturating_micros(idle_time);

        self.frame_time_min_us = self.frame_time_min_us.min(total_us);
        self.frame_time_max_us = self.frame_time_max_us.max(total_us);

        if self.total_frames == 0 {
            self.frame_time_avg_us = total_us as f32;
        } else {
            self.frame_time_avg_us =
                Self::EMA_ALPHA.mul_add(total_us as f32, (1.0 - Self::EMA_ALPHA) * self.frame_time_avg_us);
        }

        self.total_frames += 1;
    }

    #[inline]
    pub const fn frame_time_avg_us(&self) -> u32 {
        self.frame_time_avg_us as u32
    }

    /// Reset min/max/average, keeping the frame count and uptime.
    pub const fn reset_stats(&mut self) {
        self.frame_time_min_us = u32::MAX;
        self.frame_time_max_us = 0;
        self.frame_time_avg_us = self.frame_time_us as f32;
    }

    #[inline]
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Uptime as `HH:MM:SS`.
    pub fn uptime_string(&self) -> String<12> {
        format_hms(self.uptime().as_secs())
    }
}

impl Default for RenderMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn saturating_micros(duration: Duration) -> u32 {
    u32::try_from(duration.as_micros()).unwrap_or(u32::MAX)
}

fn format_hms(total_secs: u64) -> String<12> {
    let mut s = String::new();
    let _ = write!(
        s,
        "{:02}:{:02}:{:02}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60
    );
    s
}

// =============================================================================
// Engine Counters
// =============================================================================

/// Counters kept by the engine itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceCounters {
    /// Completed `draw` calls
    pub draws: u32,
    /// Redraw requests raised
    pub invalidations: u32,
    /// Timer fires consumed
    pub timer_fires: u32,
    /// Ambient mode transitions
    pub ambient_changes: u32,
    /// Timezone refreshes
    pub timezone_refreshes: u32,
    /// Tap events received
    pub taps: u32,
}

// =============================================================================
// Debug Log Ring Buffer
// =============================================================================

/// Ring buffer of short log lines. The oldest line is dropped when full.
#[derive(Clone, Debug)]
pub struct DebugLog {
    buffer: Deque<String<LOG_LINE_LENGTH>, LOG_BUFFER_SIZE>,
}

/// Writes into a line, silently dropping what does not fit.
struct Truncating<'a>(&'a mut String<LOG_LINE_LENGTH>);

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

impl DebugLog {
    pub const fn new() -> Self {
        Self { buffer: Deque::new() }
    }

    /// Push a message, truncated to the line length.
    pub fn push(&mut self, msg: &str) {
        self.push_fmt(format_args!("{msg}"));
    }

    /// Push a formatted message, truncated to the line length.
    pub fn push_fmt(&mut self, args: fmt::Arguments<'_>) {
        if self.buffer.is_full() {
            self.buffer.pop_front();
        }

        let mut line: String<LOG_LINE_LENGTH> = String::new();
        let _ = Truncating(&mut line).write_fmt(args);

        self.buffer.push_back(line).ok();
    }

    /// Iterate over log lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.buffer.iter().map(heapless::string::StringInner::as_str)
    }

    /// Most recent line.
    pub fn last(&self) -> Option<&str> {
        self.buffer.back().map(heapless::string::StringInner::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for DebugLog {
    fn default() -> Self {
        Self::new()
    }
}
