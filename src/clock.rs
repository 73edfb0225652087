//! Wall-clock time and timezone tracking.
//!
//! The engine never reads the system clock directly. It asks a
//! [`TimeSource`] for the current UTC time in milliseconds and for the
//! system default UTC offset, then keeps its own [`WatchClock`] that splits
//! that instant into calendar fields in the current offset.
//!
//! The offset is refreshed only on explicit events (becoming visible, a
//! timezone change notification), matching how a calendar object keeps its
//! timezone until told otherwise.

use chrono::{DateTime, Datelike, FixedOffset, Local, Offset, Timelike, Utc, Weekday};

/// Source of wall-clock time and the system default timezone.
pub trait TimeSource {
    /// Current time as milliseconds since the Unix epoch (UTC).
    fn now_millis(&self) -> i64;

    /// The system default UTC offset right now.
    fn default_offset(&self) -> FixedOffset;
}

/// Time source backed by the operating system clock and local timezone.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn default_offset(&self) -> FixedOffset {
        Local::now().offset().fix()
    }
}

/// Calendar view of the last captured instant.
#[derive(Clone, Copy, Debug)]
pub struct WatchClock {
    offset: FixedOffset,
    now: DateTime<FixedOffset>,
}

impl WatchClock {
    /// Create a clock at the Unix epoch in the given offset.
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            offset,
            now: DateTime::<Utc>::UNIX_EPOCH.with_timezone(&offset),
        }
    }

    /// Capture a new instant. Out-of-range timestamps keep the previous one.
    pub fn set_time_millis(&mut self, millis: i64) {
        if let Some(utc) = DateTime::from_timestamp_millis(millis) {
            self.now = utc.with_timezone(&self.offset);
        }
    }

    /// Switch timezone, re-expressing the captured instant in the new offset.
    pub fn set_offset(&mut self, offset: FixedOffset) {
        self.offset = offset;
        self.now = self.now.with_timezone(&offset);
    }

    #[inline]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Hour on the 12-hour dial, 0-11.
    #[inline]
    pub fn hour12(&self) -> u32 {
        self.now.hour() % 12
    }

    #[inline]
    pub fn minute(&self) -> u32 {
        self.now.minute()
    }

    #[inline]
    pub fn second(&self) -> u32 {
        self.now.second()
    }

    /// Millisecond within the second, 0-999 (leap seconds are clamped).
    #[inline]
    pub fn millisecond(&self) -> u32 {
        (self.now.nanosecond() / 1_000_000).min(999)
    }

    #[inline]
    pub fn year(&self) -> i32 {
        self.now.year()
    }

    /// Month, 1-12.
    #[inline]
    pub fn month(&self) -> u32 {
        self.now.month()
    }

    /// Day of month, 1-31.
    #[inline]
    pub fn day(&self) -> u32 {
        self.now.day()
    }

    #[inline]
    pub fn weekday(&self) -> Weekday {
        self.now.weekday()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        Utc.fix()
    }

    /// 2024-03-03 03:15:30.500 UTC (a Sunday).
    const SUNDAY_MORNING_MS: i64 = 1_709_435_730_500;

    #[test]
    fn test_clock_fields() {
        let mut clock = WatchClock::new(utc());
        clock.set_time_millis(SUNDAY_MORNING_MS);

        assert_eq!(clock.year(), 2024);
        assert_eq!(clock.month(), 3);
        assert_eq!(clock.day(), 3);
        assert_eq!(clock.weekday(), Weekday::Sun);
        assert_eq!(clock.hour12(), 3);
        assert_eq!(clock.minute(), 15);
        assert_eq!(clock.second(), 30);
        assert_eq!(clock.millisecond(), 500);
    }

    #[test]
    fn test_hour12_wraps_afternoon() {
        let mut clock = WatchClock::new(utc());
        // 12 hours later: 15:15:30.500
        clock.set_time_millis(SUNDAY_MORNING_MS + 12 * 3_600_000);
        assert_eq!(clock.hour12(), 3);
    }

    #[test]
    fn test_set_offset_moves_calendar_fields() {
        let mut clock = WatchClock::new(utc());
        clock.set_time_millis(SUNDAY_MORNING_MS);

        let minus_five = FixedOffset::west_opt(5 * 3_600).unwrap();
        clock.set_offset(minus_five);

        // 03:15 UTC is 22:15 the previous evening at UTC-5
        assert_eq!(clock.day(), 2);
        assert_eq!(clock.weekday(), Weekday::Sat);
        assert_eq!(clock.hour12(), 10);
        assert_eq!(clock.offset(), minus_five);
    }

    #[test]
    fn test_offset_applies_to_next_capture() {
        let mut clock = WatchClock::new(FixedOffset::east_opt(2 * 3_600).unwrap());
        clock.set_time_millis(SUNDAY_MORNING_MS);
        assert_eq!(clock.hour12(), 5);
    }

    #[test]
    fn test_out_of_range_timestamp_keeps_previous() {
        let mut clock = WatchClock::new(utc());
        clock.set_time_millis(SUNDAY_MORNING_MS);
        clock.set_time_millis(i64::MAX);
        assert_eq!(clock.year(), 2024);
    }

    #[test]
    fn test_system_time_source_is_after_2020() {
        let source = SystemTimeSource;
        assert!(source.now_millis() > 1_577_836_800_000);
    }
}
