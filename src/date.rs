//! Cached date/weekday text and localized labels.
//!
//! Building the date line is the only string work that does not change
//! every frame, so it is cached against the calendar day. The cache is
//! rebuilt only when the (year, month, day) triple differs from the one it
//! was built for; [`DateCache::rebuilds`] counts how often that happened.
//!
//! The canvas size at rebuild time is stored alongside the text. Layout
//! does not read it back: rows are positioned from the live canvas size on
//! every frame.

use core::fmt::Write;

use chrono::Weekday;
use heapless::String;

use crate::clock::WatchClock;

/// Capacity of the cached date line.
pub const DATE_TEXT_CAPACITY: usize = 48;

/// Capacity of the battery and notification lines.
pub const STATUS_TEXT_CAPACITY: usize = 48;

// =============================================================================
// Locale
// =============================================================================

/// Language of the weekday labels and status lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    /// `03/05  Tuesday`, `3 new notifications`.
    #[default]
    English,
    /// `03月05日  周二`, `3 条新通知`.
    Chinese,
}

impl Locale {
    /// Label for a weekday. Exhaustive over all seven days.
    pub const fn weekday_label(self, weekday: Weekday) -> &'static str {
        match self {
            Self::English => match weekday {
                Weekday::Sun => "Sunday",
                Weekday::Mon => "Monday",
                Weekday::Tue => "Tuesday",
                Weekday::Wed => "Wednesday",
                Weekday::Thu => "Thursday",
                Weekday::Fri => "Friday",
                Weekday::Sat => "Saturday",
            },
            Self::Chinese => match weekday {
                Weekday::Sun => "周日",
                Weekday::Mon => "周一",
                Weekday::Tue => "周二",
                Weekday::Wed => "周三",
                Weekday::Thu => "周四",
                Weekday::Fri => "周五",
                Weekday::Sat => "周六",
            },
        }
    }

    /// Write the date line: zero-padded month and day, two spaces, weekday.
    pub fn write_date<const N: usize>(self, out: &mut String<N>, month: u32, day: u32, weekday: Weekday) {
        out.clear();
        let label = self.weekday_label(weekday);
        let _ = match self {
            Self::English => write!(out, "{month:02}/{day:02}  {label}"),
            Self::Chinese => write!(out, "{month:02}月{day:02}日  {label}"),
        };
    }

    /// Write the unread notification line.
    pub fn write_notifications<const N: usize>(self, out: &mut String<N>, count: u32) {
        out.clear();
        let _ = match self {
            Self::English => write!(out, "{count} new notifications"),
            Self::Chinese => write!(out, "{count} 条新通知"),
        };
    }
}

/// Write the battery line, `"<n>%"`.
pub fn write_battery<const N: usize>(out: &mut String<N>, percent: u8) {
    out.clear();
    let _ = write!(out, "{percent}%");
}

// =============================================================================
// Date Cache
// =============================================================================

/// Date line cached per calendar day.
#[derive(Clone, Debug, Default)]
pub struct DateCache {
    /// Day the text was built for, `None` before the first frame.
    day_key: Option<(i32, u32, u32)>,
    weekday: Option<Weekday>,
    text: String<DATE_TEXT_CAPACITY>,
    /// Canvas size captured at the last rebuild.
    text_width: u32,
    text_height: u32,
    rebuilds: u32,
}

impl DateCache {
    pub const fn new() -> Self {
        Self {
            day_key: None,
            weekday: None,
            text: String::new(),
            text_width: 0,
            text_height: 0,
            rebuilds: 0,
        }
    }

    /// Rebuild the date text if the clock moved to another calendar day.
    ///
    /// Returns `true` when the text was rebuilt.
    pub fn refresh(&mut self, clock: &WatchClock, locale: Locale, canvas_width: u32, canvas_height: u32) -> bool {
        let key = (clock.year(), clock.month(), clock.day());
        if self.day_key == Some(key) {
            return false;
        }

        let weekday = clock.weekday();
        locale.write_date(&mut self.text, key.1, key.2, weekday);
        self.day_key = Some(key);
        self.weekday = Some(weekday);
        self.text_width = canvas_width;
        self.text_height = canvas_height;
        self.rebuilds = self.rebuilds.wrapping_add(1);
        true
    }

    #[inline]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    #[inline]
    pub const fn weekday(&self) -> Option<Weekday> {
        self.weekday
    }

    /// Canvas size recorded at the last rebuild.
    #[inline]
    pub const fn text_bounds(&self) -> (u32, u32) {
        (self.text_width, self.text_height)
    }

    /// Number of rebuilds since creation.
    #[inline]
    pub const fn rebuilds(&self) -> u32 {
        self.rebuilds
    }
}
