//! Wall-clock reading and the time-scale correction handed to the SPA engine.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike};
use solar_positioning::time::DeltaT;

/// TAI - UTC in seconds, unchanged since the leap second of 2016-12-31.
pub const TAI_MINUS_UTC: f64 = 37.0;
/// TT - TAI in seconds.
pub const TT_MINUS_TAI: f64 = 32.184;
/// Compiled-in delta T. Drifts from the true value as UT1 wanders; refresh
/// `TAI_MINUS_UTC` whenever a leap second is announced.
pub const DELTA_T: f64 = TT_MINUS_TAI + TAI_MINUS_UTC;

/// Calendar fields in the engine's convention (month 1-12).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CalendarFields {
    pub fn from_wall_clock(wall_clock: &NaiveDateTime) -> Self {
        Self {
            year: wall_clock.year(),
            // chrono counts months from zero like `struct tm`; SPA does not.
            month: wall_clock.month0() + 1,
            day: wall_clock.day(),
            hour: wall_clock.hour(),
            minute: wall_clock.minute(),
            second: wall_clock.second(),
        }
    }

    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)?.and_hms_opt(
            self.hour,
            self.minute,
            self.second,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeltaTSetting {
    /// `TT_MINUS_TAI + TAI_MINUS_UTC`.
    Compiled,
    /// Explicit value in seconds.
    Fixed(f64),
    /// Espenak & Meeus polynomial for the observed month; the compiled value
    /// if estimation fails.
    Estimated,
}

impl DeltaTSetting {
    pub fn resolve(&self, calendar: &CalendarFields) -> f64 {
        match self {
            DeltaTSetting::Compiled => DELTA_T,
            DeltaTSetting::Fixed(seconds) => *seconds,
            DeltaTSetting::Estimated => {
                DeltaT::estimate_from_date(calendar.year, calendar.month).unwrap_or(DELTA_T)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Clock {
    System,
    Fixed(NaiveDateTime),
}

impl Clock {
    /// Current local wall-clock time, read once.
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::System => Local::now().naive_local(),
            Clock::Fixed(wall_clock) => *wall_clock,
        }
    }
}

/// Parses a `-w` value such as `2024-06-21T12:00:00` or `2024-06-21 12:00`.
pub fn parse_wall_clock(value: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}
