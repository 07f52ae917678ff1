//! Local UTC offset detection without a timezone database lookup.
//!
//! The host offset is probed at a fixed instant, 11 hours after the Unix
//! epoch, by comparing the hour of day in the local zone with the hour of day
//! in UTC. The probe sits far enough from midnight that neither side crosses a
//! date boundary for common zones. Known limitations:
//!
//! - only whole hours survive; zones such as +05:30 or +05:45 lose the fraction
//! - the offset is the one in force on 1970-01-01, so current daylight saving
//!   time is not reflected
//! - offsets above +12 wrap around (+13 reads as -11)
//!
//! `-z` replaces the probe with an explicit offset or IANA zone name.

use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;

const PROBE_HOURS: i64 = 11;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimezoneSetting {
    /// Probe the host zone.
    Detect,
    /// Explicit offset in hours east of UTC.
    Hours(f64),
    /// Named zone, resolved at the observed wall-clock time.
    Named(Tz),
}

impl TimezoneSetting {
    pub fn resolve(&self, wall_clock: NaiveDateTime) -> f64 {
        match self {
            TimezoneSetting::Detect => f64::from(local_utc_offset_hours()),
            TimezoneSetting::Hours(hours) => *hours,
            TimezoneSetting::Named(tz) => named_offset_hours(tz, wall_clock),
        }
    }
}

/// Whole-hour UTC offset of `tz`, taken at the probe instant.
pub fn utc_offset_hours<Z: TimeZone>(tz: &Z) -> i32 {
    let probe = DateTime::<Utc>::UNIX_EPOCH + TimeDelta::hours(PROBE_HOURS);
    let local_hour = probe.with_timezone(tz).hour() as i32;
    let utc_hour = probe.hour() as i32;
    local_hour - utc_hour
}

/// Whole-hour UTC offset of the host's configured zone (honours `TZ`).
pub fn local_utc_offset_hours() -> i32 {
    utc_offset_hours(&chrono::Local)
}

// Ambiguous local times take the earlier offset; times inside a DST gap are
// read as UTC to pick an offset.
fn named_offset_hours(tz: &Tz, wall_clock: NaiveDateTime) -> f64 {
    let offset = match tz.offset_from_local_datetime(&wall_clock) {
        LocalResult::Single(offset) | LocalResult::Ambiguous(offset, _) => offset,
        LocalResult::None => tz.offset_from_utc_datetime(&wall_clock),
    };
    f64::from(offset.fix().local_minus_utc()) / 3600.0
}

/// Widest numeric offset accepted by `-z`, in hours.
const MAX_OFFSET_HOURS: f64 = 18.0;

/// Parses a `-z` value: decimal hours (`-7`, `5.5`), an offset (`+05:30`),
/// or a zone name (`UTC`, `Europe/Berlin`).
pub fn parse_timezone(value: &str) -> Option<TimezoneSetting> {
    if let Ok(hours) = value.parse::<f64>() {
        return (hours.abs() <= MAX_OFFSET_HOURS).then_some(TimezoneSetting::Hours(hours));
    }

    if let Some(offset) = parse_offset(value) {
        return Some(TimezoneSetting::Hours(
            f64::from(offset.local_minus_utc()) / 3600.0,
        ));
    }

    match value {
        "UTC" | "GMT" => Some(TimezoneSetting::Named(chrono_tz::UTC)),
        _ => value.parse::<Tz>().ok().map(TimezoneSetting::Named),
    }
}

fn parse_offset(value: &str) -> Option<FixedOffset> {
    if value.len() != 6 || !value.contains(':') {
        return None;
    }

    let probe = format!("2000-01-01T12:00:00{}", value);
    DateTime::parse_from_str(&probe, "%Y-%m-%dT%H:%M:%S%:z")
        .ok()
        .map(|dt| *dt.offset())
}
