//! Julian day conversion for UTC instants.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike, Utc};
use swisseph::swe::{julday, revjul};

/// Julian day of J2000.0 (2000-01-01T12:00:00 TT, taken as UTC here)
pub const J2000_JD: f64 = 2_451_545.0;

// GREG_CAL = 1
const GREGORIAN: i32 = 1;

/// Convert a UTC instant to a Julian day.
pub fn julian_day(dt: DateTime<Utc>) -> f64 {
    let second = dt.second() as f64 + dt.nanosecond() as f64 / 1_000_000_000.0;
    let hour_decimal = dt.hour() as f64 + dt.minute() as f64 / 60.0 + second / 3600.0;
    julday(dt.year(), dt.month() as i32, dt.day() as i32, hour_decimal, GREGORIAN as u32)
}

/// Convert a Julian day back to a UTC instant, rounded to the second.
pub fn datetime_from_julian_day(jd: f64) -> Option<DateTime<Utc>> {
    if !jd.is_finite() {
        return None;
    }
    let (year, month, day, hour_decimal) = revjul(jd, GREGORIAN);
    let date = NaiveDate::from_ymd_opt(year, month as u32, day as u32)?;
    let seconds = (hour_decimal * 3600.0).round() as i64;
    let naive = date.and_hms_opt(0, 0, 0)?.checked_add_signed(Duration::seconds(seconds))?;
    Some(Utc.from_utc_datetime(&naive))
}
