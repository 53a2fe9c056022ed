//! Time module for converting calendar timestamps to Julian dates
//!
//! Every position and rotation in this crate is a pure function of a
//! [`JulianDate`]. This module turns the timestamps a user interface hands us
//! (date pickers, command line arguments, wall clocks) into that scalar, and
//! back again for display.

pub mod calendar;
pub mod clock;

use crate::{Result, StellaraError};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Utc};

use self::calendar::{compute_julian_date, split_julian_date, JDN_OF_CE_DAY_ZERO};

/// Continuous astronomical time, in days since the Julian epoch
pub type JulianDate = f64;

/// Timestamp layouts accepted by [`calendar_to_julian_date`], tried in order
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Convert a calendar timestamp to a Julian date
///
/// Accepts `YYYY-MM-DD HH:MM:SS` (a `T` separator is also fine), the same
/// without seconds, and RFC 3339 timestamps carrying a UTC offset. Timestamps
/// without an offset are taken to be UTC.
///
/// # Errors
///
/// Returns [`StellaraError::InvalidDate`] if the text does not describe a
/// valid calendar date and time.
pub fn calendar_to_julian_date(timestamp: &str) -> Result<JulianDate> {
    let text = timestamp.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(julian_date_from_datetime(&dt.with_timezone(&Utc)));
    }

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| julian_date_from_naive(&naive))
        .ok_or_else(|| StellaraError::InvalidDate(timestamp.to_string()))
}

/// Julian date of a UTC datetime
pub fn julian_date_from_datetime(dt: &DateTime<Utc>) -> JulianDate {
    julian_date_from_naive(&dt.naive_utc())
}

/// Julian date of a naive datetime interpreted as UTC
pub fn julian_date_from_naive(dt: &NaiveDateTime) -> JulianDate {
    let seconds = dt.num_seconds_from_midnight() as f64 + dt.nanosecond() as f64 / 1_000_000_000.0;
    compute_julian_date(dt.year(), dt.month(), dt.day(), seconds)
}

/// Reject NaN and infinite Julian dates
///
/// # Errors
///
/// Returns [`StellaraError::InvalidDate`] for a non-finite date.
pub fn checked_julian_date(jd: JulianDate) -> Result<JulianDate> {
    if jd.is_finite() {
        Ok(jd)
    } else {
        Err(StellaraError::InvalidDate(format!("JD {}", jd)))
    }
}

/// Convert a Julian date back to a UTC datetime, rounded to the millisecond
///
/// # Errors
///
/// Returns [`StellaraError::InvalidDate`] when the date is not finite or falls
/// outside the range chrono can represent.
pub fn julian_date_to_datetime(jd: JulianDate) -> Result<DateTime<Utc>> {
    let out_of_range = || StellaraError::InvalidDate(format!("JD {}", jd));

    let (jdn, seconds) = split_julian_date(checked_julian_date(jd)?);
    let days = jdn
        .checked_sub(JDN_OF_CE_DAY_ZERO)
        .and_then(|days| i32::try_from(days).ok())
        .ok_or_else(out_of_range)?;

    let millis = (seconds * 1000.0).round() as i64;
    NaiveDate::from_num_days_from_ce_opt(days)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|midnight| midnight.checked_add_signed(Duration::milliseconds(millis)))
        .map(|dt| dt.and_utc())
        .ok_or_else(out_of_range)
}

/// Format a Julian date as `YYYY-MM-DD HH:MM:SS` UTC
pub fn format_date(jd: JulianDate) -> Result<String> {
    Ok(julian_date_to_datetime(jd)?
        .format("%Y-%m-%d %H:%M:%S")
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::J2000;
    use approx::assert_relative_eq;
    use chrono::TimeZone;
    use rstest::rstest;

    #[test]
    fn test_j2000_epoch() {
        let jd = calendar_to_julian_date("2000-01-01 12:00:00").unwrap();
        assert_eq!(jd, J2000);
    }

    #[rstest]
    #[case("2024-10-02 02:30:00", 2460585.604166667)]
    #[case("2024-10-02T02:30:00", 2460585.604166667)]
    #[case("2024-10-02 02:30", 2460585.604166667)]
    #[case("2024-10-02T02:30", 2460585.604166667)]
    #[case("2024-10-02T04:30:00+02:00", 2460585.604166667)]
    #[case("2024-10-02T02:30:00Z", 2460585.604166667)]
    #[case("  1992-04-12 00:00:00 ", 2448724.5)]
    fn test_accepted_formats(#[case] text: &str, #[case] expected: f64) {
        let jd = calendar_to_julian_date(text).unwrap();
        assert_relative_eq!(jd, expected, epsilon = 1e-8);
    }

    #[rstest]
    #[case("")]
    #[case("not a date")]
    #[case("2024-02-30 00:00:00")]
    #[case("2023-13-01 00:00:00")]
    #[case("2024-10-02 25:00:00")]
    #[case("2024-10-02")]
    fn test_invalid_dates(#[case] text: &str) {
        match calendar_to_julian_date(text) {
            Err(StellaraError::InvalidDate(reported)) => assert_eq!(reported, text),
            other => panic!("expected InvalidDate for {:?}, got {:?}", text, other),
        }
    }

    #[test]
    fn test_from_datetime() {
        let dt = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(julian_date_from_datetime(&dt), J2000);

        let dt = Utc.with_ymd_and_hms(1969, 7, 20, 20, 17, 40).unwrap();
        assert_relative_eq!(julian_date_from_datetime(&dt), 2440423.345601852, epsilon = 1e-8);
    }

    #[test]
    fn test_round_trip_to_datetime() {
        let jd = calendar_to_julian_date("2024-10-03 02:30:00").unwrap();
        let dt = julian_date_to_datetime(jd).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 10, 3, 2, 30, 0).unwrap());
        assert_eq!(format_date(jd).unwrap(), "2024-10-03 02:30:00");
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn test_non_finite_julian_date(#[case] jd: f64) {
        assert!(matches!(checked_julian_date(jd), Err(StellaraError::InvalidDate(_))));
        assert!(matches!(julian_date_to_datetime(jd), Err(StellaraError::InvalidDate(_))));
        assert!(format_date(jd).is_err());
    }

    #[rstest]
    #[case(1.0e9)]
    #[case(-1.0e9)]
    #[case(1.0e300)]
    #[case(-1.0e300)]
    fn test_julian_date_beyond_calendar_range(#[case] jd: f64) {
        assert!(matches!(julian_date_to_datetime(jd), Err(StellaraError::InvalidDate(_))));
        assert_eq!(checked_julian_date(jd).unwrap(), jd);
    }

    #[test]
    fn test_julian_date_zero_is_before_common_era() {
        // JD 0 is noon on 24 November 4714 BC, astronomical year -4713
        let dt = julian_date_to_datetime(0.0).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(-4713, 11, 24, 12, 0, 0).unwrap());
    }
}
