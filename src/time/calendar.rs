//! Calendar date and Julian date conversion functions
//!
//! All conversions use the proleptic Gregorian calendar.

use crate::constants::DAY_S;

/// Julian day number of 0000-12-31, day zero of chrono's days-from-CE count
pub const JDN_OF_CE_DAY_ZERO: i64 = 1_721_425;

/// Convert Julian day integer to calendar date (year, month, day)
pub fn compute_calendar_date(jd_integer: i32) -> (i32, u32, u32) {
    // See the Explanatory Supplement to the Astronomical Almanac 15.11.
    // Widened so that `4 * jd` cannot overflow for any i32 input.
    let jd = i64::from(jd_integer);
    let f = jd + 1401 + ((4 * jd + 274277) / 146097 * 3 / 4 - 38);

    let e = 4 * f + 3;
    let g = (e % 1461) / 4;
    let h = 5 * g + 2;
    let day = (h % 153) / 5 + 1;
    let month = (h / 153 + 2) % 12 + 1;
    let year = e / 1461 - 4716 + (12 + 2 - month) / 12;

    (year as i32, month as u32, day as u32)
}

/// Convert (year, month, day) to Julian day integer
pub fn compute_julian_day(year: i32, month: u32, day: u32) -> i32 {
    let month = month as i32;
    let janfeb = month < 3;

    1461 * (year + 4800 - if janfeb { 1 } else { 0 }) / 4
        + 367 * (month - 2 + if janfeb { 12 } else { 0 }) / 12
        - 3 * ((year + 4900 - if janfeb { 1 } else { 0 }) / 100) / 4
        - 32075
        + day as i32
}

/// Convert a calendar date and a time of day in seconds to a Julian date
///
/// Julian days begin at noon, so midnight of a civil date lies half a day
/// before its Julian day number.
pub fn compute_julian_date(year: i32, month: u32, day: u32, seconds_of_day: f64) -> f64 {
    compute_julian_day(year, month, day) as f64 - 0.5 + seconds_of_day / DAY_S
}

/// Split a Julian date into the Julian day number of its civil date and the
/// seconds elapsed since that date's midnight
///
/// Day numbers beyond the range of `i64` saturate.
pub fn split_julian_date(jd: f64) -> (i64, f64) {
    let shifted = jd + 0.5;
    let whole = shifted.floor();
    (whole as i64, (shifted - whole) * DAY_S)
}
