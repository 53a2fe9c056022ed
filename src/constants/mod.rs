//! Constants module for astronomical calculations

use std::f64::consts::PI;

// Astronomical distances
/// Astronomical Unit in kilometers
pub const AU_KM: f64 = 149_597_870.700;
/// Earth's equatorial radius in kilometers, as used by the lunar parallax series
pub const EARTH_RADIUS_KM: f64 = 6378.14;

// Time constants
/// Seconds in a day
pub const DAY_S: f64 = 86_400.0;
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// 1900 January 0.5, the epoch of the lunar perturbation series
pub const J1900: f64 = 2_415_020.0;
/// Days in a Julian century
pub const JULIAN_CENTURY: f64 = 36_525.0;
/// Days in a Julian millennium, the time unit of VSOP87
pub const JULIAN_MILLENNIUM: f64 = 365_250.0;

// Angles
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;

// Earth rotation
/// Earth Rotation Angle at J2000.0, in revolutions
pub const ERA_J2000: f64 = 0.779_057_273_264_0;
/// Sidereal revolutions of the Earth per UT1 day
pub const ERA_RATE: f64 = 1.002_737_811_911_354_48;
/// Mean obliquity of the ecliptic at J2000.0, in degrees
pub const OBLIQUITY_J2000_DEG: f64 = 23.439_281;

// Spin periods
/// Sidereal rotation period of the Sun (Carrington), in days
pub const SUN_ROTATION_DAYS: f64 = 25.38;
/// Mean rotation rate of the Moon, in degrees per day
pub const MOON_ROTATION_DEG_PER_DAY: f64 = 13.18;

// Trail periods
/// Period spanned by Earth's orbit trail, in days
pub const EARTH_TRAIL_PERIOD_DAYS: f64 = 365.6;
/// Period spanned by the Moon's orbit trail, in days
pub const MOON_TRAIL_PERIOD_DAYS: f64 = 27.32;
