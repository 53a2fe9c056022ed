//! Ecliptic coordinates and angle helpers
//!
//! Positions are produced as ecliptic spherical coordinates (longitude,
//! latitude, distance) and handed to callers as Cartesian vectors in the
//! ecliptic frame:
//! - **X**: toward the vernal equinox (longitude 0°, latitude 0°)
//! - **Y**: toward longitude 90°, latitude 0°
//! - **Z**: toward the north ecliptic pole

use crate::constants::TAU;
use nalgebra::Vector3;
use std::f64::consts::PI;

/// Spherical position referenced to the ecliptic
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ecliptic {
    /// Ecliptic longitude in radians
    pub longitude: f64,
    /// Ecliptic latitude in radians
    pub latitude: f64,
    /// Distance from the origin, in AU
    pub distance: f64,
}

impl Ecliptic {
    pub fn new(longitude: f64, latitude: f64, distance: f64) -> Self {
        Self {
            longitude,
            latitude,
            distance,
        }
    }

    /// Converts to Cartesian coordinates
    ///
    /// - `x = distance * cos(lat) * cos(lon)`
    /// - `y = distance * cos(lat) * sin(lon)`
    /// - `z = distance * sin(lat)`
    pub fn to_cartesian(&self) -> Vector3<f64> {
        let cos_lat = self.latitude.cos();
        Vector3::new(
            self.distance * cos_lat * self.longitude.cos(),
            self.distance * cos_lat * self.longitude.sin(),
            self.distance * self.latitude.sin(),
        )
    }

    /// Converts a Cartesian vector back to ecliptic coordinates
    ///
    /// Longitude is normalized to [0, 2π), latitude to [-π/2, π/2]. The zero
    /// vector maps to all-zero coordinates.
    pub fn from_cartesian(v: &Vector3<f64>) -> Self {
        let distance = v.norm();

        if distance == 0.0 {
            return Self::new(0.0, 0.0, 0.0);
        }

        let latitude = (v.z / distance).asin();
        let longitude = if v.x == 0.0 && v.y == 0.0 {
            0.0 // Arbitrary choice at poles
        } else {
            normalize_radians(v.y.atan2(v.x))
        };

        Self::new(longitude, latitude, distance)
    }
}

/// Fractional part of `x` as a true (Euclidean) modulo, always in [0, 1)
pub fn fractional_part(x: f64) -> f64 {
    let frac = x.rem_euclid(1.0);
    // rem_euclid rounds tiny negative inputs up to exactly 1.0
    if frac >= 1.0 {
        0.0
    } else {
        frac
    }
}

/// Normalize an angle in radians to [0, 2π)
pub fn normalize_radians(angle: f64) -> f64 {
    TAU * fractional_part(angle / TAU)
}

/// Smallest absolute distance between two angles (radians), in [0, π]
pub fn angle_distance(a: f64, b: f64) -> f64 {
    let mut d = (a - b).rem_euclid(TAU);
    if d > PI {
        d = TAU - d;
    }
    d.abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_spherical_round_trip() {
        let ecl = Ecliptic::new(1.2, -0.3, 0.98);
        let back = Ecliptic::from_cartesian(&ecl.to_cartesian());

        assert_relative_eq!(back.longitude, 1.2, epsilon = 1e-12);
        assert_relative_eq!(back.latitude, -0.3, epsilon = 1e-12);
        assert_relative_eq!(back.distance, 0.98, epsilon = 1e-12);
    }

    #[test]
    fn test_axes() {
        let x = Ecliptic::new(0.0, 0.0, 2.0).to_cartesian();
        assert_relative_eq!(x, Vector3::new(2.0, 0.0, 0.0), epsilon = 1e-15);

        let pole = Ecliptic::new(0.0, PI / 2.0, 1.0).to_cartesian();
        assert_relative_eq!(pole, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-15);

        let origin = Ecliptic::from_cartesian(&Vector3::zeros());
        assert_eq!(origin, Ecliptic::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_fractional_part() {
        assert_relative_eq!(fractional_part(2.25), 0.25);
        assert_relative_eq!(fractional_part(-0.25), 0.75);
        assert_eq!(fractional_part(3.0), 0.0);
        assert_eq!(fractional_part(-1e-20), 0.0);
    }

    #[test]
    fn test_normalize_radians() {
        assert_relative_eq!(normalize_radians(-PI / 2.0), 1.5 * PI, epsilon = 1e-12);
        assert_relative_eq!(normalize_radians(5.0 * PI), PI, epsilon = 1e-12);
        assert!(normalize_radians(-1e-300) < TAU);
    }

    #[test]
    fn test_angle_distance_wraps() {
        assert_relative_eq!(angle_distance(0.1, TAU - 0.1), 0.2, epsilon = 1e-12);
        assert_relative_eq!(angle_distance(PI, 0.0), PI, epsilon = 1e-12);
        assert_eq!(angle_distance(1.0, 1.0), 0.0);
    }
}
