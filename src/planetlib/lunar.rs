//! Geocentric lunar position from a truncated perturbation theory
//!
//! Six fundamental arguments are evaluated as polynomials in time since
//! 1900 January 0.5 and corrected by a few long-period terms. Ecliptic
//! longitude, latitude and horizontal parallax are then sums of periodic terms
//! whose arguments are integer combinations of those fundamental arguments.
//! The coefficients are empirical and must be kept exactly as listed.

use nalgebra::Vector3;

use crate::constants::{AU_KM, EARTH_RADIUS_KM, J1900, JULIAN_CENTURY, TAU};
use crate::coordinates::{fractional_part, normalize_radians, Ecliptic};
use crate::time::JulianDate;

/// One periodic term of the lunar series
///
/// The argument is `d·D + m·M + mp·M' + f·F` and the amplitude (degrees) is
/// scaled by `E^e_power`, which accounts for the decreasing eccentricity of
/// the Earth's orbit.
#[derive(Debug, Clone, Copy)]
struct LunarTerm {
    amplitude: f64,
    e_power: u8,
    d: i8,
    m: i8,
    mp: i8,
    f: i8,
}

const fn term(amplitude: f64, e_power: u8, d: i8, m: i8, mp: i8, f: i8) -> LunarTerm {
    LunarTerm {
        amplitude,
        e_power,
        d,
        m,
        mp,
        f,
    }
}

/// Periodic terms of the ecliptic longitude (sine series, degrees)
const LONGITUDE_TERMS: [LunarTerm; 50] = [
    term(6.28875, 0, 0, 0, 1, 0),
    term(1.27402, 0, 2, 0, -1, 0),
    term(0.658309, 0, 2, 0, 0, 0),
    term(0.213616, 0, 0, 0, 2, 0),
    term(-0.185596, 1, 0, 1, 0, 0),
    term(-0.114336, 0, 0, 0, 0, 2),
    term(0.058793, 0, 2, 0, -2, 0),
    term(0.057212, 1, 2, -1, -1, 0),
    term(0.05332, 0, 2, 0, 1, 0),
    term(0.045874, 1, 2, -1, 0, 0),
    term(0.041024, 1, 0, -1, 1, 0),
    term(-0.034718, 0, 1, 0, 0, 0),
    term(-0.030465, 1, 0, 1, 1, 0),
    term(0.015326, 0, 2, 0, 0, -2),
    term(-0.012528, 0, 0, 0, 1, 2),
    term(-0.01098, 0, 0, 0, -1, 2),
    term(0.010674, 0, 4, 0, -1, 0),
    term(0.010034, 0, 0, 0, 3, 0),
    term(0.008548, 0, 4, 0, -2, 0),
    term(-0.00791, 1, 2, 1, -1, 0),
    term(-0.006783, 1, 2, 1, 0, 0),
    term(0.005162, 0, -1, 0, 1, 0),
    term(0.005, 1, 1, 1, 0, 0),
    term(0.003862, 0, 4, 0, 0, 0),
    term(0.004049, 1, 2, -1, 1, 0),
    term(0.003996, 0, 2, 0, 2, 0),
    term(0.003665, 0, 2, 0, -3, 0),
    term(0.002695, 1, 0, -1, 2, 0),
    term(0.002602, 0, -2, 0, 1, -2),
    term(0.002396, 1, 2, -1, -2, 0),
    term(-0.002349, 0, 1, 0, 1, 0),
    term(0.002249, 2, 2, -2, 0, 0),
    term(-0.002125, 1, 0, 1, 2, 0),
    term(-0.002079, 2, 0, 2, 0, 0),
    term(0.002059, 2, 2, -2, -1, 0),
    term(-0.001773, 0, 2, 0, 1, -2),
    term(-0.001595, 0, 2, 0, 0, 2),
    term(0.00122, 1, 4, -1, -1, 0),
    term(-0.00111, 0, 0, 0, 2, 2),
    term(0.000892, 0, -3, 0, 1, 0),
    term(-0.000811, 1, 2, 1, 1, 0),
    term(0.000761, 1, 4, -1, -2, 0),
    term(0.000704, 2, -2, -2, 1, 0),
    term(0.000693, 1, 2, 1, -2, 0),
    term(0.000598, 1, 2, -1, 0, -2),
    term(0.00055, 0, 4, 0, 1, 0),
    term(0.000538, 0, 0, 0, 4, 0),
    term(0.000521, 1, 4, -1, 0, 0),
    term(0.000486, 0, -1, 0, 2, 0),
    term(0.000717, 2, 0, -2, 1, 0),
];

/// Periodic terms of the ecliptic latitude (sine series, degrees)
const LATITUDE_TERMS: [LunarTerm; 45] = [
    term(5.12819, 0, 0, 0, 0, 1),
    term(0.280606, 0, 0, 0, 1, 1),
    term(0.277693, 0, 0, 0, 1, -1),
    term(0.173238, 0, 2, 0, 0, -1),
    term(0.055413, 0, 2, 0, -1, 1),
    term(0.046272, 0, 2, 0, -1, -1),
    term(0.032573, 0, 2, 0, 0, 1),
    term(0.017198, 0, 0, 0, 2, 1),
    term(0.009267, 0, 2, 0, 1, -1),
    term(0.008823, 0, 0, 0, 2, -1),
    term(0.008247, 1, 2, -1, 0, -1),
    term(0.004323, 0, 2, 0, -2, -1),
    term(0.0042, 0, 2, 0, 1, 1),
    term(0.003372, 1, -2, -1, 0, 1),
    term(0.002472, 1, 2, -1, -1, 1),
    term(0.002222, 1, 2, -1, 0, 1),
    term(0.002072, 1, 2, -1, -1, -1),
    term(0.001877, 1, 0, -1, 1, 1),
    term(0.001828, 0, 4, 0, -1, -1),
    term(-0.001803, 1, 0, 1, 0, 1),
    term(-0.00175, 0, 0, 0, 0, 3),
    term(0.00157, 1, 0, -1, 1, -1),
    term(-0.001487, 0, 1, 0, 0, 1),
    term(-0.001481, 1, 0, 1, 1, 1),
    term(0.001417, 1, 0, -1, -1, 1),
    term(0.00135, 1, 0, -1, 0, 1),
    term(0.00133, 0, -1, 0, 0, 1),
    term(0.001106, 0, 0, 0, 3, 1),
    term(0.00102, 0, 4, 0, 0, -1),
    term(0.000833, 0, 4, 0, -1, 1),
    term(0.000781, 0, 0, 0, 1, -3),
    term(0.00067, 0, 4, 0, -2, 1),
    term(0.000606, 0, 2, 0, 0, -3),
    term(0.000597, 0, 2, 0, 2, -1),
    term(0.000492, 1, 2, -1, 1, -1),
    term(0.00045, 0, -2, 0, 2, -1),
    term(0.000439, 0, 0, 0, 3, -1),
    term(0.000423, 0, 2, 0, 2, 1),
    term(0.000422, 0, 2, 0, -3, -1),
    term(-0.000367, 1, 2, 1, -1, 1),
    term(-0.000353, 1, 2, 1, 0, 1),
    term(0.000331, 0, 4, 0, 0, 1),
    term(0.000317, 1, 2, -1, 1, 1),
    term(0.000306, 2, 2, -2, 0, -1),
    term(-0.000283, 0, 0, 0, 1, 3),
];

/// Constant part of the horizontal parallax, in degrees
const PARALLAX_MEAN: f64 = 0.950724;

/// Periodic terms of the horizontal parallax (cosine series, degrees)
const PARALLAX_TERMS: [LunarTerm; 30] = [
    term(0.051818, 0, 0, 0, 1, 0),
    term(0.009531, 0, 2, 0, -1, 0),
    term(0.007843, 0, 2, 0, 0, 0),
    term(0.002824, 0, 0, 0, 2, 0),
    term(0.000857, 0, 2, 0, 1, 0),
    term(0.000533, 1, 2, -1, 0, 0),
    term(0.000401, 1, 2, -1, -1, 0),
    term(0.00032, 1, 0, -1, 1, 0),
    term(-0.000271, 0, 1, 0, 0, 0),
    term(-0.000264, 1, 0, 1, 1, 0),
    term(-0.000198, 0, 0, 0, -1, 2),
    term(0.000173, 0, 0, 0, 3, 0),
    term(0.000167, 0, 4, 0, -1, 0),
    term(-0.000111, 1, 0, 1, 0, 0),
    term(0.000103, 0, 4, 0, -2, 0),
    term(-0.000084, 0, -2, 0, 2, 0),
    term(-0.000083, 1, 2, 1, 0, 0),
    term(0.000079, 0, 2, 0, 2, 0),
    term(0.000072, 0, 4, 0, 0, 0),
    term(0.000064, 1, 2, -1, 1, 0),
    term(-0.000063, 1, 2, 1, -1, 0),
    term(0.000041, 1, 1, 1, 0, 0),
    term(0.000035, 1, 0, -1, 2, 0),
    term(-0.000033, 0, -2, 0, 3, 0),
    term(-0.00003, 0, 1, 0, 1, 0),
    term(-0.000029, 0, -2, 0, 0, 2),
    term(-0.000029, 1, 0, 1, 2, 0),
    term(0.000026, 2, 2, -2, 0, 0),
    term(-0.000023, 0, -2, 0, 1, 2),
    term(0.000019, 1, 4, -1, -1, 0),
];

/// Fundamental arguments of the lunar theory at one instant (radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarArguments {
    /// Moon's mean longitude
    pub mean_longitude: f64,
    /// Sun's mean anomaly (M)
    pub sun_anomaly: f64,
    /// Moon's mean anomaly (M')
    pub moon_anomaly: f64,
    /// Moon's mean elongation from the Sun (D)
    pub elongation: f64,
    /// Moon's argument of latitude (F)
    pub latitude_argument: f64,
    /// Longitude of the Moon's ascending node
    pub node: f64,
    /// Auxiliary argument C used by the latitude correction
    pub c: f64,
    /// Eccentricity factor of the Earth's orbit
    pub e: f64,
}

impl LunarArguments {
    /// Evaluate the fundamental arguments at a Julian date
    pub fn at_time(jd: JulianDate) -> Self {
        let jd19 = jd - J1900;
        let t = jd19 / JULIAN_CENTURY;
        let t2 = t * t;

        // Mean motions reduced to a fraction of a revolution, in degrees
        let revolutions = |period: f64| 360.0 * fractional_part(jd19 / period);
        let m1 = revolutions(27.32158213);
        let m2 = revolutions(365.2596407);
        let m3 = revolutions(27.55455094);
        let m4 = revolutions(29.53058868);
        let m5 = revolutions(27.21222039);
        let m6 = revolutions(6798.363307);

        let mut ld = 270.434164 + m1 - (0.001133 - 0.0000019 * t) * t2;
        let mut ms = 358.475833 + m2 - (0.00015 + 0.0000033 * t) * t2;
        let mut md = 296.104608 + m3 + (0.009192 + 0.0000144 * t) * t2;
        let mut de = 350.737486 + m4 - (0.001436 - 0.0000019 * t) * t2;
        let mut f = 11.250889 + m5 - (0.003211 + 0.0000003 * t) * t2;
        let n = 259.183275 - m6 + (0.002078 + 0.000022 * t) * t2;

        // Long-period corrections from the auxiliary arguments A, B and C
        let a = (51.2 + 20.2 * t).to_radians();
        let sa = a.sin();
        let sn = n.to_radians().sin();
        let b = 346.56 + (132.87 - 0.0091731 * t) * t;
        let sb = 0.003964 * b.to_radians().sin();
        let c = (n + 275.05 - 2.3 * t).to_radians();
        let sc = c.sin();

        ld = ld + 0.000233 * sa + sb + 0.001964 * sn;
        ms -= 0.001778 * sa;
        md = md + 0.000817 * sa + sb + 0.002541 * sn;
        f = f + sb - 0.024691 * sn - 0.004328 * sc;
        de = de + 0.002011 * sa + sb + 0.001964 * sn;
        let e = 1.0 - (0.002495 + 7.52e-06 * t) * t;

        Self {
            mean_longitude: ld.to_radians(),
            sun_anomaly: ms.to_radians(),
            moon_anomaly: md.to_radians(),
            elongation: de.to_radians(),
            latitude_argument: f.to_radians(),
            node: n.to_radians(),
            c,
            e,
        }
    }

    /// Sum a table of periodic terms, using `wave` (sin or cos) on each argument
    fn sum_terms(&self, terms: &[LunarTerm], wave: fn(f64) -> f64) -> f64 {
        let e2 = self.e * self.e;
        let mut total = 0.0;
        for t in terms {
            let argument = f64::from(t.d) * self.elongation
                + f64::from(t.m) * self.sun_anomaly
                + f64::from(t.mp) * self.moon_anomaly
                + f64::from(t.f) * self.latitude_argument;
            let scale = match t.e_power {
                0 => 1.0,
                1 => self.e,
                _ => e2,
            };
            total += scale * t.amplitude * wave(argument);
        }
        total
    }
}

/// Position model for the Moon relative to the Earth
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PerturbationSeries;

impl PerturbationSeries {
    pub fn new() -> Self {
        Self
    }

    /// Ecliptic longitude, latitude (radians) and distance (AU)
    pub fn ecliptic_at_time(&self, jd: JulianDate) -> Ecliptic {
        let args = LunarArguments::at_time(jd);

        let l = args.sum_terms(&LONGITUDE_TERMS, f64::sin);
        let longitude = normalize_radians(args.mean_longitude + l.to_radians());

        let g = args.sum_terms(&LATITUDE_TERMS, f64::sin);
        let w1 = 0.0004664 * args.node.cos();
        let w2 = 0.0000754 * args.c.cos();
        let latitude = g.to_radians() * (1.0 - w1 - w2);

        let hp = PARALLAX_MEAN + args.sum_terms(&PARALLAX_TERMS, f64::cos);
        let parallax = hp.to_radians();
        let distance = EARTH_RADIUS_KM / parallax.sin() / AU_KM;

        Ecliptic::new(longitude, latitude, distance)
    }

    /// Horizontal parallax in radians
    pub fn parallax_at_time(&self, jd: JulianDate) -> f64 {
        let args = LunarArguments::at_time(jd);
        (PARALLAX_MEAN + args.sum_terms(&PARALLAX_TERMS, f64::cos)).to_radians()
    }

    /// Position relative to the Earth, in AU
    pub fn position_at_time(&self, jd: JulianDate) -> Vector3<f64> {
        self.ecliptic_at_time(jd).to_cartesian()
    }
}
