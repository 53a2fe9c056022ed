//! VSOP87-style periodic series evaluation
//!
//! A planet's heliocentric ecliptic longitude L, latitude B and radius R are
//! each expressed as a polynomial in time whose coefficients are sums of
//! periodic terms:
//!
//! ```text
//! X(T) = Σ_k T^k · Σ_i A_ki · cos(φ_ki + ω_ki · T)
//! ```
//!
//! where `T` is measured in Julian millennia from J2000.0. The evaluation
//! order below (block sums multiplied by a running power of `T`) is the
//! reference order; reordering it changes the low bits of the result.

use std::fs;
use std::path::Path;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{J2000, JULIAN_MILLENNIUM};
use crate::time::JulianDate;
use crate::{Result, StellaraError};

/// One periodic term: `(amplitude, phase, frequency)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesTerm(pub f64, pub f64, pub f64);

/// Coefficient table for a body's L, B and R series
///
/// Each axis is a list of blocks; block `k` is multiplied by `T^k`. The JSON
/// layout is `{"L": [[[a, p, f], ...], ...], "B": [...], "R": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitSeries {
    #[serde(rename = "L")]
    pub l: Vec<Vec<SeriesTerm>>,
    #[serde(rename = "B")]
    pub b: Vec<Vec<SeriesTerm>>,
    #[serde(rename = "R")]
    pub r: Vec<Vec<SeriesTerm>>,
}

impl OrbitSeries {
    /// Create a series table, checking that every axis has at least one block
    pub fn new(
        l: Vec<Vec<SeriesTerm>>,
        b: Vec<Vec<SeriesTerm>>,
        r: Vec<Vec<SeriesTerm>>,
    ) -> Result<Self> {
        let series = Self { l, b, r };
        series.validate()?;
        Ok(series)
    }

    /// Parse a series table from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let series: Self = serde_json::from_str(json)?;
        series.validate()?;
        Ok(series)
    }

    /// Load a series table from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    fn validate(&self) -> Result<()> {
        for (axis, blocks) in [("L", &self.l), ("B", &self.b), ("R", &self.r)] {
            if blocks.is_empty() {
                return Err(StellaraError::InvalidSeries(format!(
                    "{} axis has no blocks",
                    axis
                )));
            }
            let bad_term = blocks
                .iter()
                .flatten()
                .any(|term| !(term.0.is_finite() && term.1.is_finite() && term.2.is_finite()));
            if bad_term {
                return Err(StellaraError::InvalidSeries(format!(
                    "{} axis has a non-finite term",
                    axis
                )));
            }
        }
        Ok(())
    }

    /// Total number of periodic terms across all axes
    pub fn term_count(&self) -> usize {
        [&self.l, &self.b, &self.r]
            .iter()
            .flat_map(|blocks| blocks.iter())
            .map(|block| block.len())
            .sum()
    }
}

/// Sum one block of periodic terms at time `t`
fn sum_series(block: &[SeriesTerm], t: f64) -> f64 {
    let mut x = 0.0;
    for term in block {
        x += term.0 * (term.1 + term.2 * t).cos();
    }
    x
}

/// Evaluate one axis: each block sum times the running power of `t`
fn sum_axis(blocks: &[Vec<SeriesTerm>], t: f64) -> f64 {
    let mut total = 0.0;
    let mut power = 1.0;
    for block in blocks {
        total += sum_series(block, t) * power;
        power = t * power;
    }
    total
}

/// Position model evaluating an [`OrbitSeries`]
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesModel {
    series: OrbitSeries,
}

impl SeriesModel {
    pub fn new(series: OrbitSeries) -> Self {
        Self { series }
    }

    /// The Earth's heliocentric series
    pub fn earth() -> Self {
        Self::new(super::vsop87_earth::EARTH.clone())
    }

    pub fn series(&self) -> &OrbitSeries {
        &self.series
    }

    /// Heliocentric (L, B, R) at a Julian date; angles in radians, R in AU
    ///
    /// L is not reduced to [0, 2π).
    pub fn lbr_at_time(&self, jd: JulianDate) -> (f64, f64, f64) {
        let t = (jd - J2000) / JULIAN_MILLENNIUM;
        (
            sum_axis(&self.series.l, t),
            sum_axis(&self.series.b, t),
            sum_axis(&self.series.r, t),
        )
    }

    /// Position relative to the parent body, in AU
    pub fn position_at_time(&self, jd: JulianDate) -> Vector3<f64> {
        let (l, b, r) = self.lbr_at_time(jd);
        Vector3::new(l.cos() * b.cos() * r, l.sin() * b.cos() * r, b.sin() * r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RAD2DEG;
    use crate::coordinates::{angle_distance, normalize_radians};
    use approx::assert_relative_eq;

    fn single_term_series() -> OrbitSeries {
        OrbitSeries::new(
            vec![vec![SeriesTerm(1.0, 0.0, 0.0)], vec![SeriesTerm(2.0, 0.0, 0.0)]],
            vec![vec![SeriesTerm(0.0, 0.0, 0.0)]],
            vec![vec![SeriesTerm(1.0, 0.0, 0.0)]],
        )
        .unwrap()
    }

    #[test]
    fn test_block_powers_of_t() {
        // L = 1 + 2T, so one millennium after J2000 gives L = 3
        let model = SeriesModel::new(single_term_series());
        let (l, b, r) = model.lbr_at_time(J2000 + JULIAN_MILLENNIUM);
        assert_relative_eq!(l, 3.0, epsilon = 1e-15);
        assert_eq!(b, 0.0);
        assert_eq!(r, 1.0);
    }

    #[test]
    fn test_periodic_term() {
        let series = OrbitSeries::new(
            vec![vec![SeriesTerm(0.5, 0.25, 2.0)]],
            vec![vec![]],
            vec![vec![SeriesTerm(1.0, 0.0, 0.0)]],
        )
        .unwrap();
        let model = SeriesModel::new(series);
        let t = 0.1;
        let (l, _, _) = model.lbr_at_time(J2000 + t * JULIAN_MILLENNIUM);
        assert_relative_eq!(l, 0.5 * (0.25_f64 + 2.0 * t).cos(), epsilon = 1e-12);
    }

    #[test]
    fn test_earth_meeus_example() {
        // Meeus, Astronomical Algorithms, example 25.b (1992 October 13.0 TD)
        let model = SeriesModel::earth();
        let (l, b, r) = model.lbr_at_time(2448908.5);

        assert_relative_eq!(normalize_radians(l) * RAD2DEG, 19.907372, epsilon = 1e-3);
        assert_relative_eq!(b * RAD2DEG, -0.000179, epsilon = 1e-4);
        assert_relative_eq!(r, 0.99760775, epsilon = 1e-6);
    }

    #[test]
    fn test_earth_cartesian_matches_lbr() {
        let model = SeriesModel::earth();
        let jd = 2460585.6;
        let (l, b, r) = model.lbr_at_time(jd);
        let p = model.position_at_time(jd);

        assert_relative_eq!(p.norm(), r, epsilon = 1e-12);
        assert!(angle_distance(p.y.atan2(p.x), l) < 1e-9);
        assert_relative_eq!((p.z / r).asin(), b, epsilon = 1e-12);
    }

    #[test]
    fn test_embedded_table_size() {
        assert_eq!(SeriesModel::earth().series().term_count(), 195);
    }

    #[test]
    fn test_json_layout() {
        let json = r#"{
            "L": [[[1.0, 0.0, 0.0]], [[2.0, 0.0, 0.0]]],
            "B": [[[0.0, 0.0, 0.0]]],
            "R": [[[1.0, 0.0, 0.0]]]
        }"#;
        let series = OrbitSeries::from_json(json).unwrap();
        assert_eq!(series, single_term_series());
    }

    #[test]
    fn test_rejects_empty_axis() {
        let json = r#"{"L": [[[1.0, 0.0, 0.0]]], "B": [], "R": [[[1.0, 0.0, 0.0]]]}"#;
        assert!(matches!(
            OrbitSeries::from_json(json),
            Err(StellaraError::InvalidSeries(_))
        ));
        assert!(matches!(
            OrbitSeries::from_json("{\"L\": 3}"),
            Err(StellaraError::JsonError(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("earth.json");
        let json = serde_json::to_string(SeriesModel::earth().series()).unwrap();
        std::fs::write(&path, json).unwrap();

        let loaded = OrbitSeries::from_file(&path).unwrap();
        assert_eq!(&loaded, SeriesModel::earth().series());
    }
}
