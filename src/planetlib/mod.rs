//! Position models for the Sun, Earth and Moon
//!
//! Every model maps a Julian date to a position relative to the body's
//! parent, in AU, in the ecliptic frame. The set of models is closed: the
//! stationary root, a VSOP87-style series, and the lunar perturbation series.

pub mod lunar;
pub mod vsop87;
pub mod vsop87_earth;

use nalgebra::Vector3;

use crate::time::JulianDate;

pub use self::lunar::PerturbationSeries;
pub use self::vsop87::{OrbitSeries, SeriesModel, SeriesTerm};

/// The bodies of the built-in Sun-Earth-Moon system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Earth,
    Moon,
}

impl Body {
    /// Get the body's name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Earth => "Earth",
            Body::Moon => "Moon",
        }
    }

    /// The body this one orbits, if any
    pub fn parent(&self) -> Option<Body> {
        match self {
            Body::Sun => None,
            Body::Earth => Some(Body::Sun),
            Body::Moon => Some(Body::Earth),
        }
    }

    /// The position model used for this body
    pub fn position_model(&self) -> PositionModel {
        match self {
            Body::Sun => PositionModel::Stationary,
            Body::Earth => PositionModel::Series(SeriesModel::earth()),
            Body::Moon => PositionModel::Perturbation(PerturbationSeries::new()),
        }
    }
}

/// Maps a Julian date to a position relative to the parent body
#[derive(Debug, Clone, PartialEq)]
pub enum PositionModel {
    /// Fixed at the parent's origin
    Stationary,
    /// Heliocentric periodic series (the Earth)
    Series(SeriesModel),
    /// Geocentric lunar perturbation series (the Moon)
    Perturbation(PerturbationSeries),
}

impl PositionModel {
    /// Position relative to the parent body at a Julian date, in AU
    pub fn position_at_time(&self, jd: JulianDate) -> Vector3<f64> {
        match self {
            PositionModel::Stationary => Vector3::zeros(),
            PositionModel::Series(model) => model.position_at_time(jd),
            PositionModel::Perturbation(model) => model.position_at_time(jd),
        }
    }
}
