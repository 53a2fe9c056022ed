//! Stellara: Sun-Earth-Moon orbital position engine
//!
//! This crate evaluates where the Sun, Earth and Moon are, and how they are
//! spinning, at any point on a continuous Julian Date axis. It also maintains
//! a sliding window of orbit samples per body so that a renderer can draw the
//! visible orbit path every frame without recomputing it from scratch.
//!
//! The engine is a pure query surface: a driving loop advances time (see
//! [`time::clock::SimulationClock`]) and asks a [`SolarSystem`] for absolute
//! positions, spin orientations and orbit trails.

use thiserror::Error;

pub mod config;
pub mod constants;
pub mod coordinates;
pub mod planetlib;
pub mod rotation;
pub mod system;
pub mod time;
pub mod trail;

// Re-export commonly used types
pub use config::StellaraConfig;
pub use planetlib::{Body, PositionModel};
pub use rotation::RotationModel;
pub use system::{BodyId, BodyState, SolarSystem};
pub use time::{calendar_to_julian_date, JulianDate};
pub use trail::{OrbitTrailCache, TrailConfig};

/// Main error type for the stellara library
#[derive(Debug, Error)]
pub enum StellaraError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("{capability} is not implemented for body {body}")]
    NotImplemented {
        body: String,
        capability: &'static str,
    },

    #[error("Non-finite result for body {body} at JD {jd}")]
    NonFinite { body: String, jd: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid orbit series: {0}")]
    InvalidSeries(String),

    #[error("Unknown body: {0}")]
    UnknownBody(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for stellara operations
pub type Result<T> = std::result::Result<T, StellaraError>;
