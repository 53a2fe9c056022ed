//! Engine configuration
//!
//! All fields have defaults, so a configuration file only needs to name the
//! values it changes:
//!
//! ```json
//! {
//!   "clock": { "start": "2024-10-03 02:30:00", "speed": 8640.0 },
//!   "moon_trail": { "num_points": 250 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::time::calendar_to_julian_date;
pub use crate::trail::TrailConfig;
use crate::{Result, StellaraError};

/// Simulation clock settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Start timestamp, in any format accepted by [`calendar_to_julian_date`]
    pub start: String,
    /// Simulated seconds per real second
    pub speed: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            start: "2024-10-03 02:30:00".to_string(),
            // One tenth of a day per second
            speed: 8640.0,
        }
    }
}

/// Trail settings as written in a file; missing fields keep the body's default
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TrailOverrides {
    num_points: Option<usize>,
    period_days: Option<f64>,
    range_low: Option<f64>,
    range_high: Option<f64>,
    resample_fraction: Option<f64>,
}

impl TrailOverrides {
    fn apply(self, base: TrailConfig) -> TrailConfig {
        TrailConfig {
            num_points: self.num_points.unwrap_or(base.num_points),
            period_days: self.period_days.unwrap_or(base.period_days),
            range_low: self.range_low.unwrap_or(base.range_low),
            range_high: self.range_high.unwrap_or(base.range_high),
            resample_fraction: self.resample_fraction.unwrap_or(base.resample_fraction),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    clock: ClockConfig,
    earth_trail: TrailOverrides,
    moon_trail: TrailOverrides,
}

impl From<RawConfig> for StellaraConfig {
    fn from(raw: RawConfig) -> Self {
        Self {
            clock: raw.clock,
            earth_trail: raw.earth_trail.apply(TrailConfig::earth()),
            moon_trail: raw.moon_trail.apply(TrailConfig::moon()),
        }
    }
}

/// Top-level configuration for a Sun-Earth-Moon system and its clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawConfig")]
pub struct StellaraConfig {
    pub clock: ClockConfig,
    pub earth_trail: TrailConfig,
    pub moon_trail: TrailConfig,
}

impl Default for StellaraConfig {
    fn default() -> Self {
        Self {
            clock: ClockConfig::default(),
            earth_trail: TrailConfig::earth(),
            moon_trail: TrailConfig::moon(),
        }
    }
}

impl StellaraConfig {
    /// Parse and validate a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        calendar_to_julian_date(&self.clock.start)?;
        if !self.clock.speed.is_finite() {
            return Err(StellaraError::InvalidConfig(format!(
                "clock speed must be finite, got {}",
                self.clock.speed
            )));
        }
        self.earth_trail.validate()?;
        self.moon_trail.validate()?;
        Ok(())
    }
}
