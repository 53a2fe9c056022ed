//! Simulation clock driving the frame loop
//!
//! The clock owns the simulated Julian date and advances it by the real
//! elapsed time multiplied by a playback speed. Speed may be negative to run
//! time backwards, and the time may be set to an arbitrary date at any point.

use crate::config::ClockConfig;
use crate::constants::DAY_S;
use crate::time::{calendar_to_julian_date, JulianDate};
use crate::Result;

/// Simulated time with variable rate playback
#[derive(Debug, Clone)]
pub struct SimulationClock {
    /// Current simulation time
    current: JulianDate,
    /// Playback rate (simulated seconds per real second)
    speed: f64,
    /// Rate restored by [`SimulationClock::reset_speed`]
    base_speed: f64,
    paused: bool,
}

impl SimulationClock {
    /// Create a running clock at `start` with the given playback speed
    pub fn new(start: JulianDate, speed: f64) -> Self {
        Self {
            current: start,
            speed,
            base_speed: speed,
            paused: false,
        }
    }

    /// Create a clock from configuration
    pub fn from_config(config: &ClockConfig) -> Result<Self> {
        let start = calendar_to_julian_date(&config.start)?;
        Ok(Self::new(start, config.speed))
    }

    /// Current simulation time
    pub fn current(&self) -> JulianDate {
        self.current
    }

    /// Current playback speed (simulated seconds per real second)
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    pub fn half_speed(&mut self) {
        self.speed *= 0.5;
    }

    pub fn double_speed(&mut self) {
        self.speed *= 2.0;
    }

    /// Restore the speed the clock was created with
    pub fn reset_speed(&mut self) {
        self.speed = self.base_speed;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Jump to an absolute Julian date
    pub fn set_time(&mut self, jd: JulianDate) {
        self.current = jd;
    }

    /// Jump to a calendar timestamp, leaving the clock untouched on error
    pub fn set_timestamp(&mut self, timestamp: &str) -> Result<()> {
        self.current = calendar_to_julian_date(timestamp)?;
        Ok(())
    }

    /// Advance by `real_dt_seconds` of wall-clock time and return the new date
    pub fn tick(&mut self, real_dt_seconds: f64) -> JulianDate {
        if !self.paused {
            self.current += real_dt_seconds * self.speed / DAY_S;
        }
        self.current
    }
}
