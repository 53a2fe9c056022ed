//! Incremental orbit trail cache
//!
//! A renderer draws each orbiting body's path as a polyline of evenly spaced
//! samples around the current time: by default 30% of a period behind the
//! body and 70% ahead of it. Recomputing every sample on every frame is
//! wasteful, so [`OrbitTrailCache`] keeps a sliding window of samples and, as
//! time moves, only evaluates the samples that enter the window.
//!
//! Sample times lie on a fixed grid `anchor + k * dt`, where the anchor is the
//! time of the last full resample. Because sample times are computed from an
//! integer index rather than accumulated, a window maintained through many
//! small steps holds the same samples as a window resampled from scratch.
//!
//! Large jumps in time (more than a third of a period by default) discard the
//! window and resample it completely.

use std::collections::VecDeque;

use log::{debug, trace};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{EARTH_TRAIL_PERIOD_DAYS, MOON_TRAIL_PERIOD_DAYS};
use crate::time::{checked_julian_date, JulianDate};
use crate::{Result, StellaraError};

/// Tolerance, in grid steps, when locating the window edges for a new time
const GRID_EPSILON: f64 = 1e-6;

/// Shape of an orbit trail
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Number of samples kept in the window
    pub num_points: usize,
    /// Length of time the window spans, in days (one orbital period)
    pub period_days: f64,
    /// Start of the window relative to the current time, in periods
    pub range_low: f64,
    /// End of the window relative to the current time, in periods
    pub range_high: f64,
    /// Time jump, in periods, beyond which the window is resampled
    pub resample_fraction: f64,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self::earth()
    }
}

impl TrailConfig {
    /// Trail with the default -30%/+70% window around the current time
    pub fn for_period(num_points: usize, period_days: f64) -> Self {
        Self {
            num_points,
            period_days,
            range_low: -0.3,
            range_high: 0.7,
            resample_fraction: 1.0 / 3.0,
        }
    }

    pub fn earth() -> Self {
        Self::for_period(1000, EARTH_TRAIL_PERIOD_DAYS)
    }

    pub fn moon() -> Self {
        Self::for_period(500, MOON_TRAIL_PERIOD_DAYS)
    }

    /// Time between consecutive samples, in days
    pub fn step_days(&self) -> f64 {
        self.period_days / self.num_points as f64
    }

    /// Grid index of the first sample relative to the current time
    fn low_index(&self) -> i64 {
        (self.num_points as f64 * self.range_low).round() as i64
    }

    /// Check that the trail describes a usable window
    pub fn validate(&self) -> Result<()> {
        if self.num_points == 0 {
            return Err(StellaraError::InvalidConfig(
                "trail needs at least one point".to_string(),
            ));
        }
        if !(self.period_days.is_finite() && self.period_days > 0.0) {
            return Err(StellaraError::InvalidConfig(format!(
                "trail period must be positive, got {}",
                self.period_days
            )));
        }
        if !(self.range_low < 0.0 && self.range_high > 0.0) {
            return Err(StellaraError::InvalidConfig(format!(
                "trail range [{}, {}) must contain the current time",
                self.range_low, self.range_high
            )));
        }
        if ((self.range_high - self.range_low) - 1.0).abs() > 1e-9 {
            return Err(StellaraError::InvalidConfig(format!(
                "trail range [{}, {}) must span exactly one period",
                self.range_low, self.range_high
            )));
        }
        if !(self.resample_fraction > 0.0 && self.resample_fraction <= 1.0) {
            return Err(StellaraError::InvalidConfig(format!(
                "resample fraction must be in (0, 1], got {}",
                self.resample_fraction
            )));
        }
        Ok(())
    }
}

/// Counters describing how much work a cache has done
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrailStats {
    /// Positions evaluated since creation
    pub evaluations: u64,
    /// Full resamples since creation
    pub resamples: u64,
}

/// Samples currently held, on the grid `anchor + k * dt` starting at `head`
#[derive(Debug, Clone, Default)]
struct TrailWindow {
    points: VecDeque<Vector3<f64>>,
    anchor: JulianDate,
    head: i64,
}

impl TrailWindow {
    fn tail(&self) -> i64 {
        self.head + self.points.len() as i64
    }
}

/// Sliding window of orbit samples for one body
///
/// The cache is not reentrant; it is updated through `&mut self` once per
/// tick by whoever owns the body.
#[derive(Debug, Clone)]
pub struct OrbitTrailCache {
    config: TrailConfig,
    dt: f64,
    window: TrailWindow,
    last_jd: Option<JulianDate>,
    stats: TrailStats,
}

impl OrbitTrailCache {
    /// Create an empty cache
    ///
    /// # Errors
    ///
    /// Returns [`StellaraError::InvalidConfig`] if the configuration does not
    /// describe a usable window.
    pub fn new(config: TrailConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            dt: config.step_days(),
            window: TrailWindow::default(),
            last_jd: None,
            stats: TrailStats::default(),
        })
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    pub fn stats(&self) -> TrailStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.window.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.points.is_empty()
    }

    /// Time of the first sample in the window
    pub fn head_jd(&self) -> Option<JulianDate> {
        (!self.is_empty()).then(|| self.grid_time(self.window.head))
    }

    /// Time one step past the last sample in the window
    pub fn tail_jd(&self) -> Option<JulianDate> {
        (!self.is_empty()).then(|| self.grid_time(self.window.tail()))
    }

    /// Time of the last `orbit_curve` call
    pub fn last_jd(&self) -> Option<JulianDate> {
        self.last_jd
    }

    /// Drop all samples; the next call resamples from scratch
    pub fn clear(&mut self) {
        self.window = TrailWindow::default();
        self.last_jd = None;
    }

    /// Copy of the samples currently held, oldest first
    pub fn snapshot(&self) -> Vec<Vector3<f64>> {
        self.window.points.iter().copied().collect()
    }

    /// Bring the window up to date for `jd` and return a copy of it
    ///
    /// `sample` evaluates the body's position at a given time. If it fails,
    /// the window is cleared and the error returned. A non-finite `jd` is
    /// rejected with [`StellaraError::InvalidDate`] and leaves the window as
    /// it was.
    pub fn orbit_curve<F>(&mut self, jd: JulianDate, mut sample: F) -> Result<Vec<Vector3<f64>>>
    where
        F: FnMut(JulianDate) -> Result<Vector3<f64>>,
    {
        let jd = checked_julian_date(jd)?;
        let outcome = match self.last_jd {
            Some(last) if !self.is_empty() => {
                if (jd - last).abs() > self.config.period_days * self.config.resample_fraction {
                    debug!(
                        "trail jump of {:.3} days exceeds threshold, resampling",
                        jd - last
                    );
                    self.resample(jd, &mut sample)
                } else if jd > last {
                    self.advance(jd, &mut sample)
                } else if jd < last {
                    self.rewind(jd, &mut sample)
                } else {
                    Ok(())
                }
            }
            _ => self.resample(jd, &mut sample),
        };

        if let Err(err) = outcome {
            self.clear();
            return Err(err);
        }

        self.last_jd = Some(jd);
        Ok(self.snapshot())
    }

    fn grid_time(&self, index: i64) -> JulianDate {
        self.window.anchor + index as f64 * self.dt
    }

    /// Position of `jd` on the grid, in steps from the anchor
    fn grid_offset(&self, jd: JulianDate) -> f64 {
        (jd - self.window.anchor) / self.dt
    }

    fn evaluate<F>(&mut self, index: i64, sample: &mut F) -> Result<Vector3<f64>>
    where
        F: FnMut(JulianDate) -> Result<Vector3<f64>>,
    {
        self.stats.evaluations += 1;
        sample(self.grid_time(index))
    }

    /// Discard the window and evaluate every sample around `jd`
    fn resample<F>(&mut self, jd: JulianDate, sample: &mut F) -> Result<()>
    where
        F: FnMut(JulianDate) -> Result<Vector3<f64>>,
    {
        self.stats.resamples += 1;
        self.window = TrailWindow {
            points: VecDeque::with_capacity(self.config.num_points),
            anchor: jd,
            head: self.config.low_index(),
        };

        for index in self.window.head..self.window.head + self.config.num_points as i64 {
            let point = self.evaluate(index, sample)?;
            self.window.points.push_back(point);
        }
        Ok(())
    }

    /// Time moved forward: drop stale head samples, extend the tail
    fn advance<F>(&mut self, jd: JulianDate, sample: &mut F) -> Result<()>
    where
        F: FnMut(JulianDate) -> Result<Vector3<f64>>,
    {
        let target_head =
            (self.grid_offset(jd) + self.config.low_index() as f64 - GRID_EPSILON).ceil() as i64;
        if target_head >= self.window.tail() {
            return self.resample(jd, sample);
        }

        let mut dropped = 0;
        while self.window.head < target_head {
            self.window.points.pop_front();
            self.window.head += 1;
            dropped += 1;
        }

        let mut added = 0;
        while self.window.points.len() < self.config.num_points {
            let point = self.evaluate(self.window.tail(), sample)?;
            self.window.points.push_back(point);
            added += 1;
        }

        trace!("trail advanced: dropped {}, added {}", dropped, added);
        Ok(())
    }

    /// Time moved backward: drop stale tail samples, extend the head
    fn rewind<F>(&mut self, jd: JulianDate, sample: &mut F) -> Result<()>
    where
        F: FnMut(JulianDate) -> Result<Vector3<f64>>,
    {
        let high_index = self.config.low_index() + self.config.num_points as i64;
        let target_tail =
            (self.grid_offset(jd) + high_index as f64 + GRID_EPSILON).floor() as i64;
        if target_tail <= self.window.head {
            return self.resample(jd, sample);
        }

        let mut dropped = 0;
        while self.window.tail() > target_tail {
            self.window.points.pop_back();
            dropped += 1;
        }

        let mut added = 0;
        while self.window.points.len() < self.config.num_points {
            let point = self.evaluate(self.window.head - 1, sample)?;
            self.window.points.push_front(point);
            self.window.head -= 1;
            added += 1;
        }

        trace!("trail rewound: dropped {}, added {}", dropped, added);
        Ok(())
    }
}
