//! Spin axes and rotation angles
//!
//! Each body spins about a fixed axis. The spin angle is a continuous
//! function of the Julian date reduced to [0, 2π): a uniform rate for the Sun
//! and the Moon, and the Earth Rotation Angle for the Earth.

use nalgebra::{Unit, UnitQuaternion, Vector3};

use crate::constants::{
    ERA_J2000, ERA_RATE, J2000, MOON_ROTATION_DEG_PER_DAY, OBLIQUITY_J2000_DEG, SUN_ROTATION_DAYS,
    TAU,
};
use crate::coordinates::fractional_part;
use crate::planetlib::Body;
use crate::time::JulianDate;

/// How the spin angle advances with time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinModel {
    /// One revolution every `period_days`, zero at JD 0
    Uniform { period_days: f64 },
    /// The Earth Rotation Angle (sidereal rotation) referenced to J2000.0
    EarthRotationAngle,
}

impl SpinModel {
    /// Spin angle in revolutions, reduced to [0, 1)
    pub fn revolutions_at_time(&self, jd: JulianDate) -> f64 {
        match *self {
            SpinModel::Uniform { period_days } => fractional_part(jd / period_days),
            SpinModel::EarthRotationAngle => fractional_part(ERA_J2000 + ERA_RATE * (jd - J2000)),
        }
    }
}

/// Fixed spin axis plus a spin-angle function of time
#[derive(Debug, Clone, PartialEq)]
pub struct RotationModel {
    axis: Unit<Vector3<f64>>,
    spin: SpinModel,
}

impl RotationModel {
    /// Create a rotation model; the axis is normalized
    pub fn new(axis: Vector3<f64>, spin: SpinModel) -> Self {
        Self {
            axis: Unit::new_normalize(axis),
            spin,
        }
    }

    /// The Sun's pole, spinning once per Carrington rotation
    pub fn sun() -> Self {
        Self::new(
            Vector3::new(0.12241399, -0.0306615, 0.99200539),
            SpinModel::Uniform {
                period_days: SUN_ROTATION_DAYS,
            },
        )
    }

    /// The Earth's pole, tilted by the J2000.0 obliquity
    pub fn earth() -> Self {
        let obliquity = OBLIQUITY_J2000_DEG.to_radians();
        Self::new(
            Vector3::new(0.0, obliquity.sin(), obliquity.cos()),
            SpinModel::EarthRotationAngle,
        )
    }

    /// The Moon's pole, spinning at its mean synchronous rate
    pub fn moon() -> Self {
        Self::new(
            Vector3::new(-7.31313897e-17, -3.61614760e-04, 9.99999935e-01),
            SpinModel::Uniform {
                period_days: 360.0 / MOON_ROTATION_DEG_PER_DAY,
            },
        )
    }

    /// The rotation model used for a built-in body
    pub fn for_body(body: Body) -> Self {
        match body {
            Body::Sun => Self::sun(),
            Body::Earth => Self::earth(),
            Body::Moon => Self::moon(),
        }
    }

    pub fn rotation_axis(&self) -> Unit<Vector3<f64>> {
        self.axis
    }

    pub fn spin(&self) -> SpinModel {
        self.spin
    }

    /// Spin angle in radians, in [0, 2π)
    pub fn rotation_at_time(&self, jd: JulianDate) -> f64 {
        let angle = TAU * self.spin.revolutions_at_time(jd);
        if angle >= TAU {
            0.0
        } else {
            angle
        }
    }

    /// Orientation as a rotation of `rotation_at_time(jd)` about the axis
    pub fn orientation_at_time(&self, jd: JulianDate) -> UnitQuaternion<f64> {
        UnitQuaternion::from_axis_angle(&self.axis, self.rotation_at_time(jd))
    }
}
