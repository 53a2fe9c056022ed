//! Body hierarchy and absolute-position resolution
//!
//! A [`SolarSystem`] is an arena of [`CelestialBody`] values linked by
//! parent/child indices. Each body's position model gives its position
//! relative to its parent; absolute positions are the sum along the path
//! from the root.

use log::warn;
use nalgebra::{Unit, Vector3};

use crate::config::StellaraConfig;
use crate::planetlib::{Body, PositionModel};
use crate::rotation::RotationModel;
use crate::time::{checked_julian_date, JulianDate};
use crate::trail::{OrbitTrailCache, TrailConfig};
use crate::{Result, StellaraError};

/// Index of a body within its [`SolarSystem`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(usize);

impl BodyId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A body in the hierarchy
///
/// Models are optional so that partially described bodies can be placed in
/// the tree; querying a missing capability is an error.
#[derive(Debug, Clone)]
pub struct CelestialBody {
    name: String,
    parent: Option<BodyId>,
    children: Vec<BodyId>,
    position: Option<PositionModel>,
    rotation: Option<RotationModel>,
    trail: Option<OrbitTrailCache>,
}

impl CelestialBody {
    /// Create a body with no models attached
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            position: None,
            rotation: None,
            trail: None,
        }
    }

    pub fn with_position(mut self, model: PositionModel) -> Self {
        self.position = Some(model);
        self
    }

    pub fn with_rotation(mut self, model: RotationModel) -> Self {
        self.rotation = Some(model);
        self
    }

    /// Attach an orbit trail
    ///
    /// # Errors
    ///
    /// Returns [`StellaraError::InvalidConfig`] if `config` is not a usable
    /// trail.
    pub fn with_trail(mut self, config: TrailConfig) -> Result<Self> {
        self.trail = Some(OrbitTrailCache::new(config)?);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<BodyId> {
        self.parent
    }

    pub fn children(&self) -> &[BodyId] {
        &self.children
    }

    pub fn position_model(&self) -> Option<&PositionModel> {
        self.position.as_ref()
    }

    pub fn rotation_model(&self) -> Option<&RotationModel> {
        self.rotation.as_ref()
    }

    pub fn trail(&self) -> Option<&OrbitTrailCache> {
        self.trail.as_ref()
    }

    fn not_implemented(&self, capability: &'static str) -> StellaraError {
        StellaraError::NotImplemented {
            body: self.name.clone(),
            capability,
        }
    }
}

/// Everything a renderer needs to draw one body at one instant
#[derive(Debug, Clone, PartialEq)]
pub struct BodyState {
    pub id: BodyId,
    pub name: String,
    /// Absolute position, in AU
    pub position: Vector3<f64>,
    /// Spin axis and angle, if the body has a rotation model
    pub rotation: Option<(Unit<Vector3<f64>>, f64)>,
    /// Orbit trail in absolute coordinates; empty for bodies without one
    pub trail: Vec<Vector3<f64>>,
}

/// Evaluate a position model, rejecting NaN and infinite results
fn evaluate_position(name: &str, model: &PositionModel, jd: JulianDate) -> Result<Vector3<f64>> {
    let position = model.position_at_time(jd);
    if position.iter().all(|c| c.is_finite()) {
        Ok(position)
    } else {
        warn!("non-finite position for {} at JD {}: {:?}", name, jd, position);
        Err(StellaraError::NonFinite {
            body: name.to_string(),
            jd,
        })
    }
}

/// Arena of bodies forming one or more trees
#[derive(Debug, Clone, Default)]
pub struct SolarSystem {
    bodies: Vec<CelestialBody>,
    roots: Vec<BodyId>,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// The Sun, the Earth orbiting it and the Moon orbiting the Earth
    pub fn sun_earth_moon() -> Result<Self> {
        Self::from_config(&StellaraConfig::default())
    }

    /// Build the Sun-Earth-Moon system with configured trails
    pub fn from_config(config: &StellaraConfig) -> Result<Self> {
        let mut system = Self::new();
        for body in [Body::Sun, Body::Earth, Body::Moon] {
            let mut entry = CelestialBody::new(body.name())
                .with_position(body.position_model())
                .with_rotation(RotationModel::for_body(body));
            match body {
                Body::Sun => {}
                Body::Earth => entry = entry.with_trail(config.earth_trail)?,
                Body::Moon => entry = entry.with_trail(config.moon_trail)?,
            }

            let parent = match body.parent() {
                Some(parent) => Some(system.find(parent.name())?),
                None => None,
            };
            system.add_body(entry, parent)?;
        }
        Ok(system)
    }

    /// Insert a body under `parent`, or as a new root
    ///
    /// A root sits at the origin, so it may only carry a stationary position
    /// model (or none).
    pub fn add_body(&mut self, mut body: CelestialBody, parent: Option<BodyId>) -> Result<BodyId> {
        if self.bodies.iter().any(|b| b.name == body.name) {
            return Err(StellaraError::InvalidConfig(format!(
                "duplicate body name {}",
                body.name
            )));
        }
        let moving_root = matches!(
            body.position,
            Some(PositionModel::Series(_) | PositionModel::Perturbation(_))
        );
        if parent.is_none() && moving_root {
            return Err(StellaraError::InvalidConfig(format!(
                "root body {} must be stationary",
                body.name
            )));
        }

        let id = BodyId(self.bodies.len());
        match parent {
            Some(parent_id) => {
                let parent_body = self
                    .bodies
                    .get_mut(parent_id.0)
                    .ok_or_else(|| StellaraError::UnknownBody(format!("#{}", parent_id.0)))?;
                parent_body.children.push(id);
            }
            None => self.roots.push(id),
        }

        body.parent = parent;
        body.children.clear();
        self.bodies.push(body);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn roots(&self) -> &[BodyId] {
        &self.roots
    }

    /// All bodies in insertion order
    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &CelestialBody)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i), b))
    }

    pub fn body(&self, id: BodyId) -> Result<&CelestialBody> {
        self.bodies
            .get(id.0)
            .ok_or_else(|| StellaraError::UnknownBody(format!("#{}", id.0)))
    }

    /// Look a body up by name
    pub fn find(&self, name: &str) -> Result<BodyId> {
        self.bodies
            .iter()
            .position(|b| b.name == name)
            .map(BodyId)
            .ok_or_else(|| StellaraError::UnknownBody(name.to_string()))
    }

    /// Position relative to the body's parent, in AU
    pub fn position_at_time(&self, id: BodyId, jd: JulianDate) -> Result<Vector3<f64>> {
        let jd = checked_julian_date(jd)?;
        let body = self.body(id)?;
        let model = body
            .position
            .as_ref()
            .ok_or_else(|| body.not_implemented("position_at_time"))?;
        evaluate_position(&body.name, model, jd)
    }

    /// Position relative to the root of the body's tree, in AU
    pub fn absolute_position(&self, id: BodyId, jd: JulianDate) -> Result<Vector3<f64>> {
        let mut chain = vec![id];
        let mut current = self.body(id)?;
        while let Some(parent) = current.parent {
            chain.push(parent);
            current = self.body(parent)?;
        }

        // Sum from the root down so the result matches `resolve` exactly
        let mut position = Vector3::zeros();
        for id in chain.into_iter().rev() {
            position += self.position_at_time(id, jd)?;
        }
        Ok(position)
    }

    /// Spin axis and spin angle in [0, 2π)
    pub fn rotation_at_time(&self, id: BodyId, jd: JulianDate) -> Result<(Unit<Vector3<f64>>, f64)> {
        let jd = checked_julian_date(jd)?;
        let body = self.body(id)?;
        let model = body
            .rotation
            .as_ref()
            .ok_or_else(|| body.not_implemented("rotation_at_time"))?;
        Ok((model.rotation_axis(), model.rotation_at_time(jd)))
    }

    /// Orbit trail relative to the body's parent
    ///
    /// Bodies without a trail (the root) return an empty curve.
    pub fn orbit_curve(&mut self, id: BodyId, jd: JulianDate) -> Result<Vec<Vector3<f64>>> {
        let jd = checked_julian_date(jd)?;
        let body = self
            .bodies
            .get_mut(id.0)
            .ok_or_else(|| StellaraError::UnknownBody(format!("#{}", id.0)))?;

        let CelestialBody {
            name,
            position,
            trail,
            ..
        } = body;
        let Some(trail) = trail.as_mut() else {
            return Ok(Vec::new());
        };
        let model = position.as_ref().ok_or_else(|| StellaraError::NotImplemented {
            body: name.clone(),
            capability: "orbit_curve",
        })?;

        trail.orbit_curve(jd, |t| evaluate_position(name.as_str(), model, t))
    }

    /// Orbit trail shifted by the parent's absolute position at `jd`
    pub fn absolute_orbit_curve(&mut self, id: BodyId, jd: JulianDate) -> Result<Vec<Vector3<f64>>> {
        let origin = match self.body(id)?.parent {
            Some(parent) => self.absolute_position(parent, jd)?,
            None => Vector3::zeros(),
        };
        let mut curve = self.orbit_curve(id, jd)?;
        for point in &mut curve {
            *point += origin;
        }
        Ok(curve)
    }

    /// Resolve every body at `jd`, parents before children
    pub fn resolve(&mut self, jd: JulianDate) -> Result<Vec<BodyState>> {
        let jd = checked_julian_date(jd)?;
        let mut states = Vec::with_capacity(self.bodies.len());
        let mut stack: Vec<(BodyId, Vector3<f64>)> = self
            .roots
            .iter()
            .rev()
            .map(|&id| (id, Vector3::zeros()))
            .collect();

        while let Some((id, base)) = stack.pop() {
            let position = base + self.position_at_time(id, jd)?;
            let mut trail = self.orbit_curve(id, jd)?;
            for point in &mut trail {
                *point += base;
            }

            let body = self.body(id)?;
            let rotation = body
                .rotation
                .as_ref()
                .map(|model| (model.rotation_axis(), model.rotation_at_time(jd)));

            for &child in body.children.iter().rev() {
                stack.push((child, position));
            }
            states.push(BodyState {
                id,
                name: body.name.clone(),
                position,
                rotation,
                trail,
            });
        }

        Ok(states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{AU_KM, J2000, TAU};
    use crate::planetlib::{OrbitSeries, SeriesModel, SeriesTerm};
    use approx::assert_relative_eq;
    use rstest::rstest;

    const JD: JulianDate = 2460586.604166667;

    fn small_trail() -> TrailConfig {
        TrailConfig::for_period(20, 10.0)
    }

    #[test]
    fn test_sun_earth_moon_tree() {
        let system = SolarSystem::sun_earth_moon().unwrap();
        let sun = system.find("Sun").unwrap();
        let earth = system.find("Earth").unwrap();
        let moon = system.find("Moon").unwrap();

        assert_eq!(system.len(), 3);
        assert_eq!(system.roots(), &[sun]);
        assert_eq!(system.body(earth).unwrap().parent(), Some(sun));
        assert_eq!(system.body(moon).unwrap().parent(), Some(earth));
        assert_eq!(system.body(sun).unwrap().children(), &[earth]);
        assert!(system.body(sun).unwrap().trail().is_none());
    }

    #[test]
    fn test_absolute_position_sums_chain() {
        let system = SolarSystem::sun_earth_moon().unwrap();
        let sun = system.find("Sun").unwrap();
        let earth = system.find("Earth").unwrap();
        let moon = system.find("Moon").unwrap();

        assert_eq!(system.absolute_position(sun, JD).unwrap(), Vector3::zeros());
        let earth_abs = system.absolute_position(earth, JD).unwrap();
        let moon_abs = system.absolute_position(moon, JD).unwrap();
        let moon_rel = system.position_at_time(moon, JD).unwrap();
        assert_relative_eq!(moon_abs, earth_abs + moon_rel, epsilon = 1e-15);

        let km = (moon_abs - earth_abs).norm() * AU_KM;
        assert!((356_000.0..407_000.0).contains(&km));
    }

    #[test]
    fn test_resolve_pre_order_matches_queries() {
        let mut system = SolarSystem::sun_earth_moon().unwrap();
        let states = system.resolve(JD).unwrap();

        let names: Vec<_> = states.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Sun", "Earth", "Moon"]);
        for state in &states {
            assert_eq!(state.position, system.absolute_position(state.id, JD).unwrap());
            let (axis, angle) = system.rotation_at_time(state.id, JD).unwrap();
            assert_eq!(state.rotation, Some((axis, angle)));
        }

        assert!(states[0].trail.is_empty());
        assert_eq!(states[1].trail.len(), 1000);
        assert_eq!(states[2].trail.len(), 500);
    }

    #[test]
    fn test_moon_trail_follows_earth() {
        let mut system = SolarSystem::sun_earth_moon().unwrap();
        let moon = system.find("Moon").unwrap();
        let earth = system.find("Earth").unwrap();

        let relative = system.orbit_curve(moon, JD).unwrap();
        let absolute = system.absolute_orbit_curve(moon, JD).unwrap();
        let earth_abs = system.absolute_position(earth, JD).unwrap();
        for (a, r) in absolute.iter().zip(&relative) {
            assert_relative_eq!(*a, r + earth_abs, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_earth_rotation_at_j2000() {
        let system = SolarSystem::sun_earth_moon().unwrap();
        let earth = system.find("Earth").unwrap();
        let (axis, angle) = system.rotation_at_time(earth, J2000).unwrap();
        assert_relative_eq!(angle, TAU * 0.779_057_273_264_0, epsilon = 1e-15);
        assert_relative_eq!(axis.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_models_are_not_implemented() {
        let mut system = SolarSystem::new();
        let bare = system.add_body(CelestialBody::new("Probe"), None).unwrap();

        assert!(matches!(
            system.position_at_time(bare, JD),
            Err(StellaraError::NotImplemented { capability: "position_at_time", .. })
        ));
        assert!(matches!(
            system.rotation_at_time(bare, JD),
            Err(StellaraError::NotImplemented { capability: "rotation_at_time", .. })
        ));
        // No trail attached: nothing to draw
        assert!(system.orbit_curve(bare, JD).unwrap().is_empty());
        assert!(system.resolve(JD).is_err());
    }

    #[test]
    fn test_trail_without_position_model() {
        let mut system = SolarSystem::new();
        let body = CelestialBody::new("Ghost").with_trail(small_trail()).unwrap();
        let id = system.add_body(body, None).unwrap();
        assert!(matches!(
            system.orbit_curve(id, JD),
            Err(StellaraError::NotImplemented { capability: "orbit_curve", .. })
        ));
    }

    #[test]
    fn test_resolve_skips_missing_rotation() {
        let mut system = SolarSystem::new();
        let root = CelestialBody::new("Origin").with_position(PositionModel::Stationary);
        let root = system.add_body(root, None).unwrap();
        let states = system.resolve(JD).unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].id, root);
        assert_eq!(states[0].rotation, None);
    }

    #[test]
    fn test_non_finite_position() {
        // Two huge terms overflow the longitude to infinity
        let series = OrbitSeries::new(
            vec![vec![SeriesTerm(1e308, 0.0, 0.0), SeriesTerm(1e308, 0.0, 0.0)]],
            vec![vec![]],
            vec![vec![SeriesTerm(1.0, 0.0, 0.0)]],
        )
        .unwrap();
        let body = CelestialBody::new("Broken")
            .with_position(PositionModel::Series(SeriesModel::new(series)))
            .with_trail(small_trail())
            .unwrap();

        let mut system = SolarSystem::new();
        let root = CelestialBody::new("Origin").with_position(PositionModel::Stationary);
        let root = system.add_body(root, None).unwrap();
        let id = system.add_body(body, Some(root)).unwrap();

        assert!(matches!(
            system.position_at_time(id, JD),
            Err(StellaraError::NonFinite { .. })
        ));
        assert!(matches!(
            system.orbit_curve(id, JD),
            Err(StellaraError::NonFinite { .. })
        ));
        assert!(system.body(id).unwrap().trail().unwrap().is_empty());
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn test_non_finite_time_is_rejected(#[case] jd: JulianDate) {
        let mut system = SolarSystem::sun_earth_moon().unwrap();
        for name in ["Sun", "Earth", "Moon"] {
            let id = system.find(name).unwrap();
            for result in [
                system.position_at_time(id, jd),
                system.absolute_position(id, jd),
                system.rotation_at_time(id, jd).map(|(axis, _)| axis.into_inner()),
            ] {
                assert!(matches!(result, Err(StellaraError::InvalidDate(_))), "{}", name);
            }
            assert!(matches!(
                system.orbit_curve(id, jd),
                Err(StellaraError::InvalidDate(_))
            ));
            assert!(matches!(
                system.absolute_orbit_curve(id, jd),
                Err(StellaraError::InvalidDate(_))
            ));
        }
        assert!(matches!(system.resolve(jd), Err(StellaraError::InvalidDate(_))));
    }

    #[test]
    fn test_trail_recovers_after_non_finite_time() {
        let mut system = SolarSystem::sun_earth_moon().unwrap();
        let moon = system.find("Moon").unwrap();

        let first = system.orbit_curve(moon, JD).unwrap();
        assert!(system.orbit_curve(moon, f64::NAN).is_err());
        let later = system.orbit_curve(moon, JD + 5.0).unwrap();

        let trail = system.body(moon).unwrap().trail().unwrap();
        let dt = trail.config().step_days();
        let head = trail.head_jd().unwrap();
        assert_eq!(trail.last_jd(), Some(JD + 5.0));
        assert!((head - (JD + 5.0 - 0.3 * 27.32)).abs() <= dt + 1e-6);
        assert_eq!(later.len(), 500);
        assert_ne!(later, first);
    }

    #[test]
    fn test_root_must_be_stationary() {
        let mut system = SolarSystem::new();
        let moving = CelestialBody::new("Drifter")
            .with_position(PositionModel::Series(SeriesModel::earth()));
        assert!(matches!(
            system.add_body(moving, None),
            Err(StellaraError::InvalidConfig(_))
        ));
        assert!(system.is_empty());
        assert!(system.roots().is_empty());

        let root = system
            .add_body(CelestialBody::new("Sun").with_position(PositionModel::Stationary), None)
            .unwrap();
        let moving = CelestialBody::new("Drifter")
            .with_position(PositionModel::Series(SeriesModel::earth()));
        system.add_body(moving, Some(root)).unwrap();
        assert_eq!(system.len(), 2);
    }

    #[test]
    fn test_lookup_errors() {
        let mut system = SolarSystem::sun_earth_moon().unwrap();
        assert!(matches!(system.find("Mars"), Err(StellaraError::UnknownBody(_))));
        assert!(matches!(
            system.add_body(CelestialBody::new("Phobos"), Some(BodyId(42))),
            Err(StellaraError::UnknownBody(_))
        ));
        assert!(matches!(
            system.add_body(CelestialBody::new("Moon"), None),
            Err(StellaraError::InvalidConfig(_))
        ));
        assert_eq!(system.len(), 3);
    }

    #[test]
    fn test_custom_hierarchy_order() {
        let mut system = SolarSystem::new();
        let a = system
            .add_body(CelestialBody::new("A").with_position(PositionModel::Stationary), None)
            .unwrap();
        for name in ["B", "C"] {
            let body = CelestialBody::new(name)
                .with_position(PositionModel::Series(SeriesModel::earth()));
            system.add_body(body, Some(a)).unwrap();
        }
        let b = system.find("B").unwrap();
        let d = CelestialBody::new("D").with_position(PositionModel::Stationary);
        system.add_body(d, Some(b)).unwrap();

        let names: Vec<_> = system
            .resolve(JD)
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["A", "B", "D", "C"]);
    }
}
