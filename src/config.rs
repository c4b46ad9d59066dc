//! Run configuration and validation.

use bevy::math::DVec3;
use bevy::prelude::Resource;

use crate::physics::ablation::{AblationParams, DEFAULT_MIN_ENTRY_ANGLE};
use crate::physics::gravity::GravityModel;
use crate::types::{EARTH_RADIUS, MassiveBody, MaterialProperties, TargetBody};

/// Default height of the atmosphere boundary above the surface (m).
pub const DEFAULT_ATMOSPHERE_ALTITUDE: f64 = 100_000.0;

/// Bodies at least this large (radius, m) never break up on entry.
pub const DEFAULT_BREAKUP_RADIUS_THRESHOLD: f64 = 20.0;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid diameter: {0} m (must be positive)")]
    InvalidDiameter(f64),

    #[error("invalid density: {0} kg/m³ (must be positive)")]
    InvalidDensity(f64),

    #[error("invalid heat of ablation: {0} J/kg (must be positive)")]
    InvalidHeatOfAblation(f64),

    #[error("invalid drag coefficient: {0} (must be non-negative)")]
    InvalidDragCoefficient(f64),

    #[error("invalid heat-transfer coefficient: {0} (must be non-negative)")]
    InvalidHeatTransferCoefficient(f64),

    #[error("invalid time step: {0} s (must be positive)")]
    InvalidTimeStep(f64),

    #[error("step budget must be at least one step")]
    ZeroStepBudget,

    #[error("invalid target mass: {0} kg (must be positive)")]
    InvalidTargetMass(f64),

    #[error("invalid target radius: {0} m (must be positive)")]
    InvalidTargetRadius(f64),

    #[error("rotation rate {0} rad/s needs a non-zero rotation axis")]
    DegenerateRotationAxis(f64),

    #[error("invalid atmosphere altitude: {0} m (must be non-negative)")]
    InvalidAtmosphereAltitude(f64),

    #[error("invalid ablation scale: {0} (must be positive)")]
    InvalidAblationScale(f64),

    #[error("invalid ablation floors (radius {radius} m, mass {mass} kg; must be non-negative)")]
    InvalidFloors { radius: f64, mass: f64 },

    #[error(
        "body starts at or below the ablation floors (radius {radius} m, mass {mass} kg)"
    )]
    BelowAblationFloor { radius: f64, mass: f64 },

    #[error("invalid breakup radius threshold: {0} m (must be non-negative)")]
    InvalidBreakupThreshold(f64),

    #[error("invalid minimum entry angle: {0} rad (must be non-negative)")]
    InvalidMinEntryAngle(f64),

    #[error("invalid perturber {index}: mass {mass} kg (must be positive, with a finite state)")]
    InvalidPerturber { index: usize, mass: f64 },

    #[error("initial position or velocity is not finite")]
    NonFiniteState,

    #[error("initial position is {altitude} m from the surface (must start above it)")]
    StartsBelowSurface { altitude: f64 },
}

/// Everything one entry run needs. Immutable once the run starts.
#[derive(Resource, Clone, Debug)]
pub struct SimulationConfig {
    /// Body material and size
    pub material: MaterialProperties,
    /// Initial position (m, inertial)
    pub initial_position: DVec3,
    /// Initial velocity (m/s, inertial)
    pub initial_velocity: DVec3,
    /// Planet being entered
    pub target: TargetBody,
    /// Additional gravitating bodies (used by [`GravityModel::NBody`])
    pub perturbers: Vec<MassiveBody>,
    /// Gravity strategy
    pub gravity: GravityModel,
    /// Fixed integration step (s)
    pub time_step: f64,
    /// Hard iteration cap
    pub max_steps: usize,
    /// Atmosphere boundary height above the surface (m)
    pub atmosphere_altitude: f64,
    /// Only bodies with a smaller radius (m) can break up
    pub breakup_radius_threshold: f64,
    /// Ablation scale factor and floors
    pub ablation: AblationParams,
    /// Lower bound on |entry angle| for the breakup estimate (rad)
    pub min_entry_angle: f64,
    /// Emit a status record every N in-flight steps (0 disables periodic records)
    pub status_interval: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            material: MaterialProperties::default(),
            initial_position: DVec3::new(EARTH_RADIUS + 120_000.0, 0.0, 0.0),
            initial_velocity: DVec3::new(-5_000.0, 0.0, 0.0),
            target: TargetBody::earth(),
            perturbers: Vec::new(),
            gravity: GravityModel::Central,
            time_step: 0.1,
            max_steps: 200_000,
            atmosphere_altitude: DEFAULT_ATMOSPHERE_ALTITUDE,
            breakup_radius_threshold: DEFAULT_BREAKUP_RADIUS_THRESHOLD,
            ablation: AblationParams::default(),
            min_entry_angle: DEFAULT_MIN_ENTRY_ANGLE,
            status_interval: 1000,
        }
    }
}

impl SimulationConfig {
    /// Mass of the intact body (kg)
    pub fn initial_mass(&self) -> f64 {
        self.material.mass()
    }

    /// Radius of the intact body (m)
    pub fn initial_radius(&self) -> f64 {
        self.material.radius()
    }

    /// Distance from the target's center at which atmospheric flight starts (m)
    pub fn atmosphere_radius(&self) -> f64 {
        self.target.radius + self.atmosphere_altitude
    }

    /// Target first, then perturbers: the layout [`GravityModel`] expects.
    pub fn gravitating_bodies(&self) -> Vec<MassiveBody> {
        std::iter::once(self.target.body)
            .chain(self.perturbers.iter().copied())
            .collect()
    }

    /// Perturbers only pull under [`GravityModel::NBody`].
    pub fn ignores_perturbers(&self) -> bool {
        self.gravity == GravityModel::Central && !self.perturbers.is_empty()
    }

    /// Reject parameter sets no run can start from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.material;
        if !is_positive(m.diameter) {
            return Err(ConfigError::InvalidDiameter(m.diameter));
        }
        if !is_positive(m.density) {
            return Err(ConfigError::InvalidDensity(m.density));
        }
        if !is_positive(m.heat_of_ablation) {
            return Err(ConfigError::InvalidHeatOfAblation(m.heat_of_ablation));
        }
        if !is_non_negative(m.drag_coefficient) {
            return Err(ConfigError::InvalidDragCoefficient(m.drag_coefficient));
        }
        if !is_non_negative(m.heat_transfer_coefficient) {
            return Err(ConfigError::InvalidHeatTransferCoefficient(
                m.heat_transfer_coefficient,
            ));
        }

        if !is_positive(self.time_step) {
            return Err(ConfigError::InvalidTimeStep(self.time_step));
        }
        if self.max_steps == 0 {
            return Err(ConfigError::ZeroStepBudget);
        }

        let t = &self.target;
        if !is_positive(t.body.mass) {
            return Err(ConfigError::InvalidTargetMass(t.body.mass));
        }
        if !is_positive(t.radius) {
            return Err(ConfigError::InvalidTargetRadius(t.radius));
        }
        if t.rotation_rate != 0.0 && t.rotation_axis.length_squared() == 0.0 {
            return Err(ConfigError::DegenerateRotationAxis(t.rotation_rate));
        }
        if !is_non_negative(self.atmosphere_altitude) {
            return Err(ConfigError::InvalidAtmosphereAltitude(
                self.atmosphere_altitude,
            ));
        }

        let a = &self.ablation;
        if !is_positive(a.scale) {
            return Err(ConfigError::InvalidAblationScale(a.scale));
        }
        if !is_non_negative(a.radius_floor) || !is_non_negative(a.mass_floor) {
            return Err(ConfigError::InvalidFloors {
                radius: a.radius_floor,
                mass: a.mass_floor,
            });
        }
        let (radius, mass) = (self.initial_radius(), self.initial_mass());
        if radius <= a.radius_floor || mass <= a.mass_floor {
            return Err(ConfigError::BelowAblationFloor { radius, mass });
        }

        if !is_non_negative(self.breakup_radius_threshold) {
            return Err(ConfigError::InvalidBreakupThreshold(
                self.breakup_radius_threshold,
            ));
        }
        if !is_non_negative(self.min_entry_angle) {
            return Err(ConfigError::InvalidMinEntryAngle(self.min_entry_angle));
        }
        for (index, body) in self.perturbers.iter().enumerate() {
            if !is_positive(body.mass) || !body.pos.is_finite() || !body.vel.is_finite() {
                return Err(ConfigError::InvalidPerturber {
                    index,
                    mass: body.mass,
                });
            }
        }

        if !self.initial_position.is_finite() || !self.initial_velocity.is_finite() {
            return Err(ConfigError::NonFiniteState);
        }
        let altitude = t.altitude(self.initial_position);
        if altitude <= 0.0 {
            return Err(ConfigError::StartsBelowSurface { altitude });
        }

        Ok(())
    }
}

fn is_positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

fn is_non_negative(x: f64) -> bool {
    x.is_finite() && x >= 0.0
}
