//! Preset entry scenarios.
//!
//! Each preset names a body and an entry geometry; [`Scenario::config`]
//! turns it into a ready-to-run [`SimulationConfig`].

pub mod presets;

use bevy::math::DVec3;

use crate::config::SimulationConfig;
use crate::impact::PlanetFrame;
use crate::physics::ablation::AblationParams;
use crate::types::{DEG_TO_RAD, MaterialProperties, TargetBody};

pub use presets::SCENARIOS;

/// Initial geometry of an entry, in planet terms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntryGeometry {
    /// Starting height above the surface (m)
    pub altitude: f64,
    /// Starting speed (m/s)
    pub speed: f64,
    /// Flight path angle below the local horizontal (degrees, 90 = straight down)
    pub entry_angle: f64,
    /// Direction of horizontal travel (degrees clockwise from north)
    pub heading: f64,
    /// Latitude of the starting point (degrees)
    pub latitude: f64,
    /// Longitude of the starting point at t = 0 (degrees)
    pub longitude: f64,
}

impl Default for EntryGeometry {
    fn default() -> Self {
        Self {
            altitude: 120_000.0,
            speed: 5_000.0,
            entry_angle: 90.0,
            heading: 90.0,
            latitude: 0.0,
            longitude: 0.0,
        }
    }
}

impl EntryGeometry {
    /// Inertial position and velocity at t = 0 above `target`.
    pub fn initial_state(&self, target: &TargetBody) -> (DVec3, DVec3) {
        let frame = PlanetFrame::from_axis(target.rotation_axis);
        let relative = frame.position_at(self.latitude, self.longitude, target.radius + self.altitude);

        let up = relative.normalize_or_zero();
        // At the poles every direction is south; fall back to the frame's east
        let east = frame
            .pole
            .cross(up)
            .try_normalize()
            .unwrap_or(frame.east);
        let north = up.cross(east);

        let heading = self.heading * DEG_TO_RAD;
        let gamma = self.entry_angle * DEG_TO_RAD;
        let horizontal = north * heading.cos() + east * heading.sin();
        let direction = horizontal * gamma.cos() - up * gamma.sin();

        (
            target.body.pos + relative,
            target.body.vel + direction * self.speed,
        )
    }
}

/// A predefined entry.
#[derive(Clone, Copy, Debug)]
pub struct Scenario {
    /// Unique identifier for the scenario.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Brief description of the scenario.
    pub description: &'static str,
    pub material: MaterialProperties,
    pub geometry: EntryGeometry,
    /// Whether the planet spins at Earth's sidereal rate
    pub rotating: bool,
    /// Atmosphere boundary height above the surface (m)
    pub atmosphere_altitude: f64,
    /// Ablation scale factor `k`
    pub ablation_scale: f64,
    /// Fixed integration step (s)
    pub time_step: f64,
}

impl Scenario {
    /// Look a preset up by id.
    pub fn find(id: &str) -> Option<&'static Scenario> {
        SCENARIOS.iter().find(|s| s.id == id)
    }

    /// Full run configuration for this preset.
    pub fn config(&self) -> SimulationConfig {
        let target = if self.rotating {
            TargetBody::rotating_earth()
        } else {
            TargetBody::earth()
        };
        let (initial_position, initial_velocity) = self.geometry.initial_state(&target);

        SimulationConfig {
            material: self.material,
            initial_position,
            initial_velocity,
            target,
            time_step: self.time_step,
            atmosphere_altitude: self.atmosphere_altitude,
            ablation: AblationParams {
                scale: self.ablation_scale,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
