//! Common test utilities for integration tests.
#![allow(dead_code)]

use bevy::math::DVec3;
use meteor_entry::SimulationConfig;
use meteor_entry::types::{EARTH_RADIUS, MaterialProperties};

/// Stony body of the given diameter with reference coefficients.
pub fn stony(diameter: f64) -> MaterialProperties {
    MaterialProperties {
        diameter,
        ..Default::default()
    }
}

/// Body dropped straight down along -x from `altitude` at `speed`.
pub fn vertical_drop(altitude: f64, speed: f64, material: MaterialProperties) -> SimulationConfig {
    SimulationConfig {
        material,
        initial_position: DVec3::new(EARTH_RADIUS + altitude, 0.0, 0.0),
        initial_velocity: DVec3::new(-speed, 0.0, 0.0),
        ..Default::default()
    }
}

/// 50 m stony body, 3000 kg/m³, 5 km/s straight down from 120 km, Δt = 0.1 s.
pub fn reference_config() -> SimulationConfig {
    vertical_drop(120_000.0, 5_000.0, stony(50.0))
}

/// 2 m body whose entry check happens at 20 km altitude at 20 km/s.
pub fn breakup_config() -> SimulationConfig {
    SimulationConfig {
        atmosphere_altitude: 20_000.0,
        time_step: 0.01,
        ..vertical_drop(20_500.0, 20_000.0, stony(2.0))
    }
}

/// Specific orbital energy about a point mass at the origin.
pub fn specific_energy(pos: DVec3, vel: DVec3, gm: f64) -> f64 {
    0.5 * vel.length_squared() - gm / pos.length()
}
