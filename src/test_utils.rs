//! Test utilities for entry simulation tests.
//!
//! Fixtures build configurations for the standard test scenarios;
//! assertions check invariants over recorded runs.

use bevy::math::DVec3;

use crate::config::SimulationConfig;
use crate::types::{EARTH_RADIUS, MaterialProperties};

/// Fixtures for creating test configurations.
pub mod fixtures {
    use super::*;

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

    /// 50 m stony body at 5 km/s from 120 km, Δt = 0.1 s.
    pub fn reference_config() -> SimulationConfig {
        vertical_drop(120_000.0, 5_000.0, stony(50.0))
    }

    /// 2 m stony body hitting thick air at 20 km/s.
    ///
    /// The atmosphere boundary is lowered to 20 km so the entry check
    /// sees high ram pressure.
    pub fn breakup_candidate() -> SimulationConfig {
        SimulationConfig {
            atmosphere_altitude: 20_000.0,
            time_step: 0.01,
            ..vertical_drop(20_500.0, 20_000.0, stony(2.0))
        }
    }
}

/// Assertions for verifying run invariants.
pub mod assertions {
    /// Assert a sequence never increases.
    ///
    /// # Panics
    /// Panics at the first increase, naming the index and values.
    pub fn assert_non_increasing(values: &[f64], label: &str) {
        for (i, pair) in values.windows(2).enumerate() {
            assert!(
                pair[1] <= pair[0],
                "{label} increased at sample {}: {} -> {}",
                i + 1,
                pair[0],
                pair[1]
            );
        }
    }
}
