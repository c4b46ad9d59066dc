//! Preset scenario definitions.
//!
//! Five entries spanning the outcomes: large bodies that reach the
//! ground, small ones that burn up, and one that fragments on entry.

use crate::types::MaterialProperties;

use super::{EntryGeometry, Scenario};

/// All available preset scenarios.
pub static SCENARIOS: &[Scenario] = &[
    STONY_50M,
    IRON_100M,
    SMALL_10M,
    BREAKUP_2M,
    OBLIQUE_ROTATING,
];

/// Scenario 1: 50 m stony body (default)
///
/// Falls straight down from 15 000 km at 40 km/s. Big enough to reach
/// the ground with most of its mass.
pub static STONY_50M: Scenario = Scenario {
    id: "stony_50m",
    name: "50 m Stony Body",
    description: "Vertical entry at 40 km/s from 15 000 km.",
    material: MaterialProperties {
        diameter: 50.0,
        density: 3000.0,
        heat_of_ablation: 8.0e6,
        drag_coefficient: 0.5,
        heat_transfer_coefficient: 0.1,
    },
    geometry: EntryGeometry {
        altitude: 15_000_000.0,
        speed: 40_000.0,
        entry_angle: 90.0,
        heading: 0.0,
        latitude: 0.0,
        longitude: 0.0,
    },
    rotating: false,
    atmosphere_altitude: 100_000.0,
    ablation_scale: 8.0,
    time_step: 0.1,
};

/// Scenario 2: 100 m iron body
///
/// Dense and fast with a lower heat-transfer coefficient.
pub static IRON_100M: Scenario = Scenario {
    id: "iron_100m",
    name: "100 m Iron Body",
    description: "Vertical entry at 50 km/s from 15 000 km.",
    material: MaterialProperties {
        diameter: 100.0,
        density: 8000.0,
        heat_of_ablation: 8.0e6,
        drag_coefficient: 0.5,
        heat_transfer_coefficient: 0.05,
    },
    geometry: EntryGeometry {
        altitude: 15_000_000.0,
        speed: 50_000.0,
        entry_angle: 90.0,
        heading: 0.0,
        latitude: 0.0,
        longitude: 0.0,
    },
    rotating: false,
    atmosphere_altitude: 100_000.0,
    ablation_scale: 8.0,
    time_step: 0.1,
};

/// Scenario 3: 10 m stony body
///
/// Uses the faster ablation calibration (k = 2).
pub static SMALL_10M: Scenario = Scenario {
    id: "small_10m",
    name: "10 m Stony Body",
    description: "45° entry at 20 km/s with k = 2 ablation.",
    material: MaterialProperties {
        diameter: 10.0,
        density: 3000.0,
        heat_of_ablation: 8.0e6,
        drag_coefficient: 0.5,
        heat_transfer_coefficient: 0.1,
    },
    geometry: EntryGeometry {
        altitude: 200_000.0,
        speed: 20_000.0,
        entry_angle: 45.0,
        heading: 90.0,
        latitude: 0.0,
        longitude: 0.0,
    },
    rotating: false,
    atmosphere_altitude: 100_000.0,
    ablation_scale: 2.0,
    time_step: 0.1,
};

/// Scenario 4: 2 m body meeting thick air
///
/// The boundary sits at 20 km so the entry check sees stratospheric
/// ram pressure, well above what a 2 m body survives.
pub static BREAKUP_2M: Scenario = Scenario {
    id: "breakup_2m",
    name: "2 m Breakup",
    description: "Vertical 20 km/s entry checked at 20 km altitude.",
    material: MaterialProperties {
        diameter: 2.0,
        density: 3000.0,
        heat_of_ablation: 8.0e6,
        drag_coefficient: 0.5,
        heat_transfer_coefficient: 0.1,
    },
    geometry: EntryGeometry {
        altitude: 20_500.0,
        speed: 20_000.0,
        entry_angle: 90.0,
        heading: 0.0,
        latitude: 0.0,
        longitude: 0.0,
    },
    rotating: false,
    atmosphere_altitude: 20_000.0,
    ablation_scale: 8.0,
    time_step: 0.01,
};

/// Scenario 5: oblique entry over a rotating Earth
///
/// The ground moves under the body during atmospheric flight, shifting
/// the planet-fixed impact longitude.
pub static OBLIQUE_ROTATING: Scenario = Scenario {
    id: "oblique_rotating",
    name: "Oblique Entry, Rotating Earth",
    description: "30° eastbound entry at 18 km/s over 40° N.",
    material: MaterialProperties {
        diameter: 40.0,
        density: 3300.0,
        heat_of_ablation: 8.0e6,
        drag_coefficient: 0.5,
        heat_transfer_coefficient: 0.1,
    },
    geometry: EntryGeometry {
        altitude: 150_000.0,
        speed: 18_000.0,
        entry_angle: 30.0,
        heading: 90.0,
        latitude: 40.0,
        longitude: -75.0,
    },
    rotating: true,
    atmosphere_altitude: 100_000.0,
    ablation_scale: 8.0,
    time_step: 0.05,
};
