//! Core physics types and constants for atmospheric entry simulation.

use bevy::math::DVec3;

// Physical constants (SI units)

/// Gravitational constant (m³·kg⁻¹·s⁻²)
pub const G: f64 = 6.67430e-11;

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians to degrees conversion factor
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Earth mass in kilograms
pub const EARTH_MASS: f64 = 5.972e24;

/// Earth mean radius in meters
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Earth sidereal rotation rate (rad/s)
pub const EARTH_ROTATION_RATE: f64 = 7.292_115e-5;

/// Moon mass in kilograms
pub const MOON_MASS: f64 = 7.342e22;

/// Mean Earth-Moon distance in meters
pub const EARTH_MOON_DISTANCE: f64 = 3.844e8;

/// Energy of one megaton of TNT in joules
pub const MEGATON_TNT_J: f64 = 4.184e15;

/// Instantaneous physical state of the entering body.
///
/// Position and velocity are inertial. Mass and radius only ever
/// decrease once ablation starts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BodyState {
    /// Position in meters (inertial frame)
    pub pos: DVec3,
    /// Velocity in meters per second
    pub vel: DVec3,
    /// Current mass in kilograms
    pub mass: f64,
    /// Current radius in meters
    pub radius: f64,
    /// Cumulative ablation depth in meters
    pub ablation_depth: f64,
}

impl BodyState {
    /// Create a fresh state with no ablation.
    pub fn new(pos: DVec3, vel: DVec3, mass: f64, radius: f64) -> Self {
        Self {
            pos,
            vel,
            mass,
            radius,
            ablation_depth: 0.0,
        }
    }

    /// Speed in m/s
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    /// Cross-sectional area (m²) of the current sphere.
    pub fn cross_section(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }
}

/// Material parameters of the entering body. Immutable for a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialProperties {
    /// Initial diameter (m)
    pub diameter: f64,
    /// Bulk density (kg/m³)
    pub density: f64,
    /// Heat of ablation (J/kg)
    pub heat_of_ablation: f64,
    /// Drag coefficient (dimensionless)
    pub drag_coefficient: f64,
    /// Heat-transfer coefficient (dimensionless)
    pub heat_transfer_coefficient: f64,
}

impl Default for MaterialProperties {
    fn default() -> Self {
        Self {
            diameter: 50.0,
            density: 3000.0, // stony
            heat_of_ablation: 8.0e6,
            drag_coefficient: 0.5,
            heat_transfer_coefficient: 0.1,
        }
    }
}

impl MaterialProperties {
    /// Initial radius (m)
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// Volume of the initial sphere (m³)
    pub fn volume(&self) -> f64 {
        let r = self.radius();
        (4.0 / 3.0) * std::f64::consts::PI * r * r * r
    }

    /// Initial mass (kg)
    pub fn mass(&self) -> f64 {
        self.density * self.volume()
    }
}

/// A gravitating body. Moves kinematically when given a velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MassiveBody {
    /// Mass in kilograms
    pub mass: f64,
    /// Position in meters (inertial frame)
    pub pos: DVec3,
    /// Velocity in meters per second
    pub vel: DVec3,
}

impl MassiveBody {
    pub fn new(mass: f64, pos: DVec3, vel: DVec3) -> Self {
        Self { mass, pos, vel }
    }

    /// A body fixed in place.
    pub fn stationary(mass: f64, pos: DVec3) -> Self {
        Self::new(mass, pos, DVec3::ZERO)
    }

    /// Standard gravitational parameter GM (m³/s²)
    pub fn gm(&self) -> f64 {
        G * self.mass
    }

    /// Advance position by one step of constant velocity.
    #[inline]
    pub fn drift(&mut self, dt: f64) {
        self.pos += self.vel * dt;
    }
}

/// The planet being entered.
///
/// Carries a rotation used for the co-rotating atmosphere and for
/// planet-fixed geolocation. A zero rate gives a static atmosphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetBody {
    /// Gravitating mass, position and velocity
    pub body: MassiveBody,
    /// Mean surface radius (m)
    pub radius: f64,
    /// Angular rotation rate (rad/s)
    pub rotation_rate: f64,
    /// Rotation axis (need not be normalized)
    pub rotation_axis: DVec3,
}

impl Default for TargetBody {
    fn default() -> Self {
        Self::earth()
    }
}

impl TargetBody {
    /// Non-rotating Earth at the origin.
    pub fn earth() -> Self {
        Self {
            body: MassiveBody::stationary(EARTH_MASS, DVec3::ZERO),
            radius: EARTH_RADIUS,
            rotation_rate: 0.0,
            rotation_axis: DVec3::Z,
        }
    }

    /// Earth at the origin spinning at its sidereal rate about +Z.
    pub fn rotating_earth() -> Self {
        Self {
            rotation_rate: EARTH_ROTATION_RATE,
            ..Self::earth()
        }
    }

    /// Angular velocity vector ω (rad/s)
    pub fn angular_velocity(&self) -> DVec3 {
        self.rotation_axis.normalize_or_zero() * self.rotation_rate
    }

    /// Position relative to the planet's center.
    #[inline]
    pub fn relative_position(&self, pos: DVec3) -> DVec3 {
        pos - self.body.pos
    }

    /// Altitude above the mean surface (m). Negative below ground.
    #[inline]
    pub fn altitude(&self, pos: DVec3) -> f64 {
        self.relative_position(pos).length() - self.radius
    }

    /// Gravitational acceleration magnitude at distance `r` from the center.
    pub fn gravity_at(&self, r: f64) -> f64 {
        if r <= 0.0 {
            return 0.0;
        }
        self.body.gm() / (r * r)
    }
}
