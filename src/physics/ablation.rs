//! Ablation (mass loss) and structural breakup.
//!
//! The body is treated as a sphere that loses a shell of thickness `a`
//! (the ablation depth) to aerodynamic heating:
//!
//! - da/dt = ρ_air · C_H · |v_rel|³ / (k · ρ_body · ξ)
//! - dm/da = -4π · ρ_body · (R0 - a)²
//!
//! `k` is the ablation scale factor. Calibrations in use disagree on its
//! value (2 vs 8), so it is a configuration parameter.
//!
//! Breakup is decided once, at atmosphere entry, by comparing the
//! current radius against a critical radius derived from surface
//! stress, local gravity, body density and entry angle.

use bevy::math::DVec3;

use crate::physics::aero::ram_pressure;
use crate::types::MaterialProperties;

/// Reference ablation scale factor `k`.
pub const DEFAULT_ABLATION_SCALE: f64 = 8.0;

/// Reference stress (Pa) the critical radius is normalized against.
pub const REFERENCE_STRESS: f64 = 1.0e5;

/// Strength-to-density factor in the critical radius fit (kg/m³).
pub const STRENGTH_DENSITY_FACTOR: f64 = 0.4;

/// Standard gravity the critical radius fit is normalized against (m/s²).
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Overall scale of the critical radius fit (m).
pub const CRITICAL_RADIUS_SCALE: f64 = 100.0;

/// Lower bound on the entry angle used for breakup (rad).
pub const DEFAULT_MIN_ENTRY_ANGLE: f64 = 0.01;

/// Floors and scale shared by every ablation step in a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AblationParams {
    /// Ablation scale factor `k`
    pub scale: f64,
    /// Smallest radius the body may shrink to (m)
    pub radius_floor: f64,
    /// Smallest mass the body may shrink to (kg)
    pub mass_floor: f64,
}

impl Default for AblationParams {
    fn default() -> Self {
        Self {
            scale: DEFAULT_ABLATION_SCALE,
            radius_floor: 0.1,
            mass_floor: 1.0,
        }
    }
}

/// Result of a single ablation step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AblationStep {
    /// Ablation depth removed this step (m)
    pub depth: f64,
    /// Mass removed this step (kg), non-negative
    pub mass_lost: f64,
    /// Radius after the step (m)
    pub radius: f64,
    /// Mass after the step (kg)
    pub mass: f64,
}

impl AblationStep {
    /// Whether the body has burned down to a floor.
    pub fn is_complete(&self, params: &AblationParams) -> bool {
        is_fully_ablated(self.radius, self.mass, params)
    }
}

/// Ablation rate da/dt (m/s).
///
/// Zero when there is no air, no relative motion, or no time spent in
/// the atmosphere yet.
pub fn ablation_rate(
    air_density: f64,
    relative_speed: f64,
    material: &MaterialProperties,
    scale: f64,
    time_in_atmosphere: f64,
) -> f64 {
    if time_in_atmosphere <= 0.0 || air_density <= 0.0 || relative_speed <= 0.0 {
        return 0.0;
    }
    let denominator = scale * material.density * material.heat_of_ablation;
    if denominator <= 0.0 {
        return 0.0;
    }
    air_density * material.heat_transfer_coefficient * relative_speed.powi(3) / denominator
}

/// Mass change per unit ablation depth dm/da (kg/m) at cumulative depth `a`.
///
/// Zero once the shell has consumed the whole initial radius.
pub fn mass_per_depth(depth: f64, material: &MaterialProperties) -> f64 {
    let effective_radius = material.radius() - depth;
    if effective_radius <= 0.0 {
        return 0.0;
    }
    -4.0 * std::f64::consts::PI * material.density * effective_radius * effective_radius
}

/// Advance ablation by one step of length `dt`.
///
/// Updates `ablation_depth` in place and returns the new radius and mass,
/// both clamped at their floors. Neither can increase.
pub fn ablation_step(
    ablation_depth: &mut f64,
    radius: f64,
    mass: f64,
    rate: f64,
    dt: f64,
    material: &MaterialProperties,
    params: &AblationParams,
) -> AblationStep {
    let depth = (rate * dt).max(0.0);
    *ablation_depth += depth;

    let dm = mass_per_depth(*ablation_depth, material) * depth;

    let new_radius = (material.radius() - *ablation_depth)
        .max(params.radius_floor)
        .min(radius);
    let new_mass = (mass + dm).max(params.mass_floor).min(mass);

    AblationStep {
        depth,
        mass_lost: mass - new_mass,
        radius: new_radius,
        mass: new_mass,
    }
}

/// Ablation ends once radius or mass reaches its floor.
#[inline]
pub fn is_fully_ablated(radius: f64, mass: f64, params: &AblationParams) -> bool {
    radius <= params.radius_floor || mass <= params.mass_floor
}

/// Angle between the velocity and the local horizontal (rad).
///
/// Negative while descending. Zero for zero-length inputs.
pub fn angle_of_inclination(relative_pos: DVec3, vel: DVec3) -> f64 {
    let pos_mag = relative_pos.length();
    let vel_mag = vel.length();
    if pos_mag == 0.0 || vel_mag == 0.0 {
        return 0.0;
    }
    let cos_angle = (relative_pos.dot(vel) / (pos_mag * vel_mag)).clamp(-1.0, 1.0);
    std::f64::consts::FRAC_PI_2 - cos_angle.acos()
}

/// Stress on the body surface (Pa): ram pressure plus self-weight.
pub fn surface_stress(
    air_density: f64,
    relative_speed: f64,
    mass: f64,
    radius: f64,
    gravity: f64,
) -> f64 {
    let ram = ram_pressure(air_density, relative_speed);
    let area = std::f64::consts::PI * radius * radius;
    let weight = if area > 0.0 { mass * gravity / area } else { 0.0 };
    ram + weight
}

/// Critical radius (m) below which the body is expected to fragment.
///
/// `entry_angle` is clamped to at least `min_entry_angle` in magnitude
/// so grazing entries do not collapse the estimate to zero.
pub fn critical_radius(
    stress: f64,
    gravity: f64,
    body_density: f64,
    entry_angle: f64,
    min_entry_angle: f64,
) -> f64 {
    if gravity <= 0.0 || body_density <= 0.0 {
        return 0.0;
    }
    let theta = entry_angle.abs().max(min_entry_angle);
    CRITICAL_RADIUS_SCALE
        * (stress / REFERENCE_STRESS)
        * (STRENGTH_DENSITY_FACTOR / body_density)
        * (STANDARD_GRAVITY / gravity)
        * (theta.sin() * std::f64::consts::SQRT_2)
}

/// Breakup assessment made at atmosphere entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BreakupAssessment {
    /// Surface stress at entry (Pa)
    pub stress: f64,
    /// Critical radius (m)
    pub critical_radius: f64,
    /// Radius at entry (m)
    pub radius: f64,
    /// Whether the body disintegrates
    pub breaks_up: bool,
}

/// Decide whether a body disintegrates on entry.
///
/// Only bodies smaller than `size_threshold` can break up; larger ones
/// are exempt regardless of the critical radius.
pub fn assess_breakup(
    radius: f64,
    critical_radius: f64,
    stress: f64,
    size_threshold: f64,
) -> BreakupAssessment {
    BreakupAssessment {
        stress,
        critical_radius,
        radius,
        breaks_up: radius <= critical_radius && radius < size_threshold,
    }
}
