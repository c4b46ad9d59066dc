//! Aerodynamic drag against a co-rotating atmosphere.
//!
//! a = -½ ρ C_D A |v_rel| v_rel / m
//!
//! where v_rel is the body's velocity relative to the local air, which
//! moves rigidly with the planet: v_air = v_planet + ω × r.

use bevy::math::DVec3;

use crate::types::TargetBody;

/// Velocity of the atmosphere at `pos` (inertial frame).
#[inline]
pub fn atmosphere_velocity(pos: DVec3, target: &TargetBody) -> DVec3 {
    let r = target.relative_position(pos);
    target.body.vel + target.angular_velocity().cross(r)
}

/// Body velocity relative to the surrounding air.
#[inline]
pub fn relative_velocity(pos: DVec3, vel: DVec3, target: &TargetBody) -> DVec3 {
    vel - atmosphere_velocity(pos, target)
}

/// Quadratic drag acceleration (m/s²) opposing `v_rel`.
///
/// Zero when the air is still relative to the body, when there is no
/// air, or when the mass is not positive.
pub fn drag_acceleration(
    v_rel: DVec3,
    air_density: f64,
    drag_coefficient: f64,
    area: f64,
    mass: f64,
) -> DVec3 {
    let speed = v_rel.length();
    if speed <= 0.0 || air_density <= 0.0 || mass <= 0.0 {
        return DVec3::ZERO;
    }
    v_rel * (-0.5 * drag_coefficient * air_density * area * speed / mass)
}

/// Ram pressure ½ρv² (Pa)
#[inline]
pub fn ram_pressure(air_density: f64, speed: f64) -> f64 {
    0.5 * air_density * speed * speed
}
