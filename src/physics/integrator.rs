//! Fixed-step integrator for entry trajectories.
//!
//! Semi-implicit (symplectic) Euler: the velocity is updated first and the
//! new velocity moves the position.
//!
//! ```text
//! v_{n+1} = v_n + a_n · Δt
//! x_{n+1} = x_n + v_{n+1} · Δt
//! ```
//!
//! First order, one force evaluation per step. Runs are compared
//! step-for-step, so the scheme is fixed rather than configurable.

use bevy::math::DVec3;

/// Advance position and velocity by one step under constant acceleration.
///
/// Returns `(pos, vel)` at the end of the step.
#[inline]
pub fn semi_implicit_euler(pos: DVec3, vel: DVec3, acc: DVec3, dt: f64) -> (DVec3, DVec3) {
    let vel_new = vel + acc * dt;
    let pos_new = pos + vel_new * dt;
    (pos_new, vel_new)
}

// =============================================================================
// Tests
// =============================================================================
