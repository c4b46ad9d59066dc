//! Force and mass-loss models for the entering body.
//!
//! Everything here is a pure function of its explicit arguments; the
//! stepping loop that couples them lives in [`crate::simulation`].

pub mod ablation;
pub mod aero;
pub mod gravity;
pub mod integrator;

#[cfg(test)]
mod proptest_physics;

pub use ablation::{
    AblationParams, AblationStep, BreakupAssessment, ablation_rate, ablation_step,
    angle_of_inclination, assess_breakup, critical_radius, surface_stress,
};
pub use aero::{drag_acceleration, relative_velocity};
pub use gravity::GravityModel;
pub use integrator::semi_implicit_euler;
