//! Property-based tests for the entry physics using proptest.
//!
//! These tests check physical invariants across a wide range of
//! altitudes, body sizes and entry speeds.

use bevy::math::DVec3;
use proptest::prelude::*;

use crate::atmosphere;
use crate::impact::crossing_fraction;
use crate::physics::ablation::{AblationParams, ablation_rate, ablation_step};
use crate::physics::aero::drag_acceleration;
use crate::physics::gravity::GravityModel;
use crate::simulation::{FlightPhase, Simulation};
use crate::test_utils::{assertions, fixtures};
use crate::types::{EARTH_RADIUS, MassiveBody, MaterialProperties, TargetBody};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Density is never negative and vanishes above the ceiling.
    #[test]
    fn prop_density_non_negative(h in -500.0f64..300_000.0) {
        let rho = atmosphere::density(h);
        prop_assert!(rho.is_finite());
        prop_assert!(rho >= 0.0, "density {} at {} m", rho, h);
        if h > atmosphere::DENSITY_CEILING {
            prop_assert_eq!(rho, 0.0);
        }
    }

    /// Air thins with height inside the troposphere.
    #[test]
    fn prop_troposphere_density_decreases(h in 0.0f64..10_900.0, dh in 1.0f64..100.0) {
        prop_assert!(atmosphere::density(h + dh) < atmosphere::density(h));
    }

    /// |a|·r² is the target's GM at every distance.
    #[test]
    fn prop_inverse_square(
        scale in 1.0f64..20.0,
        theta in 0.0f64..std::f64::consts::TAU,
        z in -0.9f64..0.9,
    ) {
        let target = TargetBody::earth();
        let r = EARTH_RADIUS * scale;
        let dir = DVec3::new((1.0 - z * z).sqrt() * theta.cos(), (1.0 - z * z).sqrt() * theta.sin(), z);
        let acc = GravityModel::Central.acceleration(dir * r, &[target.body]);

        let gm = acc.length() * r * r;
        prop_assert!(((gm - target.body.gm()) / target.body.gm()).abs() < 1e-10);
        // Attractive
        prop_assert!(acc.dot(dir) < 0.0);
    }

    /// The N-body sum is the sum of the single-body pulls.
    #[test]
    fn prop_nbody_superposition(
        m1 in 1.0e18f64..1.0e24,
        m2 in 1.0e18f64..1.0e24,
        x in 1.0e6f64..1.0e8,
    ) {
        let a = MassiveBody::stationary(m1, DVec3::ZERO);
        let b = MassiveBody::stationary(m2, DVec3::new(0.0, 2.0e8, 0.0));
        let pos = DVec3::new(x, 1.0e7, -3.0e6);

        let both = GravityModel::NBody.acceleration(pos, &[a, b]);
        let separate = GravityModel::Central.acceleration(pos, &[a])
            + GravityModel::Central.acceleration(pos, &[b]);
        prop_assert!((both - separate).length() <= 1e-12 * separate.length());
    }

    /// Drag never adds energy relative to the air.
    #[test]
    fn prop_drag_opposes_motion(
        vx in -30_000.0f64..30_000.0,
        vy in -30_000.0f64..30_000.0,
        rho in 0.0f64..1.3,
        mass in 1.0f64..1.0e9,
    ) {
        let v_rel = DVec3::new(vx, vy, 0.0);
        let acc = drag_acceleration(v_rel, rho, 0.5, 100.0, mass);
        prop_assert!(acc.dot(v_rel) <= 0.0);
    }

    /// An ablation step never grows the body and respects the floors.
    #[test]
    fn prop_ablation_step_shrinks(
        diameter in 0.5f64..200.0,
        rho in 0.0f64..1.3,
        speed in 0.0f64..70_000.0,
        dt in 0.001f64..1.0,
        depth_fraction in 0.0f64..1.2,
    ) {
        let material = fixtures::stony(diameter);
        let params = AblationParams::default();

        let mut depth = material.radius() * depth_fraction;
        let radius = (material.radius() - depth).max(params.radius_floor);
        let mass = material.mass() * 0.5;

        let rate = ablation_rate(rho, speed, &material, params.scale, 1.0);
        let step = ablation_step(&mut depth, radius, mass, rate, dt, &material, &params);

        prop_assert!(step.radius <= radius);
        prop_assert!(step.mass <= mass);
        prop_assert!(step.radius >= params.radius_floor);
        prop_assert!(step.mass >= params.mass_floor.min(mass));
        prop_assert!(step.mass_lost >= 0.0);
    }

    /// The refined crossing lies on the sphere.
    #[test]
    fn prop_crossing_lands_on_surface(
        above in 1.0f64..20_000.0,
        below in 1.0f64..20_000.0,
        lateral in -5_000.0f64..5_000.0,
    ) {
        let p0 = DVec3::new(EARTH_RADIUS + above, 0.0, 0.0);
        let p1 = DVec3::new(EARTH_RADIUS - below, lateral, 0.0);

        let tau = crossing_fraction(p0, p1, EARTH_RADIUS);
        prop_assert!((0.0..=1.0).contains(&tau));

        let hit = p0 + (p1 - p0) * tau;
        prop_assert!((hit.length() - EARTH_RADIUS).abs() < 1e-3);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Mass and radius never increase over a whole run.
    #[test]
    fn prop_run_mass_radius_monotone(
        diameter in 1.0f64..60.0,
        speed in 11_000.0f64..40_000.0,
        density in 1_000.0f64..8_000.0,
    ) {
        let material = MaterialProperties {
            diameter,
            density,
            ..Default::default()
        };
        let mut sim = Simulation::new(fixtures::vertical_drop(105_000.0, speed, material)).unwrap();

        let mut masses = vec![sim.state().mass];
        let mut radii = vec![sim.state().radius];
        while sim.step().is_none() {
            masses.push(sim.state().mass);
            radii.push(sim.state().radius);
        }
        masses.push(sim.state().mass);
        radii.push(sim.state().radius);

        assertions::assert_non_increasing(&masses, "mass");
        assertions::assert_non_increasing(&radii, "radius");
        prop_assert_eq!(sim.phase(), FlightPhase::Terminated);
        prop_assert!(!sim.outcome().unwrap().is_exhausted());
    }
}
