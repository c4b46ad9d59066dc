//! Gravity field for the entering body.
//!
//! Two strategies share one interface: a single dominant body (the
//! classical inverse-square law toward the target's center) and a
//! summed N-body field over the target plus any extra bodies.

use bevy::math::DVec3;
use wide::f64x4;

use crate::types::MassiveBody;

/// Separations below this (m²) contribute nothing.
///
/// 1 m from a planet's center is never a physical configuration, so
/// this only guards the division.
const MIN_SEPARATION_SQUARED: f64 = 1.0;

/// Which bodies pull on the entering body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GravityModel {
    /// Only the first body (the target) attracts.
    #[default]
    Central,
    /// Every body in the slice attracts.
    NBody,
}

impl GravityModel {
    /// Acceleration (m/s²) at `pos` from `bodies`.
    ///
    /// `bodies[0]` must be the target body; `Central` ignores the rest.
    #[inline]
    pub fn acceleration(&self, pos: DVec3, bodies: &[MassiveBody]) -> DVec3 {
        match self {
            GravityModel::Central => bodies
                .first()
                .map_or(DVec3::ZERO, |body| point_mass_acceleration(pos, body)),
            GravityModel::NBody => summed_acceleration(pos, bodies),
        }
    }
}

/// Inverse-square acceleration toward a single body.
///
/// Returns zero at (near) zero separation.
#[inline]
pub fn point_mass_acceleration(pos: DVec3, body: &MassiveBody) -> DVec3 {
    let delta = body.pos - pos;
    let r_squared = delta.length_squared();
    if r_squared <= MIN_SEPARATION_SQUARED {
        return DVec3::ZERO;
    }
    let r = r_squared.sqrt();
    // a = GM/r² along delta/r
    delta * (body.gm() / (r_squared * r))
}

/// Sum of `G·m·(body − pos)/|body − pos|³` over all bodies.
///
/// Bodies are processed four at a time in f64x4 lanes. Lanes for
/// degenerate separations and padding carry GM = 0 and r² = 1 so they
/// add exactly nothing.
pub fn summed_acceleration(pos: DVec3, bodies: &[MassiveBody]) -> DVec3 {
    let mut acc = DVec3::ZERO;

    for chunk in bodies.chunks(4) {
        let mut dx = [0.0; 4];
        let mut dy = [0.0; 4];
        let mut dz = [0.0; 4];
        let mut gm = [0.0; 4];
        let mut r2 = [1.0; 4];

        for (lane, body) in chunk.iter().enumerate() {
            let delta = body.pos - pos;
            let len_sq = delta.length_squared();
            if len_sq > MIN_SEPARATION_SQUARED {
                dx[lane] = delta.x;
                dy[lane] = delta.y;
                dz[lane] = delta.z;
                gm[lane] = body.gm();
                r2[lane] = len_sq;
            }
        }

        let r2 = f64x4::new(r2);
        let scale = f64x4::new(gm) / (r2 * r2.sqrt());

        let ax = (f64x4::new(dx) * scale).to_array();
        let ay = (f64x4::new(dy) * scale).to_array();
        let az = (f64x4::new(dz) * scale).to_array();

        acc += DVec3::new(
            ax[0] + ax[1] + ax[2] + ax[3],
            ay[0] + ay[1] + ay[2] + ay[3],
            az[0] + az[1] + az[2] + az[3],
        );
    }

    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EARTH_MASS, EARTH_MOON_DISTANCE, EARTH_RADIUS, G, MOON_MASS};
    use approx::assert_relative_eq;

    fn earth() -> MassiveBody {
        MassiveBody::stationary(EARTH_MASS, DVec3::ZERO)
    }

    #[test]
    fn test_surface_acceleration_points_down() {
        let pos = DVec3::new(0.0, EARTH_RADIUS, 0.0);
        let acc = GravityModel::Central.acceleration(pos, &[earth()]);

        assert!(acc.y < 0.0, "gravity should point at the center");
        assert_relative_eq!(acc.x, 0.0);
        assert_relative_eq!(acc.length(), G * EARTH_MASS / (EARTH_RADIUS * EARTH_RADIUS), max_relative = 1e-12);
    }

    #[test]
    fn test_inverse_square_scaling() {
        let near = point_mass_acceleration(DVec3::new(EARTH_RADIUS, 0.0, 0.0), &earth());
        let far = point_mass_acceleration(DVec3::new(2.0 * EARTH_RADIUS, 0.0, 0.0), &earth());
        assert_relative_eq!(near.length() / far.length(), 4.0, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_separation_is_zero() {
        let acc = GravityModel::Central.acceleration(DVec3::ZERO, &[earth()]);
        assert_eq!(acc, DVec3::ZERO);

        let acc = GravityModel::NBody.acceleration(DVec3::ZERO, &[earth()]);
        assert_eq!(acc, DVec3::ZERO);
        assert!(acc.is_finite());
    }

    #[test]
    fn test_no_bodies_is_zero() {
        assert_eq!(GravityModel::Central.acceleration(DVec3::X, &[]), DVec3::ZERO);
        assert_eq!(GravityModel::NBody.acceleration(DVec3::X, &[]), DVec3::ZERO);
    }

    #[test]
    fn test_single_body_models_agree() {
        let pos = DVec3::new(EARTH_RADIUS + 80_000.0, 1.0e5, -3.0e5);
        let central = GravityModel::Central.acceleration(pos, &[earth()]);
        let nbody = GravityModel::NBody.acceleration(pos, &[earth()]);
        assert_relative_eq!(central.x, nbody.x, max_relative = 1e-12);
        assert_relative_eq!(central.y, nbody.y, max_relative = 1e-12);
        assert_relative_eq!(central.z, nbody.z, max_relative = 1e-12);
    }

    #[test]
    fn test_central_ignores_extra_bodies() {
        let moon = MassiveBody::stationary(MOON_MASS, DVec3::new(EARTH_MOON_DISTANCE, 0.0, 0.0));
        let pos = DVec3::new(0.0, EARTH_RADIUS + 100_000.0, 0.0);

        let central = GravityModel::Central.acceleration(pos, &[earth(), moon]);
        let earth_only = GravityModel::Central.acceleration(pos, &[earth()]);
        assert_eq!(central, earth_only);

        let nbody = GravityModel::NBody.acceleration(pos, &[earth(), moon]);
        // The Moon pulls toward +x
        assert!(nbody.x > central.x);
    }

    #[test]
    fn test_simd_sum_matches_scalar_over_many_bodies() {
        // Nine bodies spans three f64x4 chunks including padding lanes
        let bodies: Vec<MassiveBody> = (0..9)
            .map(|i| {
                let angle = i as f64 * 0.7;
                let r = 1.0e7 * (1.0 + i as f64);
                MassiveBody::stationary(
                    1.0e20 * (i as f64 + 1.0),
                    DVec3::new(r * angle.cos(), r * angle.sin(), 1.0e6 * i as f64),
                )
            })
            .collect();
        let pos = DVec3::new(3.0e6, -2.0e6, 5.0e5);

        let scalar: DVec3 = bodies
            .iter()
            .map(|body| point_mass_acceleration(pos, body))
            .sum();
        let simd = summed_acceleration(pos, &bodies);

        assert_relative_eq!(simd.x, scalar.x, max_relative = 1e-12);
        assert_relative_eq!(simd.y, scalar.y, max_relative = 1e-12);
        assert_relative_eq!(simd.z, scalar.z, max_relative = 1e-12);
    }
}
