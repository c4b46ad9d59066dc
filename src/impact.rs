//! Surface impact resolution and geolocation.
//!
//! The integrator only notices an impact after a step has already carried
//! the body below the surface. The crossing is recovered by solving
//!
//! |p0 + τ·(p1 − p0)| = R,   τ ∈ [0, 1]
//!
//! for the entering root, then the refined position is mapped to
//! latitude/longitude both in the inertial frame and in the planet-fixed
//! frame (which has rotated by ω·t since t = 0).

use bevy::math::DVec3;

use crate::types::{MEGATON_TNT_J, RAD_TO_DEG, TargetBody};

/// Fraction of the last step at which the segment `p0 → p1` enters a
/// sphere of `radius` centered on the origin.
///
/// Positions are relative to the sphere's center. Falls back to 1 (the
/// end of the step) when the segment never reaches the sphere, and to 0
/// when it already starts inside.
pub fn crossing_fraction(p0: DVec3, p1: DVec3, radius: f64) -> f64 {
    let d = p1 - p0;
    let a = d.length_squared();
    let c = p0.length_squared() - radius * radius;

    if c <= 0.0 {
        return 0.0;
    }
    if a <= 0.0 {
        return 1.0;
    }

    let b = 2.0 * p0.dot(d);
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return 1.0;
    }

    // Smaller root is where the segment first meets the sphere
    let tau = (-b - discriminant.sqrt()) / (2.0 * a);
    tau.clamp(0.0, 1.0)
}

/// Orthonormal planet-fixed basis at t = 0.
///
/// `pole` is the rotation axis. The prime meridian is the inertial +X
/// direction projected onto the equator (+Y if the axis lies along X).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanetFrame {
    pub meridian: DVec3,
    pub east: DVec3,
    pub pole: DVec3,
}

impl PlanetFrame {
    /// Frame for a rotation axis. A zero axis falls back to +Z.
    pub fn from_axis(axis: DVec3) -> Self {
        let pole = axis.try_normalize().unwrap_or(DVec3::Z);

        let reference = if pole.cross(DVec3::X).length_squared() > 1e-12 {
            DVec3::X
        } else {
            DVec3::Y
        };
        let meridian = (reference - pole * reference.dot(pole)).normalize();
        let east = pole.cross(meridian);

        Self {
            meridian,
            east,
            pole,
        }
    }

    /// Latitude and longitude (degrees) of a center-relative position,
    /// measured in this frame without rotation.
    pub fn lat_lon(&self, relative_pos: DVec3) -> (f64, f64) {
        let r = relative_pos.length();
        if r == 0.0 {
            return (0.0, 0.0);
        }
        let z = relative_pos.dot(self.pole);
        let x = relative_pos.dot(self.meridian);
        let y = relative_pos.dot(self.east);

        let lat = (z / r).clamp(-1.0, 1.0).asin() * RAD_TO_DEG;
        let lon = y.atan2(x) * RAD_TO_DEG;
        (lat, lon)
    }

    /// Center-relative position at `radius` for a latitude/longitude (degrees).
    pub fn position_at(&self, lat_deg: f64, lon_deg: f64, radius: f64) -> DVec3 {
        let lat = lat_deg.to_radians();
        let lon = lon_deg.to_radians();
        (self.meridian * (lat.cos() * lon.cos())
            + self.east * (lat.cos() * lon.sin())
            + self.pole * lat.sin())
            * radius
    }
}

/// Wrap an angle in degrees to [-180, 180].
pub fn normalize_longitude(lon_deg: f64) -> f64 {
    let wrapped = (lon_deg + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && lon_deg > 0.0 { 180.0 } else { wrapped }
}

/// Kinetic energy in megatons of TNT.
#[inline]
pub fn joules_to_megatons(energy_j: f64) -> f64 {
    energy_j / MEGATON_TNT_J
}

/// Geographic location of an impact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoLocation {
    /// Latitude (degrees), identical in both frames
    pub latitude: f64,
    /// Longitude in the inertial frame (degrees)
    pub inertial_longitude: f64,
    /// Longitude in the planet-fixed frame (degrees)
    pub longitude: f64,
}

/// Locate `relative_pos` at time `t` (seconds since epoch).
pub fn geolocate(relative_pos: DVec3, t: f64, target: &TargetBody) -> GeoLocation {
    let frame = PlanetFrame::from_axis(target.rotation_axis);
    let (latitude, inertial_longitude) = frame.lat_lon(relative_pos);
    let rotated = target.rotation_rate * t * RAD_TO_DEG;

    GeoLocation {
        latitude,
        inertial_longitude,
        longitude: normalize_longitude(inertial_longitude - rotated),
    }
}

/// Everything known about a surface impact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactReport {
    /// Time of surface contact (s)
    pub time: f64,
    /// Refined inertial position at contact (m)
    pub position: DVec3,
    /// Velocity at contact (m/s)
    pub velocity: DVec3,
    /// Where on the planet the body lands
    pub location: GeoLocation,
    /// Longitude swept under the body by rotation while in the atmosphere (degrees)
    pub rotation_drift_deg: f64,
    /// Ground distance of that sweep along the impact parallel (m)
    pub rotation_drift_m: f64,
    /// Kinetic energy at contact (J)
    pub energy_j: f64,
    /// Kinetic energy at contact (Mt TNT)
    pub energy_mt: f64,
}

impl ImpactReport {
    /// Impact speed in km/s
    pub fn speed_km_s(&self) -> f64 {
        self.velocity.length() / 1000.0
    }
}

/// Refine the last step and build the impact report.
///
/// `prev_*` and `curr_*` are inertial states at the start and end of the
/// step that crossed the surface; the target center is taken at the end
/// of the step. `entry_time` is when the body crossed the atmosphere
/// boundary, or `None` if it never did.
pub fn resolve_impact(
    prev_pos: DVec3,
    prev_vel: DVec3,
    curr_pos: DVec3,
    curr_vel: DVec3,
    prev_time: f64,
    dt: f64,
    mass: f64,
    entry_time: Option<f64>,
    target: &TargetBody,
) -> ImpactReport {
    let p0 = target.relative_position(prev_pos);
    let p1 = target.relative_position(curr_pos);
    let tau = crossing_fraction(p0, p1, target.radius);

    let relative = p0 + (p1 - p0) * tau;
    let velocity = prev_vel + (curr_vel - prev_vel) * tau;
    let time = prev_time + tau * dt;

    let location = geolocate(relative, time, target);

    let transit = entry_time.map_or(0.0, |entry| (time - entry).max(0.0));
    let rotation_drift_rad = target.rotation_rate * transit;
    let rotation_drift_m =
        rotation_drift_rad.abs() * target.radius * location.latitude.to_radians().cos();

    let energy_j = 0.5 * mass * velocity.length_squared();

    ImpactReport {
        time,
        position: target.body.pos + relative,
        velocity,
        location,
        rotation_drift_deg: rotation_drift_rad * RAD_TO_DEG,
        rotation_drift_m,
        energy_j,
        energy_mt: joules_to_megatons(energy_j),
    }
}
