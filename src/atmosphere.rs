//! Piecewise standard-atmosphere model.
//!
//! Three regimes keyed on altitude above the target surface:
//! - troposphere (h ≤ 11 km): linear temperature lapse
//! - lower stratosphere (11 km < h ≤ 25 km): isothermal
//! - upper stratosphere (h > 25 km): linear warming
//!
//! The pressure fits do not meet exactly at 25 km. That step is part of
//! the model and is kept as-is.
//!
//! All functions take altitude in meters and are pure.

/// Top of the troposphere (m)
pub const TROPOPAUSE_ALTITUDE: f64 = 11_000.0;

/// Top of the isothermal lower stratosphere (m)
pub const LOWER_STRATOSPHERE_TOP: f64 = 25_000.0;

/// Above this altitude density is reported as exactly zero (m).
pub const DENSITY_CEILING: f64 = 100_000.0;

/// Specific gas constant for dry air (J/(kg·K))
pub const R_SPECIFIC_AIR: f64 = 287.0;

/// Celsius to Kelvin offset used for density.
const KELVIN_OFFSET: f64 = 273.15;

/// Celsius to Kelvin offset baked into the pressure fits.
const PRESSURE_FIT_OFFSET: f64 = 273.1;

/// Isothermal lower-stratosphere temperature (°C)
const STRATOSPHERE_TEMPERATURE: f64 = -56.46;

/// Atmospheric regime at a given altitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Troposphere,
    LowerStratosphere,
    UpperStratosphere,
}

impl Layer {
    /// Classify an altitude (m).
    #[inline]
    pub fn at(altitude: f64) -> Self {
        if altitude <= TROPOPAUSE_ALTITUDE {
            Layer::Troposphere
        } else if altitude <= LOWER_STRATOSPHERE_TOP {
            Layer::LowerStratosphere
        } else {
            Layer::UpperStratosphere
        }
    }
}

/// Air temperature (°C) at altitude `h` (m).
pub fn temperature(h: f64) -> f64 {
    match Layer::at(h) {
        Layer::Troposphere => 15.04 - 0.00649 * h,
        Layer::LowerStratosphere => STRATOSPHERE_TEMPERATURE,
        Layer::UpperStratosphere => -131.21 + 0.00299 * h,
    }
}

/// Air pressure (kPa) at altitude `h` (m).
pub fn pressure(h: f64) -> f64 {
    let t = temperature(h);
    match Layer::at(h) {
        Layer::Troposphere => 101.29 * ((t + PRESSURE_FIT_OFFSET) / 288.08).powf(5.256),
        Layer::LowerStratosphere => 22.65 * (1.73 - 0.000157 * h).exp(),
        Layer::UpperStratosphere => 2.488 * ((t + PRESSURE_FIT_OFFSET) / 216.6).powf(-11.388),
    }
}

/// Air density (kg/m³) at altitude `h` (m).
///
/// Ideal gas from [`pressure`] and [`temperature`]. Returns 0 above
/// [`DENSITY_CEILING`] so the upper-stratosphere fit is never
/// extrapolated into space.
pub fn density(h: f64) -> f64 {
    if h > DENSITY_CEILING {
        return 0.0;
    }
    let p_pa = pressure(h) * 1000.0;
    let t_k = temperature(h) + KELVIN_OFFSET;
    if t_k <= 0.0 {
        return 0.0;
    }
    p_pa / (R_SPECIFIC_AIR * t_k)
}
