//! # boreas-vpd
//!
//! Vapor pressure deficit (VPD) derivation from air temperature and
//! relative humidity grids.
//!
//! The saturation vapor pressure follows the Clausius-Clapeyron relation
//! integrated from 0 degrees C with constant latent heat:
//!
//! ```text
//! esat = 611 * exp(L_VAP / R_V * (1/273.15 - 1/T))      [Pa]
//! ea   = rh / 100 * esat                                 [Pa]
//! vpd  = max((esat - ea) / 1000, 0)                      [kPa]
//! ```
//!
//! NaN in either input propagates to NaN output; rounding below zero is
//! clamped to zero (saturated air has no deficit). The result is in kPa.

mod error;

use boreas_grid::Grid;

pub use error::VpdError;

/// Latent heat of vaporization of water, J/kg.
pub const L_VAP: f64 = 2.5e6;

/// Specific gas constant of water vapor, J/(kg K).
pub const R_V: f64 = 461.0;

/// Saturation vapor pressure in Pa at temperature `t_kelvin`.
pub fn saturation_vapor_pressure(t_kelvin: f64) -> f64 {
    611.0 * (L_VAP / R_V * (1.0 / 273.15 - 1.0 / t_kelvin)).exp()
}

/// VPD in kPa for one temperature (K) / relative humidity (%) pair.
///
/// Returns NaN if either input is NaN; otherwise clamped non-negative.
pub fn vpd_kpa(t_kelvin: f64, relhum_pct: f64) -> f64 {
    if t_kelvin.is_nan() || relhum_pct.is_nan() {
        return f64::NAN;
    }
    let esat = saturation_vapor_pressure(t_kelvin);
    let ea = relhum_pct / 100.0 * esat;
    ((esat - ea) / 1000.0).max(0.0)
}

/// Derives a VPD grid (kPa) from temperature (K) and relative humidity (%)
/// grids of identical shape.
///
/// The output inherits the temperature grid's coordinates and time axis.
///
/// # Errors
///
/// Returns [`VpdError::ShapeMismatch`] if the two grids disagree in any
/// dimension.
pub fn derive_vpd(temperature: &Grid, relhum: &Grid) -> Result<Grid, VpdError> {
    for (name, expected, got) in [
        ("time", temperature.n_time(), relhum.n_time()),
        ("lat", temperature.n_lat(), relhum.n_lat()),
        ("lon", temperature.n_lon(), relhum.n_lon()),
    ] {
        if expected != got {
            return Err(VpdError::ShapeMismatch {
                name: name.to_string(),
                expected,
                got,
            });
        }
    }

    let data: Vec<f64> = temperature
        .data()
        .iter()
        .zip(relhum.data().iter())
        .map(|(&t, &rh)| vpd_kpa(t, rh))
        .collect();

    // Same shape and coordinates as the validated temperature grid.
    Ok(Grid::new(
        data,
        temperature.time().clone(),
        temperature.lat().to_vec(),
        temperature.lon().to_vec(),
    )
    .expect("output grid mirrors the temperature grid"))
}
