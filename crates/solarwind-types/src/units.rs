// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Units
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Working units of the package, expressed as the factor that converts a
//! working-unit value into SI.
//!
//! Formulas multiply their inputs by these factors, combine them with the
//! SI constants and divide the result by the output factor. Public methods
//! never return raw SI.

use crate::constants::M_PROTON;
use crate::error::{SolarWindError, SwResult};

/// Magnetic field: nT.
pub const B: f64 = 1e-9;
/// Bulk and differential velocity: km/s.
pub const V: f64 = 1e3;
/// Thermal speed: km/s.
pub const W: f64 = 1e3;
/// Sound and Alfvén speeds: km/s.
pub const CA: f64 = 1e3;
pub const CS: f64 = 1e3;
/// Number density: cm⁻³.
pub const N: f64 = 1e6;
/// Mass density: proton masses per cm³.
pub const RHO: f64 = 1e6 * M_PROTON;
/// Temperature: 10⁵ K.
pub const TEMPERATURE: f64 = 1e5;
/// Thermal, magnetic and dynamic pressure: pPa.
pub const PRESSURE: f64 = 1e-12;
/// Heliocentric distance: km.
pub const DISTANCE2SUN: f64 = 1e3;
/// Collision frequency: s⁻¹.
pub const NUC: f64 = 1.0;
/// Coulomb number: dimensionless.
pub const NC: f64 = 1.0;
/// Parallel heat flux: µW m⁻².
pub const QPAR: f64 = 1e-6;
/// Specific entropy: SI (Pa (kg m⁻³)^(-5/3)).
pub const SPECIFIC_ENTROPY: f64 = 1.0;
/// Plasma beta, anisotropy: dimensionless.
pub const DIMENSIONLESS: f64 = 1.0;

/// Scale factor for a measurement code as it appears in the M level.
pub fn scale(measurement: &str) -> SwResult<f64> {
    let factor = match measurement {
        "b" => B,
        "v" | "dv" => V,
        "w" => W,
        "ca" => CA,
        "cs" => CS,
        "n" => N,
        "rho" => RHO,
        "T" | "temperature" => TEMPERATURE,
        "pth" | "pb" | "pdynamic" => PRESSURE,
        "distance2sun" => DISTANCE2SUN,
        "nuc" => NUC,
        "nc" => NC,
        "qpar" => QPAR,
        "specific_entropy" => SPECIFIC_ENTROPY,
        "beta" | "ani" | "afsq" => DIMENSIONLESS,
        other => {
            return Err(SolarWindError::SchemaViolation(format!(
                "No working unit registered for measurement '{other}'"
            )))
        }
    };
    Ok(factor)
}
