// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Alfvénic Turbulence
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Elsasser decomposition of velocity and magnetic fluctuations.
//!
//! B is converted to Alfvén units, b = B/sqrt(μ0 ρ) in km/s, before the
//! trailing rolling mean is removed from both fields. With δv and δb the
//! fluctuations:
//!
//!   z± = δv ± δb,   e± = |z±|²/2
//!   E_v = |δv|²/2,  E_b = |δb|²/2,  E = E_v + E_b
//!   H_c = δv·δb/2,  σ_c = 2 H_c / E,  σ_r = (E_v − E_b)/E
//!
//! so that e+ − e− = 4 H_c and e+ + e− = 2 E.

use crate::vector::Vector;
use solarwind_math::rolling::fluctuations;
use solarwind_types::config::TurbulenceConfig;
use solarwind_types::constants::MU0;
use solarwind_types::error::{SolarWindError, SwResult};
use solarwind_types::table::Series;
use solarwind_types::units;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct AlfvenicTurbulence {
    velocity: Vector,
    bfield: Vector,
    window: usize,
    min_periods: usize,
}

/// Remove the trailing rolling mean from each component.
fn detrend(v: &Vector, window: usize, min_periods: usize) -> SwResult<Vector> {
    Vector::from_components(
        Arc::clone(v.index()),
        fluctuations(v.x(), window, min_periods),
        fluctuations(v.y(), window, min_periods),
        fluctuations(v.z(), window, min_periods),
    )
}

impl AlfvenicTurbulence {
    /// Build from bulk velocity (km/s), B (nT) and mass density
    /// (m_p cm⁻³), all on the same index.
    pub fn new(
        velocity: &Vector,
        bfield: &Vector,
        rho: &Series,
        config: &TurbulenceConfig,
    ) -> SwResult<Self> {
        if config.window == 0 {
            return Err(SolarWindError::SchemaViolation(
                "rolling window must be at least 1".to_string(),
            ));
        }
        let min_periods = config.effective_min_periods();

        let to_alfven_units = rho.map(|r| units::B / (MU0 * r * units::RHO).sqrt() / units::CA);
        let b_alfven = bfield.scale_rows(&to_alfven_units)?;

        debug!(
            window = config.window,
            min_periods,
            rows = velocity.index().len(),
            "building Alfvénic turbulence"
        );

        Ok(AlfvenicTurbulence {
            velocity: detrend(velocity, config.window, min_periods)?,
            bfield: detrend(&b_alfven, config.window, min_periods)?,
            window: config.window,
            min_periods,
        })
    }

    /// Velocity fluctuations δv, km/s.
    pub fn velocity(&self) -> &Vector {
        &self.velocity
    }

    /// Magnetic fluctuations δb in Alfvén units, km/s.
    pub fn bfield(&self) -> &Vector {
        &self.bfield
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn min_periods(&self) -> usize {
        self.min_periods
    }

    pub fn z_plus(&self) -> SwResult<Vector> {
        self.velocity.try_add(&self.bfield)
    }

    pub fn z_minus(&self) -> SwResult<Vector> {
        self.velocity.try_sub(&self.bfield)
    }

    fn half_square(v: &Vector) -> Series {
        v.magnitude().map(|m| 0.5 * m * m)
    }

    pub fn e_plus(&self) -> SwResult<Series> {
        Ok(Self::half_square(&self.z_plus()?))
    }

    pub fn e_minus(&self) -> SwResult<Series> {
        Ok(Self::half_square(&self.z_minus()?))
    }

    pub fn kinetic_energy(&self) -> Series {
        Self::half_square(&self.velocity)
    }

    pub fn magnetic_energy(&self) -> Series {
        Self::half_square(&self.bfield)
    }

    pub fn total_energy(&self) -> SwResult<Series> {
        self.kinetic_energy()
            .zip_with(&self.magnetic_energy(), |k, m| k + m)
    }

    /// E_v − E_b.
    pub fn residual_energy(&self) -> SwResult<Series> {
        self.kinetic_energy()
            .zip_with(&self.magnetic_energy(), |k, m| k - m)
    }

    pub fn normalized_residual_energy(&self) -> SwResult<Series> {
        self.residual_energy()?
            .zip_with(&self.total_energy()?, |r, e| r / e)
    }

    /// δv·δb / 2.
    pub fn cross_helicity(&self) -> SwResult<Series> {
        Ok(self.velocity.dot(&self.bfield)?.map(|d| 0.5 * d))
    }

    pub fn normalized_cross_helicity(&self) -> SwResult<Series> {
        self.cross_helicity()?
            .zip_with(&self.total_energy()?, |h, e| 2.0 * h / e)
    }

    /// E_v / E_b.
    pub fn alfven_ratio(&self) -> SwResult<Series> {
        self.kinetic_energy()
            .zip_with(&self.magnetic_energy(), |k, m| k / m)
    }

    /// e− / e+.
    pub fn elsasser_ratio(&self) -> SwResult<Series> {
        self.e_minus()?.zip_with(&self.e_plus()?, |m, p| m / p)
    }
}
