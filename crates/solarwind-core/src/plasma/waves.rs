// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Plasma Wave Speeds
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Sound and Alfvén speeds, the firehose factor and the turbulence
//! decomposition.

use super::{Plasma, SpeciesValue};
use crate::alfvenic_turbulence::AlfvenicTurbulence;
use crate::tensor::Tensor;
use ndarray::{Array1, ArrayView1, Zip};
use solarwind_types::config::TurbulenceConfig;
use solarwind_types::constants::{polytropic_index, MU0};
use solarwind_types::error::SwResult;
use solarwind_types::species::split_two_part;
use solarwind_types::table::Series;
use solarwind_types::units;
use std::sync::Arc;
use tracing::debug;

/// Bulk velocity fed to [`Plasma::build_alfvenic_turbulence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurbulenceVelocity {
    /// Velocity of the species (centre of mass for a composite).
    CenterOfMass,
    /// Drift of the species relative to another species.
    Differential(String),
}

impl Plasma {
    /// cs = sqrt(γ p / ρ) per component, km/s, with γ∥ = 3, γ⊥ = 2 and
    /// γ = 5/3 for the scalar.
    pub fn sound_speed<S: AsRef<str>>(&self, species: &[S]) -> SwResult<SpeciesValue<Tensor>> {
        let gammas = [
            polytropic_index("par")?,
            polytropic_index("per")?,
            polytropic_index("scalar")?,
        ];
        self.resolve(species, |s| {
            let pth = self.sum_tensor(s, |ion| ion.thermal_pressure())?;
            let rho = self.sum_series(s, |ion| ion.mass_density())?;
            let component = |gamma: f64, p: ArrayView1<'_, f64>| -> Array1<f64> {
                Zip::from(p).and(rho.values()).map_collect(|&p, &r| {
                    (gamma * p * units::PRESSURE / (r * units::RHO)).sqrt() / units::CS
                })
            };
            Tensor::from_components(
                Arc::clone(self.index()),
                component(gammas[0], pth.par()),
                component(gammas[1], pth.per()),
                component(gammas[2], pth.scalar()),
            )
        })
    }

    /// ca = |B| / sqrt(μ0 ρ), km/s.
    pub fn alfven_speed<S: AsRef<str>>(&self, species: &[S]) -> SwResult<SpeciesValue<Series>> {
        self.resolve(species, |s| self.alfven_speed_of(s))
    }

    fn alfven_speed_of(&self, species: &str) -> SwResult<Series> {
        let rho = self.sum_series(species, |ion| ion.mass_density())?;
        self.bfield.magnitude().zip_with(&rho, |b, r| {
            b * units::B / (MU0 * r * units::RHO).sqrt() / units::CA
        })
    }

    /// Firehose factor 1 + μ0/B² (p⊥ − p∥ − 2 p_dyn).
    ///
    /// Pressures of a composite are summed before the single "1 +", while a
    /// list of species gets one "1 +" each, so the per-species results do
    /// not add up to the composite one. With `pdynamic` the dynamic
    /// pressure of all requested species is included.
    pub fn anisotropy_factor_squared<S: AsRef<str>>(
        &self,
        species: &[S],
        pdynamic: bool,
    ) -> SwResult<SpeciesValue<Series>> {
        let pdyn = if pdynamic {
            Some(self.dynamic_pressure(species, false)?)
        } else {
            None
        };
        self.resolve(species, |s| self.afsq_of(s, pdyn.as_ref()))
    }

    fn afsq_of(&self, species: &str, pdyn: Option<&Series>) -> SwResult<Series> {
        let pth = self.sum_tensor(species, |ion| ion.thermal_pressure())?;
        let mut dp = Series::new(Arc::clone(self.index()), &pth.per() - &pth.par())?;
        if let Some(pdyn) = pdyn {
            dp = dp.zip_with(pdyn, |d, p| d - 2.0 * p)?;
        }
        let bsq = self
            .bfield
            .magnitude()
            .map(|b| (b * units::B) * (b * units::B));
        dp.zip_with(&bsq, |d, b2| 1.0 + MU0 * d * units::PRESSURE / b2)
    }

    /// ca · sqrt(afsq), km/s. NaN where the plasma is firehose unstable.
    pub fn anisotropic_alfven_speed<S: AsRef<str>>(
        &self,
        species: &[S],
        pdynamic: bool,
    ) -> SwResult<SpeciesValue<Series>> {
        let pdyn = if pdynamic {
            Some(self.dynamic_pressure(species, false)?)
        } else {
            None
        };
        self.resolve(species, |s| {
            let ca = self.alfven_speed_of(s)?;
            let afsq = self.afsq_of(s, pdyn.as_ref())?;
            ca.zip_with(&afsq, |c, f| c * f.sqrt())
        })
    }

    /// Elsasser decomposition for `species`.
    ///
    /// `species` is `"<velocity>[,<density>]"`: the first part names the
    /// species whose velocity is used, the optional second part the species
    /// whose mass density converts B to Alfvén units. Either part may be a
    /// composite.
    pub fn build_alfvenic_turbulence(
        &self,
        species: &str,
        velocity: &TurbulenceVelocity,
        config: &TurbulenceConfig,
    ) -> SwResult<AlfvenicTurbulence> {
        let (vs, rs) = split_two_part(species)?;
        self.check_species(&[vs.as_str()])?;
        self.check_species(&[rs.as_str()])?;

        let v = match velocity {
            TurbulenceVelocity::CenterOfMass => self.species_velocity(&vs, false)?,
            TurbulenceVelocity::Differential(other) => {
                self.differential_flow(&vs, other, false)?
            }
        };
        let rho = self.sum_series(&rs, |ion| ion.mass_density())?;
        debug!(velocity = %vs, density = %rs, mode = ?velocity, "turbulence inputs");
        AlfvenicTurbulence::new(&v, &self.bfield, &rho, config)
    }
}
