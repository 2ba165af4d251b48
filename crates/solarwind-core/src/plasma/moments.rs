// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Plasma Moments
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Density, thermal and pressure moments. Composite species are summed.

use super::{Plasma, SpeciesValue};
use crate::tensor::Tensor;
use solarwind_types::constants::POLYTROPIC_INDEX_SCALAR;
use solarwind_types::error::{SolarWindError, SwResult};
use solarwind_types::species::is_composite;
use solarwind_types::table::Series;
use solarwind_types::units;
use std::sync::Arc;

impl Plasma {
    /// n, cm⁻³.
    pub fn number_density<S: AsRef<str>>(&self, species: &[S]) -> SwResult<SpeciesValue<Series>> {
        self.resolve(species, |s| self.sum_series(s, |ion| ion.number_density()))
    }

    /// ρ, m_p cm⁻³.
    pub fn mass_density<S: AsRef<str>>(&self, species: &[S]) -> SwResult<SpeciesValue<Series>> {
        self.resolve(species, |s| self.sum_series(s, |ion| ion.mass_density()))
    }

    /// w, km/s. Not defined for a composite species.
    pub fn thermal_speed<S: AsRef<str>>(&self, species: &[S]) -> SwResult<SpeciesValue<Tensor>> {
        self.resolve(species, |s| {
            if is_composite(s) {
                return Err(SolarWindError::AmbiguousOperation(format!(
                    "thermal speed of composite species '{s}' is undefined"
                )));
            }
            self.ion(s)?.thermal_speed()
        })
    }

    /// p, pPa.
    pub fn thermal_pressure<S: AsRef<str>>(
        &self,
        species: &[S],
    ) -> SwResult<SpeciesValue<Tensor>> {
        self.resolve(species, |s| self.sum_tensor(s, |ion| ion.thermal_pressure()))
    }

    /// T, 10⁵ K.
    pub fn temperature<S: AsRef<str>>(&self, species: &[S]) -> SwResult<SpeciesValue<Tensor>> {
        self.resolve(species, |s| self.sum_tensor(s, |ion| ion.temperature()))
    }

    /// p⊥ / p∥ of the (summed) pressure.
    pub fn anisotropy<S: AsRef<str>>(&self, species: &[S]) -> SwResult<SpeciesValue<Series>> {
        self.resolve(species, |s| {
            let pth = self.sum_tensor(s, |ion| ion.thermal_pressure())?;
            Series::new(Arc::clone(pth.index()), &pth.per() / &pth.par())
        })
    }

    /// β = p / p_B per component.
    pub fn beta<S: AsRef<str>>(&self, species: &[S]) -> SwResult<SpeciesValue<Tensor>> {
        let pb = self.magnetic_pressure();
        let inv_pb = pb.map(|p| 1.0 / p);
        self.resolve(species, |s| {
            self.sum_tensor(s, |ion| ion.thermal_pressure())?
                .scale_rows(&inv_pb)
        })
    }

    /// Specific entropy p ρ^(−5/3) from the scalar pressure, SI.
    pub fn specific_entropy<S: AsRef<str>>(
        &self,
        species: &[S],
    ) -> SwResult<SpeciesValue<Series>> {
        self.resolve(species, |s| {
            let pth = self.sum_tensor(s, |ion| ion.thermal_pressure())?;
            let p = pth.component("scalar")?.map(|p| p * units::PRESSURE);
            let rho = self
                .sum_series(s, |ion| ion.mass_density())?
                .map(|r| r * units::RHO);
            let entropy = p.zip_with(&rho, |p, r| p * r.powf(-POLYTROPIC_INDEX_SCALAR))?;
            Ok(entropy.map(|v| v / units::SPECIFIC_ENTROPY))
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::plasma::fixtures::plasma;
    use solarwind_types::constants::{K_BOLTZMANN, MU0, M_ALPHA, M_PROTON};
    use solarwind_types::error::SolarWindError;
    use solarwind_types::units;

    #[test]
    fn test_composite_density_is_sum() {
        let plasma = plasma();
        let total = plasma
            .number_density(&["p1+a"])
            .unwrap()
            .into_single()
            .unwrap();
        assert!((total.values()[0] - 5.2).abs() < 1e-12);

        let rho = plasma.mass_density(&["a"]).unwrap().into_single().unwrap();
        assert!((rho.values()[1] - 0.3 * M_ALPHA / M_PROTON).abs() < 1e-12);
    }

    #[test]
    fn test_thermal_speed_of_composite_is_ambiguous() {
        assert!(matches!(
            plasma().thermal_speed(&["p1+a"]),
            Err(SolarWindError::AmbiguousOperation(_))
        ));
        let w = plasma().thermal_speed(&["p1"]).unwrap().into_single().unwrap();
        assert_eq!(w.par().to_vec(), vec![30.0, 35.0, 40.0]);
    }

    #[test]
    fn test_temperature_round_trips_thermal_speed() {
        let plasma = plasma();
        let t = plasma.temperature(&["p1"]).unwrap().into_single().unwrap();
        let w = plasma.thermal_speed(&["p1"]).unwrap().into_single().unwrap();
        for (ti, wi) in t.per().iter().zip(w.per().iter()) {
            let back = (2.0 * K_BOLTZMANN * ti * units::TEMPERATURE / M_PROTON).sqrt() / units::W;
            assert!((back - wi).abs() < 1e-9 * wi);
        }
    }

    #[test]
    fn test_beta_matches_speed_ratio() {
        // β = w² / ca² for a single species
        let plasma = plasma();
        let beta = plasma.beta(&["p1"]).unwrap().into_single().unwrap();
        let w = plasma.thermal_speed(&["p1"]).unwrap().into_single().unwrap();
        let rho = plasma.mass_density(&["p1"]).unwrap().into_single().unwrap();
        let b = plasma.bfield().magnitude();
        for i in 0..3 {
            let ca = b.values()[i] * units::B
                / (MU0 * rho.values()[i] * units::RHO).sqrt()
                / units::CA;
            let expected = (w.scalar()[i] / ca).powi(2);
            assert!(
                (beta.scalar()[i] - expected).abs() < 1e-9 * expected,
                "row {i}: {} vs {expected}",
                beta.scalar()[i]
            );
        }
    }

    #[test]
    fn test_anisotropy_and_entropy() {
        let plasma = plasma();
        let r = plasma.anisotropy(&["p1"]).unwrap().into_single().unwrap();
        assert!((r.values()[0] - (25.0f64 / 30.0).powi(2)).abs() < 1e-12);

        let s = plasma
            .specific_entropy(&["p1,a"])
            .unwrap()
            .into_per_species("p1");
        assert_eq!(s.len(), 2);
        assert!(s["p1"].values().iter().all(|v| *v > 0.0));
    }
}
