// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Plasma Kinematics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Bulk flows and the moments built from drifts between species.

use super::{Plasma, SpeciesValue};
use crate::ion::Ion;
use crate::tensor::Tensor;
use crate::vector::Vector;
use ndarray::{Array1, Zip};
use solarwind_types::constants::sqrt_mass_per_charge;
use solarwind_types::error::{SolarWindError, SwResult};
use solarwind_types::species::is_composite;
use solarwind_types::table::Series;
use solarwind_types::units;
use std::sync::Arc;

impl Plasma {
    /// Bulk velocity, km/s.
    ///
    /// An atomic species gives its own velocity, a composite its centre of
    /// mass velocity. `project_m2q` scales an atomic velocity by
    /// sqrt(m/q) in proton units; combining it with a composite is an error.
    pub fn velocity<S: AsRef<str>>(
        &self,
        species: &[S],
        project_m2q: bool,
    ) -> SwResult<SpeciesValue<Vector>> {
        self.resolve(species, |s| self.species_velocity(s, project_m2q))
    }

    pub(super) fn species_velocity(&self, species: &str, project_m2q: bool) -> SwResult<Vector> {
        if is_composite(species) {
            if project_m2q {
                return Err(SolarWindError::AmbiguousOperation(format!(
                    "m/q projection of composite species '{species}'"
                )));
            }
            return Self::center_of_mass(&self.constituents(species)?);
        }
        let v = self.ion(species)?.velocity()?;
        if project_m2q {
            Ok(v.scale(sqrt_mass_per_charge(species)?))
        } else {
            Ok(v)
        }
    }

    /// v(s0) − v(s1), km/s. Either side may be a composite.
    pub fn differential_flow(&self, s0: &str, s1: &str, project_m2q: bool) -> SwResult<Vector> {
        self.check_species(&[s0])?;
        self.check_species(&[s1])?;
        if s0 == s1 {
            return Err(SolarWindError::AmbiguousOperation(format!(
                "differential flow of '{s0}' with itself"
            )));
        }
        let v0 = self.species_velocity(s0, project_m2q)?;
        let v1 = self.species_velocity(s1, project_m2q)?;
        v0.try_sub(&v1)
    }

    /// Dynamic pressure of the drifts between species, pPa.
    ///
    /// Default: ½ Σ ρ_s |v_s − v_cm|² over the atomic constituents of
    /// `species`. With `project_m2q` exactly two species are required and
    /// the result is ½ ρ_i ρ_j/(ρ_i + ρ_j) |Δv|² with each velocity scaled
    /// by sqrt(m/q).
    pub fn dynamic_pressure<S: AsRef<str>>(
        &self,
        species: &[S],
        project_m2q: bool,
    ) -> SwResult<Series> {
        let ions = self.atoms(species)?;
        let coeff = 0.5 * units::RHO * units::V * units::V / units::PRESSURE;

        if project_m2q {
            let [i, j] = ions.as_slice() else {
                return Err(SolarWindError::AmbiguousOperation(format!(
                    "m/q-projected dynamic pressure needs exactly two species, got {}",
                    ions.len()
                )));
            };
            let dv = self
                .species_velocity(i.species(), true)?
                .try_sub(&self.species_velocity(j.species(), true)?)?;
            let dv2 = dv.magnitude().map(|v| v * v);
            let rho_i = i.mass_density()?;
            let rho_j = j.mass_density()?;
            let reduced = rho_i.zip_with(&rho_j, |a, b| a * b / (a + b))?;
            return reduced.zip_with(&dv2, |r, v2| coeff * r * v2);
        }

        let vcm = Self::center_of_mass(&ions)?;
        let mut total = Series::new(
            Arc::clone(self.index()),
            Array1::zeros(self.data.nrows()),
        )?;
        for ion in &ions {
            let dv2 = ion.velocity()?.try_sub(&vcm)?.magnitude().map(|v| v * v);
            let term = ion.mass_density()?.zip_with(&dv2, |r, v2| coeff * r * v2)?;
            total = total.zip_with(&term, |a, b| a + b)?;
        }
        Ok(total)
    }

    /// Field-aligned heat flux from drifting bi-Maxwellians, µW m⁻².
    ///
    /// q∥ = Σ ½ ρ_s (Δv³ + 3/2 Δv w∥²) with Δv the drift from the centre of
    /// mass along B.
    pub fn heat_flux<S: AsRef<str>>(&self, species: &[S]) -> SwResult<Series> {
        let ions = self.atoms(species)?;
        let vcm = Self::center_of_mass(&ions)?;
        let bhat = self.bfield.unit_vector();
        let coeff = 0.5 * units::RHO * units::V.powi(3) / units::QPAR;

        let mut total = Array1::zeros(self.data.nrows());
        for ion in &ions {
            let dv = ion.velocity()?.try_sub(&vcm)?.dot(&bhat)?;
            let rho = ion.mass_density()?;
            let w = ion.thermal_speed()?;
            Zip::from(&mut total)
                .and(rho.values())
                .and(dv.values())
                .and(w.par())
                .for_each(|q, &r, &d, &wpar| {
                    *q += coeff * r * (d.powi(3) + 1.5 * d * wpar * wpar);
                });
        }
        Series::new(Arc::clone(self.index()), total)
    }

    /// ln(f_core / f_beam) at the beam's bulk velocity, with both species
    /// taken as bi-Maxwellians about B:
    ///
    ///   ln[ n_c w_b∥ w_b⊥² / (n_b w_c∥ w_c⊥²) ] − (Δv∥ / w_c∥)² − (Δv⊥ / w_c⊥)²
    ///
    /// where Δv = v_beam − v_core is split along and across B. The
    /// perpendicular term is kept, so an oblique drift also lowers the
    /// ratio. Positive where the core still dominates at the beam's peak.
    pub fn vdf_ratio(&self, beam: &str, core: &str) -> SwResult<Series> {
        let b = self.atomic_ion(beam)?;
        let c = self.atomic_ion(core)?;
        if beam == core {
            return Err(SolarWindError::AmbiguousOperation(format!(
                "VDF ratio of '{beam}' with itself"
            )));
        }

        let drift = b.velocity()?.try_sub(&c.velocity()?)?.project(&self.bfield)?;
        let dpar = drift.require(&"par".to_string())?;
        let dper = drift.require(&"per".to_string())?;
        let nb = b.number_density()?;
        let nc = c.number_density()?;
        let wb = b.thermal_speed()?;
        let wc = c.thermal_speed()?;

        let log_norm = |n: &Series, w: &Tensor| {
            Zip::from(n.values())
                .and(w.par())
                .and(w.per())
                .map_collect(|&n, &par, &per| (n / (par * per * per)).ln())
        };
        let norm = &log_norm(&nc, &wc) - &log_norm(&nb, &wb);
        let ratio = Zip::from(&norm)
            .and(dpar)
            .and(dper)
            .and(wc.par())
            .and(wc.per())
            .map_collect(|&norm, &dpar, &dper, &cpar, &cper| {
                norm - (dpar / cpar).powi(2) - (dper / cper).powi(2)
            });
        Series::new(Arc::clone(self.index()), ratio)
    }

    fn atomic_ion(&self, species: &str) -> SwResult<&Ion> {
        self.check_species(&[species])?;
        if is_composite(species) {
            return Err(SolarWindError::AmbiguousOperation(format!(
                "'{species}' must be a single species"
            )));
        }
        self.ion(species)
    }
}
