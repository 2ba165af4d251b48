// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Coulomb Collisions
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Coulomb collisions between single species, electrons included.
//!
//! Coulomb logarithm after Hernández & Marsch (1985), T in eV and n in m⁻³:
//!
//!   ln Λ = 29.9 − ln[ |Z_a Z_b| (a_a + a_b) / (a_a T_b + a_b T_a)
//!                     · sqrt(n_a Z_a² / T_a + n_b Z_b² / T_b) ]
//!
//! Collision frequency of test species a on field species b:
//!
//!   ν_ab = n_b Z_a² Z_b² e⁴ ln Λ / (4π ε0² m_a μ_ab) · Φ(x) / w³
//!
//! with w² = w_a² + w_b², x = |Δv| / w and Φ the longitudinal diffusion
//! rate.

use super::Plasma;
use crate::ion::Ion;
use ndarray::{Array1, Zip};
use solarwind_math::special::longitudinal_diffusion_rate;
use solarwind_types::constants::{EPS0, E_CHARGE, K_BOLTZMANN_EV};
use solarwind_types::error::{SolarWindError, SwResult};
use solarwind_types::species::is_composite;
use solarwind_types::table::Series;
use solarwind_types::units;
use std::f64::consts::PI;
use std::sync::Arc;
use tracing::debug;

/// Leading constant of the Hernández & Marsch logarithm (SI density, eV).
const COULOMB_LOG_OFFSET: f64 = 29.9;

impl Plasma {
    fn collision_pair(&self, s0: &str, s1: &str) -> SwResult<(&Ion, &Ion)> {
        for s in [s0, s1] {
            self.check_species(&[s])?;
            if is_composite(s) {
                return Err(SolarWindError::AmbiguousOperation(format!(
                    "collisions are defined between single species, got '{s}'"
                )));
            }
        }
        Ok((self.ion(s0)?, self.ion(s1)?))
    }

    /// ln Λ between two single species.
    pub fn coulomb_logarithm(&self, s0: &str, s1: &str) -> SwResult<Series> {
        let (a, b) = self.collision_pair(s0, s1)?;
        let to_ev = units::TEMPERATURE * K_BOLTZMANN_EV;
        let ta = a.temperature()?.map(|t| t * to_ev);
        let tb = b.temperature()?.map(|t| t * to_ev);
        let na = a.number_density()?.map(|n| n * units::N);
        let nb = b.number_density()?.map(|n| n * units::N);
        let (za, zb) = (a.charge_state(), b.charge_state());
        let (ma, mb) = (a.mass_in_mp(), b.mass_in_mp());

        let lnlambda = Zip::from(ta.scalar())
            .and(tb.scalar())
            .and(na.values())
            .and(nb.values())
            .map_collect(|&ta, &tb, &na, &nb| {
                let mass_term = (za * zb).abs() * (ma + mb) / (ma * tb + mb * ta);
                let density_term = (na * za * za / ta + nb * zb * zb / tb).sqrt();
                COULOMB_LOG_OFFSET - (mass_term * density_term).ln()
            });
        Series::new(Arc::clone(self.index()), lnlambda)
    }

    /// Collision frequency ν, s⁻¹, of `s0` on `s1`.
    ///
    /// With `both_species` the reciprocal rate is added, weighted by the
    /// mass density ratio: ν = ν_ab (1 + ρ_a/ρ_b).
    pub fn collision_frequency(&self, s0: &str, s1: &str, both_species: bool) -> SwResult<Series> {
        let (a, b) = self.collision_pair(s0, s1)?;
        let lnlambda = self.coulomb_logarithm(s0, s1)?;

        let wa = a.thermal_speed()?;
        let wb = b.thermal_speed()?;
        let dv = a.velocity()?.try_sub(&b.velocity()?)?.magnitude();
        let nb = b.number_density()?;

        let (za, zb) = (a.charge_state(), b.charge_state());
        let (ma, mb) = (a.mass(), b.mass());
        let reduced = ma * mb / (ma + mb);
        let coeff = (za * zb).powi(2) * E_CHARGE.powi(4)
            / (4.0 * PI * EPS0 * EPS0 * ma * reduced);

        let w = Zip::from(wa.scalar())
            .and(wb.scalar())
            .map_collect(|&wa, &wb| (wa * wa + wb * wb).sqrt() * units::W);
        let mut nu: Array1<f64> = Zip::from(&w)
            .and(dv.values())
            .and(nb.values())
            .and(lnlambda.values())
            .map_collect(|&w, &dv, &nb, &ll| {
                let x = dv * units::V / w;
                coeff * nb * units::N * ll * longitudinal_diffusion_rate(x) / w.powi(3)
            });

        if both_species {
            let ra = a.mass_density()?;
            let rb = b.mass_density()?;
            Zip::from(&mut nu)
                .and(ra.values())
                .and(rb.values())
                .for_each(|nu, &ra, &rb| *nu *= 1.0 + ra / rb);
        }
        debug!(s0, s1, both_species, "collision frequency");
        Series::new(Arc::clone(self.index()), nu.mapv(|v| v / units::NUC))
    }

    /// Coulomb number ν r / v_sw: collisions over the transit from the Sun.
    ///
    /// Needs the spacecraft for the heliocentric distance. v_sw is the
    /// centre-of-mass speed of every loaded species.
    pub fn coulomb_number(&self, s0: &str, s1: &str, both_species: bool) -> SwResult<Series> {
        let spacecraft = self.spacecraft.as_ref().ok_or_else(|| {
            SolarWindError::MissingCollaborator(
                "Coulomb number needs a spacecraft for the distance to the Sun".to_string(),
            )
        })?;
        let nu = self.collision_frequency(s0, s1, both_species)?;
        let r = spacecraft.distance_to_sun()?;
        let all: Vec<&Ion> = self.ions.values().collect();
        let vsw = Self::center_of_mass(&all)?.magnitude();

        let transit = r.zip_with(&vsw, |r, v| r * units::DISTANCE2SUN / (v * units::V))?;
        Ok(nu
            .zip_with(&transit, |nu, t| nu * units::NUC * t)?
            .map(|nc| nc / units::NC))
    }
}

#[cfg(test)]
mod tests {
    use crate::plasma::fixtures::{plasma, raw_table};
    use crate::plasma::Plasma;
    use solarwind_types::error::SolarWindError;

    #[test]
    fn test_coulomb_logarithm_magnitude() {
        let plasma = plasma();
        let ll = plasma.coulomb_logarithm("p1", "p1").unwrap();
        // solar wind protons at 1 AU sit around ln Λ ≈ 20–30
        for v in ll.values() {
            assert!(*v > 20.0 && *v < 30.0, "ln Λ = {v}");
        }
        let pa = plasma.coulomb_logarithm("p1", "a").unwrap();
        let ap = plasma.coulomb_logarithm("a", "p1").unwrap();
        for i in 0..3 {
            assert!((pa.values()[i] - ap.values()[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_electron_proton_collisions_are_finite() {
        let mut plasma = plasma();
        plasma.estimate_electrons_inplace().unwrap();
        let ep = plasma.coulomb_logarithm("e", "p1").unwrap();
        let pe = plasma.coulomb_logarithm("p1", "e").unwrap();
        for i in 0..3 {
            let v = ep.values()[i];
            assert!(v > 10.0 && v < 35.0, "ln Λ = {v}");
            assert!((v - pe.values()[i]).abs() < 1e-12);
        }
        let nu = plasma.collision_frequency("e", "p1", false).unwrap();
        assert!(nu.values().iter().all(|v| v.is_finite() && *v > 0.0));
        let nc = plasma.coulomb_number("e", "p1", true).unwrap();
        assert!(nc.values().iter().all(|v| v.is_finite() && *v > 0.0));
    }

    #[test]
    fn test_collision_frequency_policies() {
        let plasma = plasma();
        let single = plasma.collision_frequency("a", "p1", false).unwrap();
        let both = plasma.collision_frequency("a", "p1", true).unwrap();
        let ra = plasma.mass_density(&["a"]).unwrap().into_single().unwrap();
        let rp = plasma.mass_density(&["p1"]).unwrap().into_single().unwrap();
        for i in 0..3 {
            let nu = single.values()[i];
            assert!(nu > 1e-10 && nu < 1e-4, "ν = {nu}");
            let expected = nu * (1.0 + ra.values()[i] / rp.values()[i]);
            assert!((both.values()[i] - expected).abs() < 1e-12 * expected);
        }
    }

    #[test]
    fn test_collisions_reject_composites() {
        assert!(matches!(
            plasma().collision_frequency("a+p1", "p1", true),
            Err(SolarWindError::AmbiguousOperation(_))
        ));
    }

    #[test]
    fn test_coulomb_number_needs_spacecraft() {
        let bare = Plasma::new(&raw_table(), &["p1", "a"], None, None).unwrap();
        assert!(matches!(
            bare.coulomb_number("p1", "a", true),
            Err(SolarWindError::MissingCollaborator(_))
        ));
        assert!(matches!(
            bare.coulomb_number("zz", "p1", false),
            Err(SolarWindError::MissingCollaborator(_))
        ));
        let nc = plasma().coulomb_number("p1", "a", true).unwrap();
        assert!(nc.values().iter().all(|v| v.is_finite() && *v > 0.0));
    }
}
