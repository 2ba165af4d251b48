// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Electron Estimate
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Electron moments from quasi-neutrality and zero current.
//!
//!   n_e = Σ Z_i n_i
//!   v_e = Σ Z_i n_i v_i / n_e
//!   w_e = w_p sqrt(m_p / m_e)   (T_e = T_p)

use super::Plasma;
use crate::ion::Ion;
use ndarray::Array1;
use solarwind_types::constants::{M_ELECTRON, M_PROTON};
use solarwind_types::error::{SolarWindError, SwResult};
use solarwind_types::table::{ColumnKey, Table};
use std::sync::Arc;
use tracing::info;

const ELECTRON: &str = "e";

impl Plasma {
    fn reference_proton(&self) -> SwResult<&Ion> {
        match (self.ions.get("p"), self.ions.get("p1")) {
            (Some(p), None) | (None, Some(p)) => Ok(p),
            (Some(_), Some(_)) => Err(SolarWindError::AmbiguousOperation(
                "both 'p' and 'p1' are loaded; the electron temperature reference is ambiguous"
                    .to_string(),
            )),
            (None, None) => Err(SolarWindError::species_unavailable(
                ["p1"],
                &self.species,
            )),
        }
    }

    /// Electron n, v and w columns (species "e") estimated from the ions.
    pub fn estimate_electrons(&self) -> SwResult<Table<ColumnKey>> {
        if self.ions.contains_key(ELECTRON) {
            return Err(SolarWindError::SchemaViolation(
                "electrons are already loaded".to_string(),
            ));
        }
        let proton = self.reference_proton()?;

        let nrows = self.data.nrows();
        let mut ne = Array1::<f64>::zeros(nrows);
        let mut flux = [
            Array1::<f64>::zeros(nrows),
            Array1::<f64>::zeros(nrows),
            Array1::<f64>::zeros(nrows),
        ];
        for ion in self.ions.values() {
            let zn = ion.number_density()?.into_values() * ion.charge_state();
            let v = ion.velocity()?;
            flux[0] = &flux[0] + &(&zn * &v.x());
            flux[1] = &flux[1] + &(&zn * &v.y());
            flux[2] = &flux[2] + &(&zn * &v.z());
            ne = ne + zn;
        }

        let w = proton.thermal_speed()?;
        let scale = (M_PROTON / M_ELECTRON).sqrt();
        let [fx, fy, fz] = flux;
        let columns = vec![
            (ColumnKey::new("n", "", ELECTRON), ne.clone()),
            (ColumnKey::new("v", "x", ELECTRON), fx / &ne),
            (ColumnKey::new("v", "y", ELECTRON), fy / &ne),
            (ColumnKey::new("v", "z", ELECTRON), fz / &ne),
            (ColumnKey::new("w", "par", ELECTRON), w.par().mapv(|v| v * scale)),
            (ColumnKey::new("w", "per", ELECTRON), w.per().mapv(|v| v * scale)),
            (
                ColumnKey::new("w", "scalar", ELECTRON),
                w.scalar().mapv(|v| v * scale),
            ),
        ];
        Table::from_columns(Arc::clone(self.index()), columns)
    }

    /// Add estimated electrons to this plasma.
    ///
    /// The new state is built in full before it replaces the old one, so an
    /// error leaves `self` untouched.
    pub fn estimate_electrons_inplace(&mut self) -> SwResult<()> {
        let electrons = self.estimate_electrons()?;
        let mut data = self.data.concat(&electrons)?;
        let mut columns: Vec<(ColumnKey, Array1<f64>)> = data
            .iter_columns()
            .map(|(k, v)| (k.clone(), v.to_owned()))
            .collect();
        columns.sort_by(|a, b| a.0.cmp(&b.0));
        data = Table::from_columns(Arc::clone(self.index()), columns)?;

        let mut species = self.species.clone();
        species.push(ELECTRON.to_string());
        species.sort();

        let mut report = self.report.clone();
        report
            .accepted
            .extend(electrons.columns().iter().cloned());
        report.accepted.sort();

        let rebuilt = Self::assemble(
            data,
            species,
            self.spacecraft.clone(),
            self.auxiliary.clone(),
            report,
        )?;
        info!(species = ?rebuilt.species, "electrons added");
        *self = rebuilt;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::plasma::fixtures::{plasma, raw_table};
    use crate::plasma::Plasma;
    use solarwind_types::constants::{M_ELECTRON, M_PROTON};
    use solarwind_types::error::SolarWindError;
    use solarwind_types::table::ColumnKey;

    #[test]
    fn test_quasi_neutral_density_and_zero_current() {
        let plasma = plasma();
        let e = plasma.estimate_electrons().unwrap();
        let ne = e.require(&ColumnKey::new("n", "", "e")).unwrap();
        assert!((ne[0] - (5.0 + 2.0 * 0.2)).abs() < 1e-12);

        let vx = e.require(&ColumnKey::new("v", "x", "e")).unwrap();
        let expected = (5.0 * -400.0 + 2.0 * 0.2 * -420.0) / 5.4;
        assert!((vx[0] - expected).abs() < 1e-9);

        let wpar = e.require(&ColumnKey::new("w", "par", "e")).unwrap();
        assert!((wpar[0] - 30.0 * (M_PROTON / M_ELECTRON).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_inplace_adds_species() {
        let mut plasma = plasma();
        plasma.estimate_electrons_inplace().unwrap();
        assert_eq!(plasma.species(), &["a", "e", "p1"]);
        let ne = plasma.number_density(&["e"]).unwrap().into_single().unwrap();
        assert!((ne.values()[2] - (10.0 + 0.8)).abs() < 1e-12);
        assert!(matches!(
            plasma.estimate_electrons(),
            Err(SolarWindError::SchemaViolation(_))
        ));
    }

    #[test]
    fn test_needs_single_proton_reference() {
        let alphas = Plasma::new(&raw_table(), &["a"], None, None).unwrap();
        let mut before = alphas.clone();
        assert!(matches!(
            before.estimate_electrons_inplace(),
            Err(SolarWindError::SpeciesUnavailable { .. })
        ));
        assert_eq!(before, alphas);
    }
}
