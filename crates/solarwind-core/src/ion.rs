// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Ion
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Single-species moments.
//!
//! An [`Ion`] is a read-only slice of the plasma table for one atomic
//! species. Every derived quantity is recomputed on each call.
//!
//! Units:
//!   n [cm⁻³], v and w [km/s], ρ [m_p cm⁻³], p [pPa], T [10⁵ K].

use crate::tensor::Tensor;
use crate::vector::Vector;
use ndarray::{Array1, ArrayView1, Zip};
use solarwind_types::constants::{self, K_BOLTZMANN, M_PROTON};
use solarwind_types::error::{SolarWindError, SwResult};
use solarwind_types::species::is_composite;
use solarwind_types::table::{ColumnKey, ComponentKey, Series, Table, TimeIndex};
use solarwind_types::units;
use std::sync::Arc;

/// Columns an ion cannot be built without.
const REQUIRED: [(&str, &str); 6] = [
    ("n", ""),
    ("v", "x"),
    ("v", "y"),
    ("v", "z"),
    ("w", "par"),
    ("w", "per"),
];

/// Scalar thermal speed from its gyrotropic parts: w² = (w∥² + 2 w⊥²)/3.
pub fn scalar_thermal_speed(par: f64, per: f64) -> f64 {
    ((par * par + 2.0 * per * per) / 3.0).sqrt()
}

#[derive(Debug, Clone)]
pub struct Ion {
    species: String,
    mass_kg: f64,
    charge_state: f64,
    data: Table<ComponentKey>,
}

impl Ion {
    /// Build from a single-species (M, C) table.
    ///
    /// The species must be atomic and known to the constants table. A
    /// missing `w.scalar` is filled from `w.par` and `w.per`.
    pub fn new(species: &str, data: &Table<ComponentKey>) -> SwResult<Self> {
        if is_composite(species) {
            return Err(SolarWindError::SchemaViolation(format!(
                "An ion is a single species, got composite '{species}'"
            )));
        }
        let entry = constants::species_entry(species)?;

        let missing: Vec<String> = REQUIRED
            .iter()
            .filter(|(m, c)| !data.contains(&ComponentKey::new(m, c)))
            .map(|(m, c)| ComponentKey::new(m, c).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SolarWindError::SchemaViolation(format!(
                "Ion '{species}' is missing columns {missing:?}"
            )));
        }

        let scalar_key = ComponentKey::new("w", "scalar");
        let mut columns: Vec<(ComponentKey, Array1<f64>)> = Vec::with_capacity(7);
        for (m, c) in REQUIRED {
            let key = ComponentKey::new(m, c);
            let col = data.require(&key)?.to_owned();
            columns.push((key, col));
        }
        let scalar = match data.column(&scalar_key) {
            Some(col) => col.to_owned(),
            None => Zip::from(data.require(&ComponentKey::new("w", "par"))?)
                .and(data.require(&ComponentKey::new("w", "per"))?)
                .map_collect(|&par, &per| scalar_thermal_speed(par, per)),
        };
        columns.push((scalar_key, scalar));

        Ok(Ion {
            species: species.to_string(),
            mass_kg: entry.mass_kg,
            charge_state: entry.charge_state,
            data: Table::from_columns(Arc::clone(data.index()), columns)?,
        })
    }

    /// Slice `species` out of a full (M, C, S) measurement table.
    pub fn from_measurements(species: &str, table: &Table<ColumnKey>) -> SwResult<Self> {
        let sliced = table.relabel(|k| (k.s == species).then(|| ComponentKey::new(&k.m, &k.c)))?;
        Self::new(species, &sliced)
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn data(&self) -> &Table<ComponentKey> {
        &self.data
    }

    pub fn index(&self) -> &TimeIndex {
        self.data.index()
    }

    /// Particle mass, kg.
    pub fn mass(&self) -> f64 {
        self.mass_kg
    }

    /// Particle mass in proton masses.
    pub fn mass_in_mp(&self) -> f64 {
        self.mass_kg / M_PROTON
    }

    pub fn charge_state(&self) -> f64 {
        self.charge_state
    }

    fn col(&self, m: &str, c: &str) -> SwResult<ArrayView1<'_, f64>> {
        self.data.require(&ComponentKey::new(m, c))
    }

    fn series(&self, values: Array1<f64>) -> SwResult<Series> {
        Series::new(Arc::clone(self.index()), values)
    }

    pub fn number_density(&self) -> SwResult<Series> {
        self.data.series(&ComponentKey::new("n", ""))
    }

    pub fn velocity(&self) -> SwResult<Vector> {
        Vector::from_components(
            Arc::clone(self.index()),
            self.col("v", "x")?.to_owned(),
            self.col("v", "y")?.to_owned(),
            self.col("v", "z")?.to_owned(),
        )
    }

    pub fn thermal_speed(&self) -> SwResult<Tensor> {
        Tensor::from_components(
            Arc::clone(self.index()),
            self.col("w", "par")?.to_owned(),
            self.col("w", "per")?.to_owned(),
            self.col("w", "scalar")?.to_owned(),
        )
    }

    /// ρ = n m / m_p.
    pub fn mass_density(&self) -> SwResult<Series> {
        let m = self.mass_in_mp();
        Ok(self.number_density()?.map(|n| n * m))
    }

    /// p = ρ w² / 2 per component.
    pub fn thermal_pressure(&self) -> SwResult<Tensor> {
        let coeff = 0.5 * units::RHO * units::W * units::W / units::PRESSURE;
        let rho = self.mass_density()?;
        let w2 = self.thermal_speed()?.map(|w| w * w);
        Ok(w2.scale_rows(&rho)?.map(|v| coeff * v))
    }

    /// T = m w² / (2 k_B) per component.
    pub fn temperature(&self) -> SwResult<Tensor> {
        let coeff = 0.5 * self.mass_kg * units::W * units::W / K_BOLTZMANN / units::TEMPERATURE;
        Ok(self.thermal_speed()?.map(|w| coeff * w * w))
    }

    /// p⊥ / p∥.
    pub fn anisotropy(&self) -> SwResult<Series> {
        let pth = self.thermal_pressure()?;
        self.series(&pth.per() / &pth.par())
    }
}

impl PartialEq for Ion {
    fn eq(&self, other: &Self) -> bool {
        self.species == other.species && self.data == other.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use ndarray::array;
    use solarwind_types::table::time_index;

    fn index(n: usize) -> TimeIndex {
        let t0 = Utc.with_ymd_and_hms(1995, 1, 1, 0, 0, 0).unwrap();
        time_index(
            (0..n)
                .map(|i| t0 + chrono::Duration::seconds(92 * i as i64))
                .collect(),
        )
        .unwrap()
    }

    fn proton_table() -> Table<ComponentKey> {
        Table::from_columns(
            index(2),
            vec![
                (ComponentKey::new("n", ""), array![5.0, 10.0]),
                (ComponentKey::new("v", "x"), array![-400.0, -500.0]),
                (ComponentKey::new("v", "y"), array![10.0, 20.0]),
                (ComponentKey::new("v", "z"), array![0.0, -5.0]),
                (ComponentKey::new("w", "par"), array![30.0, 40.0]),
                (ComponentKey::new("w", "per"), array![20.0, f64::NAN]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_scalar_thermal_speed_filled() {
        let ion = Ion::new("p1", &proton_table()).unwrap();
        let w = ion.thermal_speed().unwrap();
        let expected = ((900.0 + 2.0 * 400.0) / 3.0f64).sqrt();
        assert!((w.scalar()[0] - expected).abs() < 1e-12);
        assert!(w.scalar()[1].is_nan());
    }

    #[test]
    fn test_missing_column_rejected() {
        let table = proton_table().filter(|k| !(k.m == "w" && k.c == "per"));
        let err = Ion::new("p1", &table).unwrap_err();
        assert!(matches!(err, SolarWindError::SchemaViolation(_)));
    }

    #[test]
    fn test_unknown_and_composite_species_rejected() {
        assert!(matches!(
            Ion::new("xx", &proton_table()),
            Err(SolarWindError::SpeciesUnavailable { .. })
        ));
        assert!(matches!(
            Ion::new("p1+a", &proton_table()),
            Err(SolarWindError::SchemaViolation(_))
        ));
    }

    #[test]
    fn test_alpha_mass_density() {
        let ion = Ion::new("a", &proton_table()).unwrap();
        let rho = ion.mass_density().unwrap();
        let m = constants::M_ALPHA / M_PROTON;
        assert!((rho.values()[0] - 5.0 * m).abs() < 1e-12);
        assert_eq!(ion.charge_state(), 2.0);
    }

    #[test]
    fn test_pressure_and_temperature() {
        let ion = Ion::new("p1", &proton_table()).unwrap();
        let pth = ion.thermal_pressure().unwrap();
        // 0.5 * 5e6 m^-3 * m_p * (30e3 m/s)^2 in pPa
        let expected = 0.5 * 5e6 * M_PROTON * 9e8 / 1e-12;
        assert!((pth.par()[0] - expected).abs() < 1e-9 * expected);

        let t = ion.temperature().unwrap();
        // T = m_p w² / 2k_B with w = 30 km/s -> 0.545e5 K
        let expected_t = M_PROTON * 9e8 / (2.0 * K_BOLTZMANN) / 1e5;
        assert!((t.par()[0] - expected_t).abs() < 1e-12);
        assert!((t.par()[0] - 0.5452).abs() < 1e-3);
    }

    #[test]
    fn test_anisotropy_is_perpendicular_over_parallel() {
        let ion = Ion::new("p1", &proton_table()).unwrap();
        let r = ion.anisotropy().unwrap();
        assert!((r.values()[0] - 400.0 / 900.0).abs() < 1e-12);
        assert!(r.values()[1].is_nan());
    }

    #[test]
    fn test_from_measurements_slices_species() {
        let full = proton_table()
            .relabel(|k| Some(ColumnKey::new(&k.m, &k.c, "p1")))
            .unwrap();
        let ion = Ion::from_measurements("p1", &full).unwrap();
        assert_eq!(ion.species(), "p1");
        assert_eq!(
            ion.velocity().unwrap().x().to_vec(),
            vec![-400.0, -500.0]
        );
        assert!(Ion::from_measurements("a", &full).is_err());
    }
}
