// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Plasma
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Multi-species plasma container.
//!
//! A [`Plasma`] owns the canonical (M, C, S) measurement table, one [`Ion`]
//! per loaded species, and optionally a [`Spacecraft`] trajectory and an
//! auxiliary table on the same index. Physics lives in the submodules:
//!
//! | module        | quantities |
//! |---------------|------------|
//! | `moments`     | n, ρ, w, p, T, anisotropy, β, specific entropy |
//! | `kinematics`  | velocity, differential flow, dynamic pressure, heat flux, VDF ratio |
//! | `waves`       | sound and Alfvén speeds, firehose factor, turbulence |
//! | `collisions`  | Coulomb logarithm, collision frequency, Coulomb number |
//! | `electrons`   | quasi-neutral electron estimate |
//! | `persistence` | npz save/load |
//!
//! Species arguments follow the [`conform_species`] rules. One argument
//! (possibly a `"+"` composite) yields [`SpeciesValue::Single`]; several
//! yield [`SpeciesValue::PerSpecies`].

mod collisions;
mod electrons;
mod ingest;
mod kinematics;
mod moments;
mod persistence;
mod waves;

pub use ingest::IngestReport;
pub use waves::TurbulenceVelocity;

use crate::ion::Ion;
use crate::spacecraft::Spacecraft;
use crate::tensor::Tensor;
use crate::vector::{BField, Vector};
use ndarray::Array1;
use solarwind_types::config::AnalysisConfig;
use solarwind_types::constants;
use solarwind_types::error::{SolarWindError, SwResult};
use solarwind_types::species::{conform_species, is_composite, split_composite};
use solarwind_types::table::{same_index, ColumnKey, Series, Table, TimeIndex};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of a species-resolved query.
#[derive(Debug, Clone, PartialEq)]
pub enum SpeciesValue<T> {
    /// One species argument, atomic or composite.
    Single(T),
    /// Several independent species, keyed by species string.
    PerSpecies(BTreeMap<String, T>),
}

impl<T> SpeciesValue<T> {
    pub fn into_single(self) -> SwResult<T> {
        match self {
            SpeciesValue::Single(v) => Ok(v),
            SpeciesValue::PerSpecies(map) => Err(SolarWindError::AmbiguousOperation(format!(
                "expected one species, got {:?}",
                map.keys().collect::<Vec<_>>()
            ))),
        }
    }

    /// Per-species map; a single result is keyed by `species`.
    pub fn into_per_species(self, species: &str) -> BTreeMap<String, T> {
        match self {
            SpeciesValue::Single(v) => BTreeMap::from([(species.to_string(), v)]),
            SpeciesValue::PerSpecies(map) => map,
        }
    }

    pub fn get(&self, species: &str) -> Option<&T> {
        match self {
            SpeciesValue::Single(v) => Some(v),
            SpeciesValue::PerSpecies(map) => map.get(species),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SpeciesValue::Single(_) => 1,
            SpeciesValue::PerSpecies(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
pub struct Plasma {
    data: Table<ColumnKey>,
    species: Vec<String>,
    ions: BTreeMap<String, Ion>,
    bfield: BField,
    spacecraft: Option<Spacecraft>,
    auxiliary: Option<Table<ColumnKey>>,
    report: IngestReport,
}

impl Plasma {
    /// Build a plasma from a raw measurement table.
    ///
    /// Unrecognised columns are dropped and listed in [`Plasma::ingest_report`].
    /// Scalar thermal speeds are always recomputed from par and per.
    pub fn new<S: AsRef<str>>(
        data: &Table<ColumnKey>,
        species: &[S],
        spacecraft: Option<Spacecraft>,
        auxiliary: Option<Table<ColumnKey>>,
    ) -> SwResult<Self> {
        let species = conform_species(species)?;
        if let Some(composite) = species.iter().find(|s| is_composite(s)) {
            return Err(SolarWindError::SchemaViolation(format!(
                "Plasma species must be atomic, got '{composite}'"
            )));
        }
        for s in &species {
            constants::species_entry(s)?;
        }
        let (table, report) = ingest::ingest(data, &species)?;
        Self::assemble(table, species, spacecraft, auxiliary, report)
    }

    /// Build from loose columns that may repeat a key; the first occurrence
    /// of a repeated column wins.
    pub fn from_raw_columns<S: AsRef<str>>(
        index: TimeIndex,
        columns: Vec<(ColumnKey, Array1<f64>)>,
        species: &[S],
        spacecraft: Option<Spacecraft>,
        auxiliary: Option<Table<ColumnKey>>,
    ) -> SwResult<Self> {
        let (table, duplicates) = Table::deduplicated(index, columns)?;
        let mut plasma = Self::new(&table, species, spacecraft, auxiliary)?;
        if !duplicates.is_empty() {
            warn!(?duplicates, "dropping duplicate measurement columns");
        }
        plasma.report.duplicates = duplicates;
        Ok(plasma)
    }

    /// Build using the species (and spacecraft frame check) from a config.
    pub fn from_config(
        data: &Table<ColumnKey>,
        config: &AnalysisConfig,
        spacecraft: Option<Spacecraft>,
        auxiliary: Option<Table<ColumnKey>>,
    ) -> SwResult<Self> {
        if let (Some(frame), Some(sc)) = (&config.spacecraft_frame, &spacecraft) {
            let frame: crate::spacecraft::Frame = frame.parse()?;
            if frame != sc.frame() {
                return Err(SolarWindError::SchemaViolation(format!(
                    "config expects a {frame} spacecraft, got {}",
                    sc.frame()
                )));
            }
        }
        Self::new(data, config.species.as_slice(), spacecraft, auxiliary)
    }

    fn assemble(
        data: Table<ColumnKey>,
        species: Vec<String>,
        spacecraft: Option<Spacecraft>,
        auxiliary: Option<Table<ColumnKey>>,
        report: IngestReport,
    ) -> SwResult<Self> {
        if let Some(sc) = &spacecraft {
            if !same_index(sc.index(), data.index()) {
                return Err(SolarWindError::IndexMismatch(format!(
                    "spacecraft '{}' index ({} rows) differs from plasma index ({} rows)",
                    sc.name(),
                    sc.index().len(),
                    data.nrows()
                )));
            }
        }
        if let Some(aux) = &auxiliary {
            if !same_index(aux.index(), data.index()) {
                return Err(SolarWindError::IndexMismatch(
                    "auxiliary data index differs from plasma index".to_string(),
                ));
            }
            let shared: Vec<String> = aux
                .columns()
                .iter()
                .filter(|k| data.contains(k))
                .map(ToString::to_string)
                .collect();
            if !shared.is_empty() {
                return Err(SolarWindError::SchemaViolation(format!(
                    "auxiliary data duplicates plasma columns {shared:?}"
                )));
            }
        }

        let b = data
            .relabel(|k| (k.m == "b" && k.s.is_empty()).then(|| k.c.clone()))?;
        let bfield = BField::new(&b)?;

        let mut ions = BTreeMap::new();
        for s in &species {
            ions.insert(s.clone(), Ion::from_measurements(s, &data)?);
        }

        info!(
            species = ?species,
            rows = data.nrows(),
            columns = data.ncols(),
            spacecraft = ?spacecraft.as_ref().map(|sc| sc.name()),
            "plasma assembled"
        );

        Ok(Plasma {
            data,
            species,
            ions,
            bfield,
            spacecraft,
            auxiliary,
            report,
        })
    }

    // ── Accessors ──

    pub fn data(&self) -> &Table<ColumnKey> {
        &self.data
    }

    pub fn index(&self) -> &TimeIndex {
        self.data.index()
    }

    /// Loaded species, sorted.
    pub fn species(&self) -> &[String] {
        &self.species
    }

    pub fn ions(&self) -> &BTreeMap<String, Ion> {
        &self.ions
    }

    pub fn ion(&self, species: &str) -> SwResult<&Ion> {
        self.ions
            .get(species)
            .ok_or_else(|| SolarWindError::species_unavailable([species], &self.species))
    }

    pub fn bfield(&self) -> &BField {
        &self.bfield
    }

    pub fn spacecraft(&self) -> Option<&Spacecraft> {
        self.spacecraft.as_ref()
    }

    pub fn auxiliary_data(&self) -> Option<&Table<ColumnKey>> {
        self.auxiliary.as_ref()
    }

    pub fn ingest_report(&self) -> &IngestReport {
        &self.report
    }

    /// |B|²/(2 μ0), pPa.
    pub fn magnetic_pressure(&self) -> Series {
        self.bfield.pressure()
    }

    /// Plasmas have no canonical total order.
    pub fn ordering_unsupported(&self) -> SwResult<std::cmp::Ordering> {
        Err(SolarWindError::AmbiguousOperation(
            "plasmas cannot be ordered".to_string(),
        ))
    }

    // ── Species resolution ──

    /// Conform `species` and check every atomic constituent is loaded.
    pub fn check_species<S: AsRef<str>>(&self, species: &[S]) -> SwResult<Vec<String>> {
        let conformed = conform_species(species)?;
        let unavailable = conformed
            .iter()
            .map(|s| split_composite(s))
            .collect::<SwResult<Vec<_>>>()?
            .into_iter()
            .flatten()
            .any(|atom| !self.ions.contains_key(atom));
        if unavailable {
            return Err(SolarWindError::species_unavailable(
                &conformed,
                &self.species,
            ));
        }
        Ok(conformed)
    }

    /// Evaluate `f` for each conformed species argument.
    fn resolve<S, T>(
        &self,
        species: &[S],
        f: impl Fn(&str) -> SwResult<T>,
    ) -> SwResult<SpeciesValue<T>>
    where
        S: AsRef<str>,
    {
        let conformed = self.check_species(species)?;
        if let [single] = conformed.as_slice() {
            return Ok(SpeciesValue::Single(f(single)?));
        }
        let mut out = BTreeMap::new();
        for s in &conformed {
            out.insert(s.clone(), f(s)?);
        }
        Ok(SpeciesValue::PerSpecies(out))
    }

    /// Ions making up a (possibly composite) species.
    fn constituents(&self, species: &str) -> SwResult<Vec<&Ion>> {
        split_composite(species)?
            .into_iter()
            .map(|atom| self.ion(atom))
            .collect()
    }

    /// Atomic constituents of every conformed argument, in order, without
    /// repeats.
    fn atoms<S: AsRef<str>>(&self, species: &[S]) -> SwResult<Vec<&Ion>> {
        let mut out: Vec<&Ion> = Vec::new();
        for s in self.check_species(species)? {
            for ion in self.constituents(&s)? {
                if !out.iter().any(|o| o.species() == ion.species()) {
                    out.push(ion);
                }
            }
        }
        Ok(out)
    }

    /// Sum a per-ion series over the constituents of `species`.
    fn sum_series(
        &self,
        species: &str,
        f: impl Fn(&Ion) -> SwResult<Series>,
    ) -> SwResult<Series> {
        let mut total: Option<Series> = None;
        for ion in self.constituents(species)? {
            let next = f(ion)?;
            total = Some(match total {
                None => next,
                Some(acc) => acc.zip_with(&next, |a, b| a + b)?,
            });
        }
        total.ok_or_else(|| SolarWindError::SchemaViolation(format!("empty species '{species}'")))
    }

    /// Sum a per-ion tensor over the constituents of `species`.
    fn sum_tensor(
        &self,
        species: &str,
        f: impl Fn(&Ion) -> SwResult<Tensor>,
    ) -> SwResult<Tensor> {
        let mut total: Option<Tensor> = None;
        for ion in self.constituents(species)? {
            let next = f(ion)?;
            total = Some(match total {
                None => next,
                Some(acc) => acc.try_add(&next)?,
            });
        }
        total.ok_or_else(|| SolarWindError::SchemaViolation(format!("empty species '{species}'")))
    }

    /// Mass-weighted mean velocity of `ions`, km/s.
    fn center_of_mass(ions: &[&Ion]) -> SwResult<Vector> {
        let mut momentum: Option<Vector> = None;
        let mut rho_total: Option<Series> = None;
        for ion in ions {
            let rho = ion.mass_density()?;
            let p = ion.velocity()?.scale_rows(&rho)?;
            momentum = Some(match momentum {
                None => p,
                Some(acc) => acc.try_add(&p)?,
            });
            rho_total = Some(match rho_total {
                None => rho,
                Some(acc) => acc.zip_with(&rho, |a, b| a + b)?,
            });
        }
        match (momentum, rho_total) {
            (Some(m), Some(rho)) => m.scale_rows(&rho.map(|r| 1.0 / r)),
            _ => Err(SolarWindError::SchemaViolation(
                "centre of mass of no species".to_string(),
            )),
        }
    }

    /// A new plasma without `species`.
    pub fn drop_species<S: AsRef<str>>(&self, species: &[S]) -> SwResult<Plasma> {
        let dropped = self.check_species(species)?;
        let dropped: Vec<&str> = dropped
            .iter()
            .map(|s| split_composite(s))
            .collect::<SwResult<Vec<_>>>()?
            .into_iter()
            .flatten()
            .collect();
        let remaining: Vec<String> = self
            .species
            .iter()
            .filter(|s| !dropped.contains(&s.as_str()))
            .cloned()
            .collect();
        if remaining.is_empty() {
            return Err(SolarWindError::SchemaViolation(format!(
                "dropping {dropped:?} would leave no species"
            )));
        }
        debug!(?dropped, ?remaining, "dropping species");
        let data = self
            .data
            .filter(|k| !dropped.contains(&k.s.as_str()));
        Self::assemble(
            data,
            remaining,
            self.spacecraft.clone(),
            self.auxiliary.clone(),
            self.report.clone(),
        )
    }
}

impl PartialEq for Plasma {
    fn eq(&self, other: &Self) -> bool {
        self.species == other.species
            && self.data == other.data
            && self.spacecraft == other.spacecraft
            && self.auxiliary == other.auxiliary
    }
}
