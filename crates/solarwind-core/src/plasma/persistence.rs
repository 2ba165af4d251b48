// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Plasma Archives
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! NumPy `.npz` archives of a plasma.
//!
//! Layout:
//!
//! | entry                      | contents |
//! |----------------------------|----------|
//! | `meta`                     | JSON (u8): species, spacecraft name and frame, auxiliary flag |
//! | `index`                    | i64 nanoseconds since the Unix epoch |
//! | `FC`, `FC_columns`         | plasma table without `w.scalar`; labels as JSON (u8) |
//! | `SC`, `SC_columns`         | spacecraft table, when present |
//! | `FC_AUX`, `FC_AUX_columns` | auxiliary table, when present |
//!
//! Loading goes through [`Plasma::new`], so scalar thermal speeds are
//! recomputed.

use super::Plasma;
use crate::spacecraft::{Frame, Spacecraft};
use chrono::DateTime;
use ndarray::{Array1, Array2, Ix1, Ix2, OwnedRepr};
use ndarray_npy::{NpzReader, NpzWriter, ReadableElement};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use solarwind_types::error::{SolarWindError, SwResult};
use solarwind_types::table::{time_index, ColumnKey, ComponentKey, Label, Table, TimeIndex};
use std::fs::File;
use tracing::info;

#[derive(Debug, Serialize, Deserialize)]
struct ArchiveMeta {
    species: Vec<String>,
    spacecraft: Option<SpacecraftMeta>,
    auxiliary: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct SpacecraftMeta {
    name: String,
    frame: String,
}

/// Plasma data sub-table.
const PLASMA_TABLE: &str = "FC";
/// Spacecraft sub-table.
const SPACECRAFT_TABLE: &str = "SC";
/// Auxiliary sub-table.
const AUXILIARY_TABLE: &str = "FC_AUX";

fn columns_entry(name: &str) -> String {
    format!("{name}_columns")
}

fn archive_err(path: &str, e: impl std::fmt::Display) -> SolarWindError {
    SolarWindError::Archive(format!("'{path}': {e}"))
}

fn write_json<T: Serialize>(
    npz: &mut NpzWriter<File>,
    path: &str,
    key: &str,
    value: &T,
) -> SwResult<()> {
    let bytes = Array1::from(serde_json::to_vec(value)?);
    npz.add_array(key, &bytes).map_err(|e| archive_err(path, e))
}

fn write_table<K: Label + Serialize>(
    npz: &mut NpzWriter<File>,
    path: &str,
    name: &str,
    table: &Table<K>,
) -> SwResult<()> {
    npz.add_array(name, table.values())
        .map_err(|e| archive_err(path, e))?;
    write_json(npz, path, &columns_entry(name), &table.columns())
}

fn read_array<A: ReadableElement, D: ndarray::Dimension>(
    npz: &mut NpzReader<File>,
    path: &str,
    key: &str,
) -> SwResult<ndarray::Array<A, D>> {
    npz.by_name::<OwnedRepr<A>, D>(&format!("{key}.npy"))
        .or_else(|_| npz.by_name::<OwnedRepr<A>, D>(key))
        .map_err(|e| archive_err(path, format!("failed to read '{key}': {e}")))
}

fn read_json<T: DeserializeOwned>(
    npz: &mut NpzReader<File>,
    path: &str,
    key: &str,
) -> SwResult<T> {
    let bytes: Array1<u8> = read_array::<u8, Ix1>(npz, path, key)?;
    Ok(serde_json::from_slice(&bytes.to_vec())?)
}

fn read_table<K: Label + DeserializeOwned>(
    npz: &mut NpzReader<File>,
    path: &str,
    name: &str,
    index: &TimeIndex,
) -> SwResult<Table<K>> {
    let values: Array2<f64> = read_array::<f64, Ix2>(npz, path, name)?;
    let columns: Vec<K> = read_json(npz, path, &columns_entry(name))?;
    Table::new(std::sync::Arc::clone(index), columns, values)
}

impl Plasma {
    /// Write the plasma, its spacecraft and auxiliary data to `path`.
    pub fn save(&self, path: &str) -> SwResult<()> {
        let nanos = self
            .index()
            .iter()
            .map(|t| {
                t.timestamp_nanos_opt().ok_or_else(|| {
                    archive_err(path, format!("timestamp {t} is outside the i64 range"))
                })
            })
            .collect::<SwResult<Vec<i64>>>()?;

        let meta = ArchiveMeta {
            species: self.species.clone(),
            spacecraft: self.spacecraft.as_ref().map(|sc| SpacecraftMeta {
                name: sc.name().to_string(),
                frame: sc.frame().to_string(),
            }),
            auxiliary: self.auxiliary.is_some(),
        };

        let file = File::create(path)?;
        let mut npz = NpzWriter::new(file);
        write_json(&mut npz, path, "meta", &meta)?;
        npz.add_array("index", &Array1::from(nanos))
            .map_err(|e| archive_err(path, e))?;

        let measured = self.data.filter(|k| !(k.m == "w" && k.c == "scalar"));
        write_table(&mut npz, path, PLASMA_TABLE, &measured)?;
        if let Some(sc) = &self.spacecraft {
            write_table(&mut npz, path, SPACECRAFT_TABLE, sc.data())?;
        }
        if let Some(aux) = &self.auxiliary {
            write_table(&mut npz, path, AUXILIARY_TABLE, aux)?;
        }
        npz.finish().map_err(|e| archive_err(path, e))?;

        info!(path, species = ?self.species, rows = self.data.nrows(), "plasma saved");
        Ok(())
    }

    /// Read a plasma written by [`Plasma::save`].
    pub fn load_from_file(path: &str) -> SwResult<Plasma> {
        let file = File::open(path)?;
        let mut npz = NpzReader::new(file).map_err(|e| archive_err(path, e))?;

        let meta: ArchiveMeta = read_json(&mut npz, path, "meta")?;
        let nanos: Array1<i64> = read_array::<i64, Ix1>(&mut npz, path, "index")?;
        let index = time_index(nanos.iter().map(|&ns| DateTime::from_timestamp_nanos(ns)).collect())?;

        let data: Table<ColumnKey> = read_table(&mut npz, path, PLASMA_TABLE, &index)?;
        let spacecraft = match &meta.spacecraft {
            Some(sc) => {
                let table: Table<ComponentKey> = read_table(&mut npz, path, SPACECRAFT_TABLE, &index)?;
                let frame: Frame = sc.frame.parse()?;
                Some(Spacecraft::new(&table, &sc.name, frame)?)
            }
            None => None,
        };
        let auxiliary = if meta.auxiliary {
            Some(read_table(&mut npz, path, AUXILIARY_TABLE, &index)?)
        } else {
            None
        };

        let plasma = Plasma::new(&data, meta.species.as_slice(), spacecraft, auxiliary)?;
        info!(path, species = ?plasma.species, "plasma loaded");
        Ok(plasma)
    }
}
