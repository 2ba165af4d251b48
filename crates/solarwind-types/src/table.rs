// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Labeled Table
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Time-indexed, column-labeled `f64` tables.
//!
//! [`Table<K>`] is the one container type used across the workspace. The
//! key type selects the scheme: [`ColumnKey`] for the three-level
//! (M, C, S) measurement table, [`ComponentKey`] for the two-level (M, C)
//! tables (spacecraft trajectories, single-species slices) and plain
//! `String` labels for derived outputs.
//!
//! Tables are immutable once built. Accessors hand out read-only views or
//! owned copies, so a caller can never write through to an owner's data.

use crate::error::{SolarWindError, SwResult};
use chrono::{DateTime, Utc};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub type Epoch = DateTime<Utc>;

/// Shared, immutable row index.
pub type TimeIndex = Arc<[Epoch]>;

/// Level names of the measurement column scheme.
pub const COLUMN_LEVELS: [&str; 3] = ["M", "C", "S"];

/// Level names of the two-level column scheme.
pub const COMPONENT_LEVELS: [&str; 2] = ["M", "C"];

/// Three-level (Measurement, Component, Species) column key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColumnKey {
    pub m: String,
    pub c: String,
    pub s: String,
}

impl ColumnKey {
    pub fn new(m: &str, c: &str, s: &str) -> Self {
        ColumnKey {
            m: m.to_string(),
            c: c.to_string(),
            s: s.to_string(),
        }
    }

    /// Canonical key builder from a list of (M, C, S) triples.
    pub fn build(triples: &[(&str, &str, &str)]) -> Vec<ColumnKey> {
        triples
            .iter()
            .map(|(m, c, s)| ColumnKey::new(m, c, s))
            .collect()
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.m, self.c, self.s)
    }
}

/// Two-level (Measurement, Component) key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentKey {
    pub m: String,
    pub c: String,
}

impl ComponentKey {
    pub fn new(m: &str, c: &str) -> Self {
        ComponentKey {
            m: m.to_string(),
            c: c.to_string(),
        }
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.m, self.c)
    }
}

/// Anything usable as a column label.
pub trait Label: Clone + Eq + Ord + fmt::Debug + fmt::Display {}

impl<T: Clone + Eq + Ord + fmt::Debug + fmt::Display> Label for T {}

/// Build a shared index from timestamps, checking they strictly increase.
pub fn time_index(epochs: Vec<Epoch>) -> SwResult<TimeIndex> {
    if let Some(i) = epochs.windows(2).position(|w| w[1] <= w[0]) {
        return Err(SolarWindError::SchemaViolation(format!(
            "Time index is not strictly increasing at row {}: {} <= {}",
            i + 1,
            epochs[i + 1],
            epochs[i]
        )));
    }
    Ok(Arc::from(epochs))
}

/// True when both indices hold the same timestamps.
pub fn same_index(a: &TimeIndex, b: &TimeIndex) -> bool {
    Arc::ptr_eq(a, b) || a[..] == b[..]
}

fn check_same_index(a: &TimeIndex, b: &TimeIndex) -> SwResult<()> {
    if same_index(a, b) {
        Ok(())
    } else {
        Err(SolarWindError::IndexMismatch(format!(
            "indices differ ({} vs {} rows)",
            a.len(),
            b.len()
        )))
    }
}

/// Elementwise equality where NaN matches NaN at the same position.
pub fn nan_equal<'a, I>(a: I, b: I) -> bool
where
    I: IntoIterator<Item = &'a f64>,
{
    let mut a = a.into_iter();
    let mut b = b.into_iter();
    loop {
        match (a.next(), b.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) => {
                if !(x == y || (x.is_nan() && y.is_nan())) {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

/// Time-indexed table of `f64` columns, rows × columns.
#[derive(Debug, Clone)]
pub struct Table<K> {
    index: TimeIndex,
    columns: Vec<K>,
    values: Array2<f64>,
}

impl<K: Label> Table<K> {
    /// Build a table; columns must be unique and `values` rows × columns.
    pub fn new(index: TimeIndex, columns: Vec<K>, values: Array2<f64>) -> SwResult<Self> {
        if values.dim() != (index.len(), columns.len()) {
            return Err(SolarWindError::SchemaViolation(format!(
                "Table shape mismatch: values {:?}, index {}, columns {}",
                values.dim(),
                index.len(),
                columns.len()
            )));
        }
        let mut sorted: Vec<&K> = columns.iter().collect();
        sorted.sort();
        if let Some(w) = sorted.windows(2).find(|w| w[0] == w[1]) {
            return Err(SolarWindError::SchemaViolation(format!(
                "Duplicate column {}",
                w[0]
            )));
        }
        Ok(Table {
            index,
            columns,
            values,
        })
    }

    /// Build a table from labeled columns, keeping the first occurrence of a
    /// repeated label. Returns the table and the labels that were dropped.
    pub fn deduplicated(
        index: TimeIndex,
        columns: Vec<(K, Array1<f64>)>,
    ) -> SwResult<(Self, Vec<K>)> {
        let mut kept: Vec<(K, Array1<f64>)> = Vec::with_capacity(columns.len());
        let mut dropped = Vec::new();
        for (key, col) in columns {
            if kept.iter().any(|(k, _)| *k == key) {
                dropped.push(key);
            } else {
                kept.push((key, col));
            }
        }
        Ok((Self::from_columns(index, kept)?, dropped))
    }

    pub fn from_columns(index: TimeIndex, columns: Vec<(K, Array1<f64>)>) -> SwResult<Self> {
        let nrows = index.len();
        let mut values = Array2::from_elem((nrows, columns.len()), f64::NAN);
        let mut keys = Vec::with_capacity(columns.len());
        for (j, (key, col)) in columns.into_iter().enumerate() {
            if col.len() != nrows {
                return Err(SolarWindError::SchemaViolation(format!(
                    "Column {key} has {} rows, index has {nrows}",
                    col.len()
                )));
            }
            values.column_mut(j).assign(&col);
            keys.push(key);
        }
        Self::new(index, keys, values)
    }

    /// Table with no columns over `index`.
    pub fn empty(index: TimeIndex) -> Self {
        let nrows = index.len();
        Table {
            index,
            columns: Vec::new(),
            values: Array2::zeros((nrows, 0)),
        }
    }

    pub fn index(&self) -> &TimeIndex {
        &self.index
    }

    pub fn columns(&self) -> &[K] {
        &self.columns
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn nrows(&self) -> usize {
        self.index.len()
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.position(key).is_some()
    }

    pub fn position(&self, key: &K) -> Option<usize> {
        self.columns.iter().position(|k| k == key)
    }

    pub fn column(&self, key: &K) -> Option<ArrayView1<'_, f64>> {
        self.position(key).map(|j| self.values.column(j))
    }

    /// Like [`Table::column`] but a missing column is a schema violation.
    pub fn require(&self, key: &K) -> SwResult<ArrayView1<'_, f64>> {
        self.column(key)
            .ok_or_else(|| SolarWindError::SchemaViolation(format!("Missing column {key}")))
    }

    /// Owned copy of a column as a [`Series`].
    pub fn series(&self, key: &K) -> SwResult<Series> {
        Ok(Series {
            index: Arc::clone(&self.index),
            values: self.require(key)?.to_owned(),
        })
    }

    pub fn iter_columns(&self) -> impl Iterator<Item = (&K, ArrayView1<'_, f64>)> {
        self.columns
            .iter()
            .enumerate()
            .map(move |(j, k)| (k, self.values.column(j)))
    }

    /// Keep the columns whose relabelling returns `Some`, in order.
    pub fn relabel<K2: Label>(&self, f: impl Fn(&K) -> Option<K2>) -> SwResult<Table<K2>> {
        let mut cols = Vec::new();
        let mut keys = Vec::new();
        for (j, key) in self.columns.iter().enumerate() {
            if let Some(new_key) = f(key) {
                cols.push(j);
                keys.push(new_key);
            }
        }
        let values = self.values.select(Axis(1), &cols);
        Table::new(Arc::clone(&self.index), keys, values)
    }

    /// Keep only the columns satisfying `keep`.
    pub fn filter(&self, keep: impl Fn(&K) -> bool) -> Table<K> {
        let cols: Vec<usize> = (0..self.columns.len())
            .filter(|&j| keep(&self.columns[j]))
            .collect();
        Table {
            index: Arc::clone(&self.index),
            columns: cols.iter().map(|&j| self.columns[j].clone()).collect(),
            values: self.values.select(Axis(1), &cols),
        }
    }

    /// Column-wise concatenation; both tables must share the index and have
    /// disjoint labels.
    pub fn concat(&self, other: &Table<K>) -> SwResult<Table<K>> {
        check_same_index(&self.index, &other.index)?;
        let mut columns = self.columns.clone();
        columns.extend(other.columns.iter().cloned());
        let values = ndarray::concatenate(Axis(1), &[self.values.view(), other.values.view()])
            .map_err(|e| SolarWindError::SchemaViolation(format!("concat failed: {e}")))?;
        Table::new(Arc::clone(&self.index), columns, values)
    }

    /// Apply `f` to every value.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Table<K> {
        Table {
            index: Arc::clone(&self.index),
            columns: self.columns.clone(),
            values: self.values.mapv(f),
        }
    }

    /// Reduce every row to one value.
    pub fn row_reduce(&self, f: impl Fn(ArrayView1<'_, f64>) -> f64) -> Series {
        Series {
            index: Arc::clone(&self.index),
            values: self.values.map_axis(Axis(1), f),
        }
    }

    /// Multiply every row by a factor computed from that row.
    pub fn scale_rows_by(&self, f: impl Fn(ArrayView1<'_, f64>) -> f64) -> Table<K> {
        let mut values = self.values.clone();
        for mut row in values.rows_mut() {
            let factor = f(row.view());
            row.mapv_inplace(|v| v * factor);
        }
        Table {
            index: Arc::clone(&self.index),
            columns: self.columns.clone(),
            values,
        }
    }

    /// Multiply every row by the matching entry of an index-aligned series.
    pub fn scale_rows(&self, factor: &Series) -> SwResult<Table<K>> {
        check_same_index(&self.index, &factor.index)?;
        let values = &self.values * &factor.values.view().insert_axis(Axis(1));
        Ok(Table {
            index: Arc::clone(&self.index),
            columns: self.columns.clone(),
            values,
        })
    }

    /// Elementwise combination of two tables with identical index and labels.
    pub fn zip_with(&self, other: &Table<K>, f: impl Fn(f64, f64) -> f64) -> SwResult<Table<K>> {
        check_same_index(&self.index, &other.index)?;
        if self.columns != other.columns {
            return Err(SolarWindError::SchemaViolation(format!(
                "Column mismatch: {:?} vs {:?}",
                self.columns, other.columns
            )));
        }
        let values = ndarray::Zip::from(&self.values)
            .and(&other.values)
            .map_collect(|&a, &b| f(a, b));
        Ok(Table {
            index: Arc::clone(&self.index),
            columns: self.columns.clone(),
            values,
        })
    }
}

impl<K: Label> PartialEq for Table<K> {
    fn eq(&self, other: &Self) -> bool {
        // Misaligned tables are unequal, never an error.
        same_index(&self.index, &other.index)
            && self.columns == other.columns
            && nan_equal(self.values.iter(), other.values.iter())
    }
}

/// A single time-indexed column.
#[derive(Debug, Clone)]
pub struct Series {
    index: TimeIndex,
    values: Array1<f64>,
}

impl Series {
    pub fn new(index: TimeIndex, values: Array1<f64>) -> SwResult<Self> {
        if values.len() != index.len() {
            return Err(SolarWindError::SchemaViolation(format!(
                "Series has {} values, index has {} rows",
                values.len(),
                index.len()
            )));
        }
        Ok(Series { index, values })
    }

    pub fn index(&self) -> &TimeIndex {
        &self.index
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn into_values(self) -> Array1<f64> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn map(&self, f: impl Fn(f64) -> f64) -> Series {
        Series {
            index: Arc::clone(&self.index),
            values: self.values.mapv(f),
        }
    }

    /// Empty-valued series sharing `index`, all NaN.
    pub fn nan(index: TimeIndex) -> Series {
        let n = index.len();
        Series {
            index,
            values: Array1::from_elem(n, f64::NAN),
        }
    }

    /// Combine two index-aligned series elementwise.
    pub fn zip_with(&self, other: &Series, f: impl Fn(f64, f64) -> f64) -> SwResult<Series> {
        check_same_index(&self.index, &other.index)?;
        let values = ndarray::Zip::from(&self.values)
            .and(&other.values)
            .map_collect(|&a, &b| f(a, b));
        Ok(Series {
            index: Arc::clone(&self.index),
            values,
        })
    }
}

impl PartialEq for Series {
    fn eq(&self, other: &Self) -> bool {
        same_index(&self.index, &other.index) && nan_equal(self.values.iter(), other.values.iter())
    }
}
