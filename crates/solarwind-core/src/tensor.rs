// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Tensor
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Gyrotropic quantities with parallel, perpendicular and scalar parts.

use crate::schema::Schema;
use ndarray::{Array1, ArrayView1};
use solarwind_types::error::SwResult;
use solarwind_types::table::{Series, Table, TimeIndex};

/// Time series over the components {par, per, scalar}.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    table: Table<String>,
}

impl Tensor {
    /// Wrap a table holding exactly the columns par, per, scalar.
    pub fn new(table: &Table<String>) -> SwResult<Self> {
        Ok(Tensor {
            table: Schema::Tensor.conform(table)?,
        })
    }

    pub fn from_components(
        index: TimeIndex,
        par: Array1<f64>,
        per: Array1<f64>,
        scalar: Array1<f64>,
    ) -> SwResult<Self> {
        let table = Table::from_columns(
            index,
            vec![
                ("par".to_string(), par),
                ("per".to_string(), per),
                ("scalar".to_string(), scalar),
            ],
        )?;
        Ok(Tensor { table })
    }

    pub fn table(&self) -> &Table<String> {
        &self.table
    }

    pub fn index(&self) -> &TimeIndex {
        self.table.index()
    }

    pub fn par(&self) -> ArrayView1<'_, f64> {
        self.table.values().column(0)
    }

    pub fn per(&self) -> ArrayView1<'_, f64> {
        self.table.values().column(1)
    }

    pub fn scalar(&self) -> ArrayView1<'_, f64> {
        self.table.values().column(2)
    }

    /// Component by name ("par", "per" or "scalar").
    pub fn component(&self, name: &str) -> SwResult<Series> {
        self.table.series(&name.to_string())
    }

    /// Apply `f` to every component.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Tensor {
        Tensor {
            table: self.table.map(f),
        }
    }

    pub fn try_add(&self, other: &Tensor) -> SwResult<Tensor> {
        Ok(Tensor {
            table: self.table.zip_with(&other.table, |a, b| a + b)?,
        })
    }

    /// Multiply every component by an index-aligned per-row factor.
    pub fn scale_rows(&self, factor: &Series) -> SwResult<Tensor> {
        Ok(Tensor {
            table: self.table.scale_rows(factor)?,
        })
    }
}
