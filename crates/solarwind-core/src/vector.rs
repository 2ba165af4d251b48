// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Vector & BField
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Time series of Cartesian 3-vectors.
//!
//! Every operation propagates NaN: a missing component makes the derived
//! value missing for that row.

use crate::schema::Schema;
use ndarray::{Array1, ArrayView1, Zip};
use solarwind_types::constants::MU0;
use solarwind_types::error::{SolarWindError, SwResult};
use solarwind_types::table::{same_index, Series, Table, TimeIndex};
use solarwind_types::units;
use std::ops::Deref;
use std::sync::Arc;

/// Cartesian vector time series with columns {x, y, z}.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    table: Table<String>,
}

impl Vector {
    /// Wrap a table holding exactly the columns x, y, z.
    pub fn new(table: &Table<String>) -> SwResult<Self> {
        Ok(Vector {
            table: Schema::Vector.conform(table)?,
        })
    }

    pub fn from_components(
        index: TimeIndex,
        x: Array1<f64>,
        y: Array1<f64>,
        z: Array1<f64>,
    ) -> SwResult<Self> {
        let table = Table::from_columns(
            index,
            vec![("x".to_string(), x), ("y".to_string(), y), ("z".to_string(), z)],
        )?;
        Ok(Vector { table })
    }

    pub fn table(&self) -> &Table<String> {
        &self.table
    }

    pub fn index(&self) -> &TimeIndex {
        self.table.index()
    }

    pub fn x(&self) -> ArrayView1<'_, f64> {
        self.table.values().column(0)
    }

    pub fn y(&self) -> ArrayView1<'_, f64> {
        self.table.values().column(1)
    }

    pub fn z(&self) -> ArrayView1<'_, f64> {
        self.table.values().column(2)
    }

    /// Component by name ("x", "y" or "z").
    pub fn component(&self, name: &str) -> SwResult<Series> {
        self.table.series(&name.to_string())
    }

    fn map_rows(&self, f: impl Fn(f64, f64, f64) -> f64) -> Series {
        self.table.row_reduce(|r| f(r[0], r[1], r[2]))
    }

    pub fn magnitude(&self) -> Series {
        self.map_rows(|x, y, z| (x * x + y * y + z * z).sqrt())
    }

    /// Magnitude in the xy-plane.
    pub fn rho(&self) -> Series {
        self.map_rows(|x, y, _| x.hypot(y))
    }

    /// Angle from +z, degrees.
    pub fn colatitude(&self) -> Series {
        self.map_rows(|x, y, z| x.hypot(y).atan2(z).to_degrees())
    }

    /// Angle above the xy-plane, degrees.
    pub fn latitude(&self) -> Series {
        self.map_rows(|x, y, z| z.atan2(x.hypot(y)).to_degrees())
    }

    /// Azimuth from +x towards +y, degrees in (-180, 180].
    pub fn longitude(&self) -> Series {
        self.map_rows(|x, y, _| y.atan2(x).to_degrees())
    }

    /// Components divided by the magnitude, row by row.
    pub fn unit_vector(&self) -> Vector {
        Vector {
            table: self
                .table
                .scale_rows_by(|r| 1.0 / (r[0] * r[0] + r[1] * r[1] + r[2] * r[2]).sqrt()),
        }
    }

    fn dot_values(&self, other: &Vector) -> SwResult<Array1<f64>> {
        if !same_index(self.index(), other.index()) {
            return Err(SolarWindError::IndexMismatch(
                "vectors are on different time indices".to_string(),
            ));
        }
        Ok(&(&(&self.x() * &other.x()) + &(&self.y() * &other.y())) + &(&self.z() * &other.z()))
    }

    /// Row-wise dot product.
    pub fn dot(&self, other: &Vector) -> SwResult<Series> {
        Series::new(Arc::clone(self.index()), self.dot_values(other)?)
    }

    /// Decompose `self` relative to the direction of `other`.
    ///
    /// `par` is the signed component along `other`'s unit vector and `per`
    /// the magnitude of what remains.
    pub fn project(&self, other: &Vector) -> SwResult<Table<String>> {
        let uv = other.unit_vector();
        let par = self.dot_values(&uv)?;
        let rx = &self.x() - &(&uv.x() * &par);
        let ry = &self.y() - &(&uv.y() * &par);
        let rz = &self.z() - &(&uv.z() * &par);
        let per = Zip::from(&rx)
            .and(&ry)
            .and(&rz)
            .map_collect(|&x, &y, &z| (x * x + y * y + z * z).sqrt());
        Table::from_columns(
            Arc::clone(self.index()),
            vec![("par".to_string(), par), ("per".to_string(), per)],
        )
    }

    /// Cosine of the angle between `self` and `other`.
    pub fn cos_theta(&self, other: &Vector) -> SwResult<Series> {
        self.unit_vector().dot(&other.unit_vector())
    }

    /// Component-wise combination with another vector on the same index.
    pub fn zip_with(&self, other: &Vector, f: impl Fn(f64, f64) -> f64) -> SwResult<Vector> {
        Ok(Vector {
            table: self.table.zip_with(&other.table, f)?,
        })
    }

    /// Component-wise sum; fails on an index mismatch.
    pub fn try_add(&self, other: &Vector) -> SwResult<Vector> {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn try_sub(&self, other: &Vector) -> SwResult<Vector> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Multiply every component by an index-aligned per-row factor.
    pub fn scale_rows(&self, factor: &Series) -> SwResult<Vector> {
        Ok(Vector {
            table: self.table.scale_rows(factor)?,
        })
    }

    pub fn scale(&self, factor: f64) -> Vector {
        Vector {
            table: self.table.map(|v| v * factor),
        }
    }
}

/// Magnetic field vector in nT.
#[derive(Debug, Clone, PartialEq)]
pub struct BField {
    vector: Vector,
}

impl BField {
    pub fn new(table: &Table<String>) -> SwResult<Self> {
        Ok(BField {
            vector: Vector::new(table)?,
        })
    }

    pub fn from_vector(vector: Vector) -> Self {
        BField { vector }
    }

    pub fn as_vector(&self) -> &Vector {
        &self.vector
    }

    /// Magnetic pressure |B|²/(2 μ0), pPa.
    pub fn pressure(&self) -> Series {
        let coeff = units::B * units::B / (2.0 * MU0 * units::PRESSURE);
        self.vector.magnitude().map(|b| coeff * b * b)
    }
}

impl Deref for BField {
    type Target = Vector;

    fn deref(&self) -> &Vector {
        &self.vector
    }
}
