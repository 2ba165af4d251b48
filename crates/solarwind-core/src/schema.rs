// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Component Schemas
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Fixed component vocabularies that turn a generic `Table<String>` into a
//! vector or a tensor.

use solarwind_types::error::{SolarWindError, SwResult};
use solarwind_types::table::Table;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// Cartesian {x, y, z}.
    Vector,
    /// Pressure-like {par, per, scalar}.
    Tensor,
}

impl Schema {
    pub fn components(self) -> &'static [&'static str] {
        match self {
            Schema::Vector => &["x", "y", "z"],
            Schema::Tensor => &["par", "per", "scalar"],
        }
    }

    /// Check `table` carries exactly this schema's components and return it
    /// with the columns in canonical order.
    pub fn conform(self, table: &Table<String>) -> SwResult<Table<String>> {
        let wanted = self.components();
        let missing: Vec<&str> = wanted
            .iter()
            .copied()
            .filter(|c| !table.contains(&c.to_string()))
            .collect();
        if !missing.is_empty() {
            return Err(SolarWindError::SchemaViolation(format!(
                "{self:?} requires columns {wanted:?}; missing {missing:?}"
            )));
        }
        let extra: Vec<&String> = table
            .columns()
            .iter()
            .filter(|c| !wanted.contains(&c.as_str()))
            .collect();
        if !extra.is_empty() {
            return Err(SolarWindError::SchemaViolation(format!(
                "{self:?} accepts only {wanted:?}; unexpected {extra:?}"
            )));
        }
        let mut columns = Vec::with_capacity(wanted.len());
        for c in wanted {
            let key = c.to_string();
            let col = table.require(&key)?.to_owned();
            columns.push((key, col));
        }
        Table::from_columns(Arc::clone(table.index()), columns)
    }
}
