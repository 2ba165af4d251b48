// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Plasma Ingest
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Raw table → canonical plasma table.

use crate::ion::scalar_thermal_speed;
use ndarray::{Array1, Zip};
use solarwind_types::constants::is_known_species;
use solarwind_types::error::{SolarWindError, SwResult};
use solarwind_types::table::{ColumnKey, Table};
use std::sync::Arc;
use tracing::{debug, warn};

/// What ingest did with each raw column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Columns kept in the canonical table (recomputed `w.scalar` included).
    pub accepted: Vec<ColumnKey>,
    /// Columns outside the recognised vocabulary or for unrequested species.
    pub dropped: Vec<ColumnKey>,
    /// Repeated raw columns; the first occurrence was kept.
    pub duplicates: Vec<ColumnKey>,
}

/// Measurement vocabulary: (M, recognised C values, species-level column).
const VOCABULARY: [(&str, &[&str], bool); 4] = [
    ("n", &[""], true),
    ("v", &["x", "y", "z"], true),
    ("w", &["par", "per", "scalar"], true),
    ("b", &["x", "y", "z"], false),
];

fn is_recognised(key: &ColumnKey, species: &[String]) -> bool {
    VOCABULARY.iter().any(|(m, cs, per_species)| {
        key.m == *m
            && cs.contains(&key.c.as_str())
            && if *per_species {
                species.contains(&key.s) && is_known_species(&key.s)
            } else {
                key.s.is_empty()
            }
    })
}

/// Keep the recognised columns for `species`, recompute `w.scalar` and put
/// the columns in canonical (sorted) order.
pub(super) fn ingest(
    raw: &Table<ColumnKey>,
    species: &[String],
) -> SwResult<(Table<ColumnKey>, IngestReport)> {
    let mut dropped = Vec::new();
    let mut columns: Vec<(ColumnKey, Array1<f64>)> = Vec::with_capacity(raw.ncols());
    for (key, col) in raw.iter_columns() {
        if !is_recognised(key, species) {
            dropped.push(key.clone());
        } else if !(key.m == "w" && key.c == "scalar") {
            columns.push((key.clone(), col.to_owned()));
        }
    }

    for s in species {
        let find = |c: &str| {
            columns
                .iter()
                .find(|(k, _)| k.m == "w" && k.c == c && k.s == *s)
                .map(|(_, v)| v)
        };
        let (Some(par), Some(per)) = (find("par"), find("per")) else {
            return Err(SolarWindError::SchemaViolation(format!(
                "species '{s}' needs w.par and w.per"
            )));
        };
        let scalar = Zip::from(par)
            .and(per)
            .map_collect(|&a, &b| scalar_thermal_speed(a, b));
        columns.push((ColumnKey::new("w", "scalar", s), scalar));
    }

    columns.sort_by(|a, b| a.0.cmp(&b.0));
    let accepted: Vec<ColumnKey> = columns.iter().map(|(k, _)| k.clone()).collect();
    let table = Table::from_columns(Arc::clone(raw.index()), columns)?;

    if !dropped.is_empty() {
        warn!(?dropped, "dropping unrecognised measurement columns");
    }
    debug!(accepted = accepted.len(), dropped = dropped.len(), "ingest complete");

    Ok((
        table,
        IngestReport {
            accepted,
            dropped,
            duplicates: Vec::new(),
        },
    ))
}
