// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Species Algebra
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Species strings.
//!
//! * `"p1"` — one population.
//! * `"p1+a"` — a summed/composite population; must be the only argument.
//! * `"p1,a"` — shorthand for the two independent arguments `"p1"`, `"a"`.

use crate::error::{SolarWindError, SwResult};

/// Separator joining species into a summed group.
pub const SUM: char = '+';
/// Separator between independent species groups.
pub const LIST: char = ',';

/// Normalise a species argument list.
///
/// A single comma-joined entry is split into its parts. Multiple entries may
/// not contain commas, and a composite (`+`) entry must be the only entry.
/// The result is sorted and free of repeats. Conforming an already conformed
/// list is a no-op.
pub fn conform_species<S: AsRef<str>>(species: &[S]) -> SwResult<Vec<String>> {
    if species.is_empty() {
        return Err(SolarWindError::SchemaViolation(
            "At least one species is required".to_string(),
        ));
    }

    let mut out: Vec<String> = if species.len() == 1 {
        species[0]
            .as_ref()
            .split(LIST)
            .map(str::to_string)
            .collect()
    } else {
        if let Some(bad) = species.iter().find(|s| s.as_ref().contains(LIST)) {
            return Err(SolarWindError::SchemaViolation(format!(
                "Species '{}' contains '{LIST}' but {} species were given; \
                 pass either one comma-joined string or separate species",
                bad.as_ref(),
                species.len()
            )));
        }
        species.iter().map(|s| s.as_ref().to_string()).collect()
    };

    for s in &out {
        split_composite(s)?;
    }

    if out.len() > 1 {
        if let Some(composite) = out.iter().find(|s| s.contains(SUM)) {
            return Err(SolarWindError::SchemaViolation(format!(
                "Composite species '{composite}' must be passed alone, got {out:?}"
            )));
        }
    }

    out.sort();
    out.dedup();
    Ok(out)
}

/// Atomic constituents of a (possibly composite) species, in given order.
pub fn split_composite(species: &str) -> SwResult<Vec<&str>> {
    if species.contains(LIST) {
        return Err(SolarWindError::SchemaViolation(format!(
            "Species '{species}' is a list, not a single (composite) species"
        )));
    }
    let parts: Vec<&str> = species.split(SUM).collect();
    if parts.iter().any(|p| p.is_empty() || p.trim() != *p) {
        return Err(SolarWindError::SchemaViolation(format!(
            "Malformed species '{species}'"
        )));
    }
    Ok(parts)
}

pub fn is_composite(species: &str) -> bool {
    species.contains(SUM)
}

/// Split the two-part `"<velocity>,<density>"` syntax.
///
/// At most one comma is allowed. Without a comma both parts are the same
/// species expression.
pub fn split_two_part(species: &str) -> SwResult<(String, String)> {
    let n_commas = species.matches(LIST).count();
    match n_commas {
        0 => {
            split_composite(species)?;
            Ok((species.to_string(), species.to_string()))
        }
        1 => {
            let (first, second) = species.split_once(LIST).ok_or_else(|| {
                SolarWindError::SchemaViolation(format!("Malformed species '{species}'"))
            })?;
            split_composite(first)?;
            split_composite(second)?;
            Ok((first.to_string(), second.to_string()))
        }
        _ => Err(SolarWindError::SchemaViolation(format!(
            "Species '{species}' may contain at most one '{LIST}', found {n_commas}"
        ))),
    }
}
