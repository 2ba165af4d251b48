// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Errors
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolarWindError {
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    #[error(
        "Requested species unavailable.\nRequested: {requested:?}\nAvailable: {available:?}\nUnavailable: {unavailable:?}"
    )]
    SpeciesUnavailable {
        requested: Vec<String>,
        available: Vec<String>,
        unavailable: Vec<String>,
    },

    #[error("Ambiguous operation: {0}")]
    AmbiguousOperation(String),

    #[error("Missing collaborator: {0}")]
    MissingCollaborator(String),

    #[error("Index mismatch: {0}")]
    IndexMismatch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Archive error: {0}")]
    Archive(String),
}

pub type SwResult<T> = Result<T, SolarWindError>;

impl SolarWindError {
    /// Build a [`SolarWindError::SpeciesUnavailable`] from the requested and
    /// available sets. `unavailable` is derived, sorted and de-duplicated.
    pub fn species_unavailable<R, A>(requested: R, available: A) -> Self
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        let requested: Vec<String> = requested
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        let available: Vec<String> = available
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        let mut unavailable: Vec<String> = requested
            .iter()
            .flat_map(|s| s.split('+'))
            .filter(|s| !available.iter().any(|a| a == s))
            .map(str::to_string)
            .collect();
        unavailable.sort();
        unavailable.dedup();
        SolarWindError::SpeciesUnavailable {
            requested,
            available,
            unavailable,
        }
    }
}
