// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::logging::LogConfig;
use serde::{Deserialize, Serialize};

/// Top-level analysis configuration, read from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Species loaded into the plasma, e.g. `["p1", "p2", "a"]`.
    pub species: Vec<String>,
    /// Spacecraft position frame ("GSE" or "HCI") when trajectory data is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacecraft_frame: Option<String>,
    #[serde(default)]
    pub turbulence: TurbulenceConfig,
    #[serde(default)]
    pub collisions: CollisionConfig,
    #[serde(default)]
    pub logging: LogConfig,
}

/// Rolling-mean settings for the Alfvénic turbulence decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurbulenceConfig {
    /// Window length in rows.
    #[serde(default = "default_window")]
    pub window: usize,
    /// Minimum number of finite rows for a window mean; defaults to `window`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_periods: Option<usize>,
}

fn default_window() -> usize {
    15
}

impl TurbulenceConfig {
    pub fn new(window: usize, min_periods: Option<usize>) -> Self {
        TurbulenceConfig {
            window,
            min_periods,
        }
    }

    pub fn effective_min_periods(&self) -> usize {
        self.min_periods.unwrap_or(self.window)
    }
}

impl Default for TurbulenceConfig {
    fn default() -> Self {
        TurbulenceConfig {
            window: default_window(),
            min_periods: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionConfig {
    /// Symmetrised two-ion rate instead of the test-on-field rate.
    #[serde(default = "default_both_species")]
    pub both_species: bool,
}

fn default_both_species() -> bool {
    true
}

impl Default for CollisionConfig {
    fn default() -> Self {
        CollisionConfig {
            both_species: default_both_species(),
        }
    }
}

impl AnalysisConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> crate::error::SwResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> crate::error::SwResult<Self> {
        let config: Self = serde_json::from_str(contents)?;
        if config.turbulence.window == 0 {
            return Err(crate::error::SolarWindError::SchemaViolation(
                "turbulence.window must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }
}
