// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Physical constants (SI) and per-species lookup tables.
//!
//! Everything here is immutable. Species-dependent values are resolved
//! through [`species_entry`] so that an unknown code fails loudly instead
//! of silently picking a default.

use crate::error::{SolarWindError, SwResult};

/// Vacuum permeability (H/m).
pub const MU0: f64 = 1.256_637_062_12e-6;

/// Vacuum permittivity (F/m).
pub const EPS0: f64 = 8.854_187_812_8e-12;

/// Elementary charge (C).
pub const E_CHARGE: f64 = 1.602_176_634e-19;

/// Boltzmann constant (J/K).
pub const K_BOLTZMANN: f64 = 1.380_649e-23;

/// Boltzmann constant (eV/K), used by the Coulomb logarithm.
pub const K_BOLTZMANN_EV: f64 = K_BOLTZMANN / E_CHARGE;

/// Proton mass (kg).
pub const M_PROTON: f64 = 1.672_621_923_69e-27;

/// Electron mass (kg).
pub const M_ELECTRON: f64 = 9.109_383_701_5e-31;

/// Alpha particle mass (kg).
pub const M_ALPHA: f64 = 6.644_657_335_7e-27;

/// Unified atomic mass unit (kg).
pub const AMU: f64 = 1.660_539_066_60e-27;

/// Mean equatorial Earth radius (km).
pub const EARTH_RADIUS_KM: f64 = 6_378.136_6;

/// Nominal solar radius (km).
pub const SUN_RADIUS_KM: f64 = 695_700.0;

/// Astronomical unit (km).
pub const AU_KM: f64 = 149_597_870.7;

/// Adiabatic index for a three-degree-of-freedom gas.
pub const POLYTROPIC_INDEX_SCALAR: f64 = 5.0 / 3.0;

/// Mass and charge state of one particle species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesEntry {
    pub code: &'static str,
    pub mass_kg: f64,
    pub charge_state: f64,
}

/// Every species code the model knows about.
///
/// `p1`/`p2` are proton core and beam, `a1`/`a2` the alpha counterparts.
pub const SPECIES_TABLE: &[SpeciesEntry] = &[
    SpeciesEntry {
        code: "p",
        mass_kg: M_PROTON,
        charge_state: 1.0,
    },
    SpeciesEntry {
        code: "p1",
        mass_kg: M_PROTON,
        charge_state: 1.0,
    },
    SpeciesEntry {
        code: "p2",
        mass_kg: M_PROTON,
        charge_state: 1.0,
    },
    SpeciesEntry {
        code: "a",
        mass_kg: M_ALPHA,
        charge_state: 2.0,
    },
    SpeciesEntry {
        code: "a1",
        mass_kg: M_ALPHA,
        charge_state: 2.0,
    },
    SpeciesEntry {
        code: "a2",
        mass_kg: M_ALPHA,
        charge_state: 2.0,
    },
    SpeciesEntry {
        code: "he",
        mass_kg: 4.002_602 * AMU,
        charge_state: 1.0,
    },
    SpeciesEntry {
        code: "o6",
        mass_kg: 15.999 * AMU,
        charge_state: 6.0,
    },
    SpeciesEntry {
        code: "c5",
        mass_kg: 12.011 * AMU,
        charge_state: 5.0,
    },
    SpeciesEntry {
        code: "fe10",
        mass_kg: 55.845 * AMU,
        charge_state: 10.0,
    },
    SpeciesEntry {
        code: "e",
        mass_kg: M_ELECTRON,
        charge_state: -1.0,
    },
];

/// Look up a single (atomic) species code.
pub fn species_entry(species: &str) -> SwResult<&'static SpeciesEntry> {
    SPECIES_TABLE
        .iter()
        .find(|entry| entry.code == species)
        .ok_or_else(|| {
            SolarWindError::species_unavailable(
                [species],
                SPECIES_TABLE.iter().map(|entry| entry.code),
            )
        })
}

pub fn is_known_species(species: &str) -> bool {
    SPECIES_TABLE.iter().any(|entry| entry.code == species)
}

/// Species mass (kg).
pub fn mass(species: &str) -> SwResult<f64> {
    Ok(species_entry(species)?.mass_kg)
}

/// Species mass in units of the proton mass.
pub fn mass_in_mp(species: &str) -> SwResult<f64> {
    Ok(species_entry(species)?.mass_kg / M_PROTON)
}

/// Signed charge state in units of the elementary charge.
pub fn charge_state(species: &str) -> SwResult<f64> {
    Ok(species_entry(species)?.charge_state)
}

/// sqrt(m/q) with m in proton masses and q in elementary charges.
pub fn sqrt_mass_per_charge(species: &str) -> SwResult<f64> {
    let entry = species_entry(species)?;
    Ok(((entry.mass_kg / M_PROTON) / entry.charge_state.abs()).sqrt())
}

/// Polytropic index per pressure component: par = 3, per = 2, scalar = 5/3.
pub fn polytropic_index(component: &str) -> SwResult<f64> {
    match component {
        "par" => Ok(3.0),
        "per" => Ok(2.0),
        "scalar" => Ok(POLYTROPIC_INDEX_SCALAR),
        other => Err(SolarWindError::SchemaViolation(format!(
            "No polytropic index for component '{other}'"
        ))),
    }
}
