// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Solar-wind plasma containers.
//!
//! Layer 1: schema, vectors and tensors
//! Layer 2: ions and spacecraft
//! Layer 3: plasma physics and Alfvénic turbulence

pub mod alfvenic_turbulence;
pub mod ion;
pub mod plasma;
pub mod schema;
pub mod spacecraft;
pub mod tensor;
pub mod vector;

pub use alfvenic_turbulence::AlfvenicTurbulence;
pub use ion::Ion;
pub use plasma::{Plasma, SpeciesValue, TurbulenceVelocity};
pub use spacecraft::{Frame, Spacecraft};
pub use tensor::Tensor;
pub use vector::{BField, Vector};
