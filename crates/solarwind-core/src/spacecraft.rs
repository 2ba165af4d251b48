// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Spacecraft
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Spacecraft trajectory.
//!
//! Position is in Earth radii for GSE and solar radii for HCI. Velocity is
//! km/s and Carrington coordinates are degrees.

use crate::vector::Vector;
use solarwind_types::constants::{AU_KM, EARTH_RADIUS_KM, SUN_RADIUS_KM};
use solarwind_types::error::{SolarWindError, SwResult};
use solarwind_types::table::{ComponentKey, Series, Table, TimeIndex};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

/// Coordinate frame of the position columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// Geocentric solar ecliptic, Earth radii.
    Gse,
    /// Heliocentric inertial, solar radii.
    Hci,
}

impl FromStr for Frame {
    type Err = SolarWindError;

    fn from_str(s: &str) -> SwResult<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GSE" => Ok(Frame::Gse),
            "HCI" => Ok(Frame::Hci),
            _ => Err(SolarWindError::SchemaViolation(format!(
                "Unknown spacecraft frame '{s}', expected GSE or HCI"
            ))),
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frame::Gse => write!(f, "GSE"),
            Frame::Hci => write!(f, "HCI"),
        }
    }
}

const XYZ: [&str; 3] = ["x", "y", "z"];
const CARRINGTON: [&str; 2] = ["lat", "lon"];

fn is_recognised(key: &ComponentKey) -> bool {
    match key.m.as_str() {
        "pos" | "v" => XYZ.contains(&key.c.as_str()),
        "carr" => CARRINGTON.contains(&key.c.as_str()),
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spacecraft {
    name: String,
    frame: Frame,
    data: Table<ComponentKey>,
}

impl Spacecraft {
    /// Build from an (M, C) table with `pos` {x, y, z} and optionally
    /// `v` {x, y, z} and `carr` {lat, lon}. Other columns are dropped.
    pub fn new(data: &Table<ComponentKey>, name: &str, frame: Frame) -> SwResult<Self> {
        for c in XYZ {
            data.require(&ComponentKey::new("pos", c))?;
        }
        for m in ["v", "carr"] {
            let present: Vec<&str> = data
                .columns()
                .iter()
                .filter(|k| k.m == m && is_recognised(k))
                .map(|k| k.c.as_str())
                .collect();
            let wanted: &[&str] = if m == "v" { &XYZ } else { &CARRINGTON };
            if !present.is_empty() && present.len() != wanted.len() {
                return Err(SolarWindError::SchemaViolation(format!(
                    "Spacecraft '{name}' has partial '{m}' columns {present:?}, expected {wanted:?}"
                )));
            }
        }

        let dropped: Vec<String> = data
            .columns()
            .iter()
            .filter(|k| !is_recognised(k))
            .map(ToString::to_string)
            .collect();
        if !dropped.is_empty() {
            warn!(spacecraft = name, ?dropped, "dropping unrecognised spacecraft columns");
        }

        Ok(Spacecraft {
            name: name.to_string(),
            frame,
            data: data.filter(is_recognised),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn data(&self) -> &Table<ComponentKey> {
        &self.data
    }

    pub fn index(&self) -> &TimeIndex {
        self.data.index()
    }

    fn vector(&self, m: &str) -> SwResult<Vector> {
        let col = |c: &str| -> SwResult<_> {
            Ok(self.data.require(&ComponentKey::new(m, c))?.to_owned())
        };
        Vector::from_components(Arc::clone(self.index()), col("x")?, col("y")?, col("z")?)
    }

    pub fn position(&self) -> SwResult<Vector> {
        self.vector("pos")
    }

    /// Spacecraft velocity, if recorded.
    pub fn velocity(&self) -> SwResult<Option<Vector>> {
        if self.data.contains(&ComponentKey::new("v", "x")) {
            self.vector("v").map(Some)
        } else {
            Ok(None)
        }
    }

    /// Carrington (lat, lon) table, if recorded.
    pub fn carrington(&self) -> SwResult<Option<Table<String>>> {
        if !self.data.contains(&ComponentKey::new("carr", "lat")) {
            return Ok(None);
        }
        self.data
            .relabel(|k| (k.m == "carr").then(|| k.c.clone()))
            .map(Some)
    }

    /// Heliocentric distance, km.
    pub fn distance_to_sun(&self) -> SwResult<Series> {
        let pos = self.position()?;
        let distance = match self.frame {
            Frame::Gse => pos.table().row_reduce(|r| {
                let x = AU_KM - r[0] * EARTH_RADIUS_KM;
                let y = r[1] * EARTH_RADIUS_KM;
                let z = r[2] * EARTH_RADIUS_KM;
                (x * x + y * y + z * z).sqrt()
            }),
            Frame::Hci => pos.magnitude().map(|r| r * SUN_RADIUS_KM),
        };
        Ok(distance)
    }
}
