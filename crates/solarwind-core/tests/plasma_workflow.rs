// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — End-to-End Plasma Workflow
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Config → plasma → derived quantities → archive, on a synthetic day of
//! 92 s spectra with proton core, proton beam and alphas.

use chrono::{TimeZone, Utc};
use ndarray::Array1;
use solarwind_core::{Frame, Plasma, Spacecraft, SpeciesValue, TurbulenceVelocity};
use solarwind_types::config::AnalysisConfig;
use solarwind_types::error::SolarWindError;
use solarwind_types::logging::init_logging;
use solarwind_types::table::{time_index, ColumnKey, ComponentKey, Table, TimeIndex};
use std::f64::consts::PI;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

const ROWS: usize = 240;

fn temp_path(tag: &str, ext: &str) -> String {
    let epoch_ns = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir()
        .join(format!(
            "solarwind_workflow_{tag}_{}_{}.{ext}",
            std::process::id(),
            epoch_ns
        ))
        .to_str()
        .unwrap()
        .to_string()
}

fn index() -> TimeIndex {
    let t0 = Utc.with_ymd_and_hms(2004, 11, 7, 0, 0, 0).unwrap();
    time_index(
        (0..ROWS)
            .map(|i| t0 + chrono::Duration::seconds(92 * i as i64))
            .collect(),
    )
    .unwrap()
}

fn wave(phase: f64, mean: f64, amplitude: f64) -> Array1<f64> {
    Array1::from_shape_fn(ROWS, |i| {
        mean + amplitude * (2.0 * PI * i as f64 / 37.0 + phase).sin()
    })
}

/// Alfvénic fluctuations: δv ≈ −δb in Alfvén units for anti-sunward B.
fn measurements() -> Table<ColumnKey> {
    let mut columns = vec![
        (ColumnKey::new("b", "x", ""), wave(0.0, -4.0, 1.5)),
        (ColumnKey::new("b", "y", ""), wave(1.0, 3.0, 1.5)),
        (ColumnKey::new("b", "z", ""), wave(2.0, 0.5, 1.0)),
        (ColumnKey::new("quality", "", "p1"), Array1::zeros(ROWS)),
    ];
    for (s, n, v, w) in [("p1", 6.0, -420.0, 28.0), ("p2", 0.4, -470.0, 35.0), ("a", 0.2, -440.0, 45.0)] {
        columns.extend([
            (ColumnKey::new("n", "", s), wave(0.3, n, 0.1 * n)),
            (ColumnKey::new("v", "x", s), wave(0.0, v, 20.0)),
            (ColumnKey::new("v", "y", s), wave(1.0, 0.0, 20.0)),
            (ColumnKey::new("v", "z", s), wave(2.0, 0.0, 12.0)),
            (ColumnKey::new("w", "par", s), wave(0.5, w * 1.2, 2.0)),
            (ColumnKey::new("w", "per", s), wave(0.5, w, 2.0)),
        ]);
    }
    Table::from_columns(index(), columns).unwrap()
}

fn spacecraft() -> Spacecraft {
    let table = Table::from_columns(
        index(),
        vec![
            (ComponentKey::new("pos", "x"), Array1::from_elem(ROWS, 212.0)),
            (ComponentKey::new("pos", "y"), Array1::from_elem(ROWS, 30.0)),
            (ComponentKey::new("pos", "z"), Array1::from_elem(ROWS, -8.0)),
            (ComponentKey::new("carr", "lat"), Array1::from_elem(ROWS, 3.5)),
            (ComponentKey::new("carr", "lon"), Array1::linspace(120.0, 107.0, ROWS)),
        ],
    )
    .unwrap();
    Spacecraft::new(&table, "stereo-a", Frame::Hci).unwrap()
}

fn config() -> AnalysisConfig {
    let path = temp_path("config", "json");
    std::fs::write(
        &path,
        r#"{
            "species": ["p1", "p2", "a"],
            "spacecraft_frame": "hci",
            "turbulence": {"window": 15},
            "collisions": {"both_species": true},
            "logging": {"level": "warn", "compact": true}
        }"#,
    )
    .unwrap();
    let config = AnalysisConfig::from_file(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    config
}

#[test]
fn full_workflow() {
    let config = config();
    let _ = init_logging(&config.logging);

    let mut plasma = Plasma::from_config(&measurements(), &config, Some(spacecraft()), None).unwrap();
    assert_eq!(plasma.species(), &["a", "p1", "p2"]);
    assert!(plasma
        .ingest_report()
        .dropped
        .contains(&ColumnKey::new("quality", "", "p1")));

    // Protons as a composite of core and beam.
    let n_p = plasma.number_density(&["p1+p2"]).unwrap().into_single().unwrap();
    assert!((n_p.values()[0] - (6.0 + 0.4) * (1.0 + 0.1 * 0.3f64.sin())).abs() < 1e-9);
    assert!(matches!(
        plasma.thermal_speed(&["p1+p2"]),
        Err(SolarWindError::AmbiguousOperation(_))
    ));

    // Beam drift along the field and the resulting heat flux.
    let drift = plasma.differential_flow("p2", "p1", false).unwrap();
    assert!(drift.x().iter().all(|v| (v + 50.0).abs() < 1e-9));
    let q = plasma.heat_flux(&["p1", "p2", "a"]).unwrap();
    assert!(q.values().iter().all(|v| v.is_finite()));

    // Firehose factor with and without the drift pressure.
    let afsq = plasma
        .anisotropy_factor_squared(&["p1+p2+a"], true)
        .unwrap()
        .into_single()
        .unwrap();
    assert_eq!(afsq.len(), ROWS);

    // Electrons close the charge and current balance.
    plasma.estimate_electrons_inplace().unwrap();
    let ne = plasma.number_density(&["e"]).unwrap().into_single().unwrap();
    let charge = plasma.number_density(&["p1+p2"]).unwrap().into_single().unwrap();
    let alphas = plasma.number_density(&["a"]).unwrap().into_single().unwrap();
    for i in 0..ROWS {
        let expected = charge.values()[i] + 2.0 * alphas.values()[i];
        assert!((ne.values()[i] - expected).abs() < 1e-9);
    }

    // Collisional age needs the HCI trajectory.
    let nc = plasma
        .coulomb_number("p1", "a", config.collisions.both_species)
        .unwrap();
    assert!(nc.values().iter().all(|v| v.is_finite() && *v > 0.0));

    // Turbulence over the proton core with the total ion density.
    let turb = plasma
        .build_alfvenic_turbulence("p1,p1+p2+a", &TurbulenceVelocity::CenterOfMass, &config.turbulence)
        .unwrap();
    let sigma_c = turb.normalized_cross_helicity().unwrap();
    let window = config.turbulence.window;
    assert!(sigma_c.values().iter().take(window - 1).all(|v| v.is_nan()));
    assert!(sigma_c
        .values()
        .iter()
        .skip(window)
        .all(|v| v.abs() <= 1.0 + 1e-12));

    // Archive round-trip keeps species, trajectory and values.
    let path = temp_path("archive", "npz");
    plasma.save(&path).unwrap();
    let loaded = Plasma::load_from_file(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded, plasma);
    assert_eq!(loaded.spacecraft().unwrap().frame(), Frame::Hci);
    assert!(loaded.spacecraft().unwrap().carrington().unwrap().is_some());

    // Dropping the beam leaves a consistent three-species plasma.
    let trimmed = loaded.drop_species(&["p2"]).unwrap();
    assert_eq!(trimmed.species(), &["a", "e", "p1"]);
    match trimmed.temperature(&["p1", "a"]).unwrap() {
        SpeciesValue::PerSpecies(map) => assert_eq!(map.len(), 2),
        SpeciesValue::Single(_) => panic!("expected per-species temperatures"),
    }
}

#[test]
fn spacecraft_on_another_clock_is_rejected() {
    let mut epochs: Vec<_> = index().iter().copied().collect();
    epochs[ROWS - 1] += chrono::Duration::seconds(1);
    let shifted = time_index(epochs).unwrap();
    let table = Table::from_columns(
        Arc::clone(&shifted),
        vec![
            (ComponentKey::new("pos", "x"), Array1::from_elem(ROWS, 1.0)),
            (ComponentKey::new("pos", "y"), Array1::from_elem(ROWS, 0.0)),
            (ComponentKey::new("pos", "z"), Array1::from_elem(ROWS, 0.0)),
        ],
    )
    .unwrap();
    let sc = Spacecraft::new(&table, "ace", Frame::Gse).unwrap();
    assert!(matches!(
        Plasma::new(&measurements(), &["p1"], Some(sc), None),
        Err(SolarWindError::IndexMismatch(_))
    ));
}
