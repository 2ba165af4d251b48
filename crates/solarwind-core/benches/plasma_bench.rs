// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Plasma Benchmark
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use ndarray::Array1;
use rand::{Rng, SeedableRng};
use solarwind_core::{Plasma, TurbulenceVelocity};
use solarwind_types::config::TurbulenceConfig;
use solarwind_types::table::{time_index, ColumnKey, Table};
use std::hint::black_box;

/// One day of 92 s spectra for p1 and a, with noisy moments.
fn day_of_measurements() -> Table<ColumnKey> {
    let n = 940;
    let t0 = Utc.with_ymd_and_hms(2012, 3, 1, 0, 0, 0).unwrap();
    let index = time_index(
        (0..n)
            .map(|i| t0 + chrono::Duration::seconds(92 * i as i64))
            .collect(),
    )
    .expect("monotonic index");

    let mut rng = rand::rngs::StdRng::seed_from_u64(92);
    let mut noisy = |mean: f64, spread: f64| -> Array1<f64> {
        Array1::from_shape_fn(n, |_| mean + spread * rng.gen_range(-1.0..1.0))
    };
    let mut columns = vec![
        (ColumnKey::new("b", "x", ""), noisy(-3.0, 2.0)),
        (ColumnKey::new("b", "y", ""), noisy(3.0, 2.0)),
        (ColumnKey::new("b", "z", ""), noisy(0.0, 2.0)),
    ];
    for (s, density, speed, w) in [("p1", 5.0, -400.0, 30.0), ("a", 0.2, -420.0, 45.0)] {
        columns.push((ColumnKey::new("n", "", s), noisy(density, 0.2 * density)));
        columns.push((ColumnKey::new("v", "x", s), noisy(speed, 30.0)));
        columns.push((ColumnKey::new("v", "y", s), noisy(0.0, 20.0)));
        columns.push((ColumnKey::new("v", "z", s), noisy(0.0, 20.0)));
        columns.push((ColumnKey::new("w", "par", s), noisy(w, 5.0)));
        columns.push((ColumnKey::new("w", "per", s), noisy(w, 5.0)));
    }
    Table::from_columns(index, columns).expect("valid table")
}

fn bench_plasma(c: &mut Criterion) {
    let raw = day_of_measurements();
    let plasma = Plasma::new(&raw, &["p1", "a"], None, None).expect("plasma");
    let mut group = c.benchmark_group("plasma_day");

    group.bench_function("construct", |b| {
        b.iter(|| black_box(Plasma::new(&raw, &["p1", "a"], None, None).expect("plasma")))
    });

    group.bench_function("beta_composite", |b| {
        b.iter(|| black_box(plasma.beta(&["a+p1"]).expect("beta")))
    });

    group.bench_function("dynamic_pressure", |b| {
        b.iter(|| black_box(plasma.dynamic_pressure(&["a", "p1"], false).expect("pdyn")))
    });

    group.bench_function("collision_frequency", |b| {
        b.iter(|| black_box(plasma.collision_frequency("a", "p1", true).expect("nu")))
    });

    group.bench_function("alfvenic_turbulence", |b| {
        let config = TurbulenceConfig::default();
        b.iter(|| {
            let turb = plasma
                .build_alfvenic_turbulence("p1", &TurbulenceVelocity::CenterOfMass, &config)
                .expect("turbulence");
            black_box(turb.normalized_cross_helicity().expect("sigma_c"))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_plasma);
criterion_main!(benches);
