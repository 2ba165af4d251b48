// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Property-Based Tests (proptest) for solarwind-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for solarwind-types using proptest.
//!
//! Covers: species conforming, table construction invariants, NaN-aware
//! equality.

use chrono::{TimeZone, Utc};
use ndarray::Array1;
use proptest::prelude::*;
use solarwind_types::species::{conform_species, split_composite, split_two_part};
use solarwind_types::table::{time_index, ColumnKey, Series, Table};

const CODES: [&str; 6] = ["p", "p1", "p2", "a", "a1", "e"];

fn species_list() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(&CODES[..]), 1..5)
}

// ── Species Algebra ──────────────────────────────────────────────────

proptest! {
    /// Conforming an already conformed list changes nothing.
    #[test]
    fn conform_is_idempotent(list in species_list()) {
        let once = conform_species(&list).unwrap();
        let twice = conform_species(&once).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// A comma-joined string and the separate entries conform identically.
    #[test]
    fn comma_string_equals_separate_entries(list in species_list()) {
        let joined = list.join(",");
        let from_string = conform_species(&[joined.as_str()]).unwrap();
        let from_list = conform_species(&list).unwrap();
        prop_assert_eq!(from_string, from_list);
    }

    /// Conformed output is sorted.
    #[test]
    fn conform_output_sorted(list in species_list()) {
        let out = conform_species(&list).unwrap();
        for w in out.windows(2) {
            prop_assert!(w[0] <= w[1]);
        }
    }

    /// Composite species split into exactly their constituents.
    #[test]
    fn composite_split_roundtrip(list in species_list()) {
        let composite = list.join("+");
        let parts = split_composite(&composite).unwrap();
        prop_assert_eq!(parts, list);
    }

    /// More than one comma is always rejected by the two-part syntax.
    #[test]
    fn two_part_rejects_extra_commas(list in prop::collection::vec(prop::sample::select(&CODES[..]), 3..6)) {
        let joined = list.join(",");
        prop_assert!(split_two_part(&joined).is_err());
    }
}

// ── Table Invariants ─────────────────────────────────────────────────

proptest! {
    /// Table dimensions match the inputs and values round-trip per column.
    #[test]
    fn table_columns_roundtrip(
        nrows in 1usize..40,
        ncols in 1usize..6,
    ) {
        let t0 = Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap();
        let index = time_index(
            (0..nrows).map(|i| t0 + chrono::Duration::seconds(60 * i as i64)).collect(),
        ).unwrap();
        let columns: Vec<(ColumnKey, Array1<f64>)> = (0..ncols)
            .map(|j| {
                let key = ColumnKey::new("n", "", &format!("s{j}"));
                let col = Array1::from_shape_fn(nrows, |i| (i * ncols + j) as f64);
                (key, col)
            })
            .collect();
        let table = Table::from_columns(index, columns.clone()).unwrap();

        prop_assert_eq!(table.nrows(), nrows);
        prop_assert_eq!(table.ncols(), ncols);
        for (key, col) in &columns {
            let got = table.require(key).unwrap();
            prop_assert_eq!(got.to_vec(), col.to_vec());
        }
    }

    /// A NaN at the same position in both series does not break equality.
    #[test]
    fn series_equality_with_nan(nrows in 2usize..30, nan_at in 0usize..30) {
        let t0 = Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap();
        let index = time_index(
            (0..nrows).map(|i| t0 + chrono::Duration::seconds(i as i64)).collect(),
        ).unwrap();
        let mut values = Array1::from_shape_fn(nrows, |i| i as f64);
        values[nan_at % nrows] = f64::NAN;
        let a = Series::new(index.clone(), values.clone()).unwrap();
        let b = Series::new(index, values).unwrap();
        prop_assert_eq!(a, b);
    }
}
