// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Rolling Statistics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Trailing rolling-window statistics over NaN-bearing series.

use ndarray::{Array1, ArrayView1};

/// Trailing rolling mean.
///
/// `out[i]` is the mean of the finite values among rows `i + 1 - window ..= i`.
/// Rows whose window holds fewer than `min_periods` finite values are NaN,
/// as are rows before the window has `min_periods` rows to look at.
/// `min_periods == 0` is treated as 1.
pub fn rolling_mean(values: ArrayView1<f64>, window: usize, min_periods: usize) -> Array1<f64> {
    let n = values.len();
    let mut out = Array1::from_elem(n, f64::NAN);
    if window == 0 {
        return out;
    }
    let min_periods = min_periods.clamp(1, window);

    let mut sum = 0.0;
    let mut count = 0usize;
    for i in 0..n {
        let v = values[i];
        if v.is_finite() {
            sum += v;
            count += 1;
        }
        if i >= window {
            let old = values[i - window];
            if old.is_finite() {
                sum -= old;
                count -= 1;
            }
        }
        if count >= min_periods {
            out[i] = sum / count as f64;
        }
    }
    out
}

/// `values - rolling_mean(values)`: the fluctuating part of a series.
pub fn fluctuations(values: ArrayView1<f64>, window: usize, min_periods: usize) -> Array1<f64> {
    let mean = rolling_mean(values, window, min_periods);
    &values - &mean
}
