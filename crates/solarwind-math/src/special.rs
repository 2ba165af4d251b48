// ─────────────────────────────────────────────────────────────────────
// SCPN Solar Wind — Special Functions
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Error function and the Coulomb longitudinal diffusion rate.
//!
//! erf uses its Maclaurin series for |x| < 3 and the Laplace continued
//! fraction for erfc beyond; both are good to ~1e-15, which the collision
//! rate needs because it subtracts two nearly equal terms at small drift.

use std::f64::consts::PI;

/// |x| below which erf is summed as a power series.
const SERIES_LIMIT: f64 = 3.0;
/// Terms of the backward-evaluated erfc continued fraction.
const CF_TERMS: usize = 60;
/// Drift ratio below which the diffusion rate uses its own series.
const RATE_SERIES_LIMIT: f64 = 1.0;
const MAX_SERIES_TERMS: usize = 200;

/// Error function.
pub fn erf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let ax = x.abs();
    let value = if ax < SERIES_LIMIT {
        erf_series(ax)
    } else {
        1.0 - erfc_continued_fraction(ax)
    };
    value.copysign(x)
}

/// Complementary error function, 1 - erf(x).
pub fn erfc(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x >= SERIES_LIMIT {
        erfc_continued_fraction(x)
    } else if x <= -SERIES_LIMIT {
        2.0 - erfc_continued_fraction(-x)
    } else {
        1.0 - erf(x)
    }
}

fn erf_series(x: f64) -> f64 {
    // erf(x) = 2/sqrt(pi) * sum (-1)^n x^(2n+1) / (n! (2n+1))
    let x2 = x * x;
    let mut term = x;
    let mut sum = x;
    for n in 1..MAX_SERIES_TERMS {
        term *= -x2 / n as f64;
        let contrib = term / (2 * n + 1) as f64;
        sum += contrib;
        if contrib.abs() < 1e-17 * sum.abs() {
            break;
        }
    }
    2.0 / PI.sqrt() * sum
}

fn erfc_continued_fraction(x: f64) -> f64 {
    // erfc(x) = exp(-x^2)/sqrt(pi) * 1/(x + (1/2)/(x + 1/(x + (3/2)/(x + ...))))
    let mut t = x;
    for n in (1..=CF_TERMS).rev() {
        t = x + (n as f64 / 2.0) / t;
    }
    (-x * x).exp() / (PI.sqrt() * t)
}

/// Longitudinal diffusion rate of a test particle drifting at `x` thermal
/// speeds through a Maxwellian field population:
///
/// Φ(x) = erf(x)/x³ − 2 exp(−x²)/(√π x²)
///
/// Finite at x = 0, where Φ(0) = 4/(3√π). Symmetric in x.
pub fn longitudinal_diffusion_rate(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let ax = x.abs();
    if ax < RATE_SERIES_LIMIT {
        // Φ(x) = 4/sqrt(pi) * sum (-1)^k x^(2k) / (k! (2k+3))
        let x2 = ax * ax;
        let mut term = 1.0;
        let mut sum = 1.0 / 3.0;
        for k in 1..MAX_SERIES_TERMS {
            term *= -x2 / k as f64;
            let contrib = term / (2 * k + 3) as f64;
            sum += contrib;
            if contrib.abs() < 1e-17 * sum.abs() {
                break;
            }
        }
        4.0 / PI.sqrt() * sum
    } else {
        erf(ax) / ax.powi(3) - 2.0 * (-ax * ax).exp() / (PI.sqrt() * ax * ax)
    }
}
