//! Bessel functions of the first kind for integer order, and their positive zeros.

use std::f64::consts::PI;

/// Highest order `bessel_j_zero` will search.
pub const MAX_BESSEL_ORDER: u32 = 100;

/// Highest zero index `bessel_j_zero` will search.
pub const MAX_ZERO_INDEX: u32 = 200;

const SERIES_LIMIT: f64 = 1.0;
const RESCALE_ABOVE: f64 = 1e10;
const RESCALE_BY: f64 = 1e-10;
const SCAN_STEP: f64 = 0.25;

/// `J_order(x)`.
///
/// Uses the power series below `|x| = 1` and Miller's backward recurrence (normalized by
/// `J_0 + 2·ΣJ_2k = 1`) elsewhere. Cost is `O(order + |x|)`.
pub fn bessel_j(order: u32, x: f64) -> f64 {
    if x == 0.0 {
        return if order == 0 { 1.0 } else { 0.0 };
    }
    let ax = x.abs();
    let v = if ax < SERIES_LIMIT {
        series(order, ax)
    } else {
        backward_recurrence(order as usize, ax)
    };
    // J_n(-x) = (-1)^n J_n(x)
    if x < 0.0 && order % 2 == 1 { -v } else { v }
}

fn series(order: u32, x: f64) -> f64 {
    let half = 0.5 * x;
    let mut term = 1.0;
    for i in 1..=order {
        term *= half / f64::from(i);
    }
    let mut sum = term;
    let q = half * half;
    for k in 1..64u32 {
        term *= -q / (f64::from(k) * f64::from(k + order));
        sum += term;
        if term.abs() <= f64::EPSILON * sum.abs() {
            break;
        }
    }
    sum
}

fn backward_recurrence(order: usize, x: f64) -> f64 {
    let top = order.max(x.ceil() as usize) + 16;
    let start = 2 * ((top + (40.0 * top as f64).sqrt() as usize) / 2);
    let two_over_x = 2.0 / x;

    let mut above = 0.0; // J_{j+1}
    let mut here = 1.0; // J_j
    let mut even_sum = 0.0;
    let mut value = 0.0;
    for j in (1..=start).rev() {
        let below = j as f64 * two_over_x * here - above;
        above = here;
        here = below;
        if here.abs() > RESCALE_ABOVE {
            here *= RESCALE_BY;
            above *= RESCALE_BY;
            even_sum *= RESCALE_BY;
            value *= RESCALE_BY;
        }
        let idx = j - 1;
        if idx == order {
            value = here;
        }
        if idx > 0 && idx % 2 == 0 {
            even_sum += here;
        }
    }
    value / (here + 2.0 * even_sum)
}

/// The `nth` positive zero (1-based) of `J_order`.
///
/// Returns `None` for `nth == 0`, for orders or indices beyond [`MAX_BESSEL_ORDER`] /
/// [`MAX_ZERO_INDEX`], and when the bracketing scan runs past its search window.
pub fn bessel_j_zero(order: u32, nth: u32) -> Option<f64> {
    if nth == 0 || order > MAX_BESSEL_ORDER || nth > MAX_ZERO_INDEX {
        return None;
    }

    // J_m is positive on (0, m] for m >= 1 since the first zero lies above m.
    let m = f64::from(order);
    let limit = m + (f64::from(nth) + 0.5 * m + 2.0) * PI;
    let mut a = m.max(SCAN_STEP);
    let mut fa = bessel_j(order, a);
    let mut seen = 0u32;
    while a < limit {
        let b = a + SCAN_STEP;
        let fb = bessel_j(order, b);
        if (fa < 0.0) != (fb < 0.0) {
            seen += 1;
            if seen == nth {
                return Some(bisect(order, a, b));
            }
        }
        a = b;
        fa = fb;
    }
    None
}

fn bisect(order: u32, mut lo: f64, mut hi: f64) -> f64 {
    let lo_negative = bessel_j(order, lo) < 0.0;
    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        if hi - lo <= 1e-14 * mid.max(1.0) {
            break;
        }
        if (bessel_j(order, mid) < 0.0) == lo_negative {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/bessel.rs"]
mod tests;
