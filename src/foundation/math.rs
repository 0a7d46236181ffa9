use crate::foundation::error::{WavelabError, WavelabResult};

/// Upper-bound slack when collecting node/antinode positions along a string.
pub const NODE_TOLERANCE: f64 = 1e-5;

/// Guards the strain normalization when `A·k` collapses to zero.
pub const STRAIN_EPSILON: f64 = 1e-9;

/// `n` evenly spaced values from `start` to `end`, both inclusive.
///
/// The last value is `end` exactly, so grids built from it hit the domain boundary.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = end;
            out
        }
    }
}

pub(crate) fn require_positive(parameter: &str, value: f64) -> WavelabResult<f64> {
    if !value.is_finite() {
        return Err(WavelabError::domain(parameter, "must be finite"));
    }
    if value <= 0.0 {
        return Err(WavelabError::domain(
            parameter,
            format!("must be > 0 (got {value})"),
        ));
    }
    Ok(value)
}

pub(crate) fn require_non_negative(parameter: &str, value: f64) -> WavelabResult<f64> {
    if !value.is_finite() {
        return Err(WavelabError::domain(parameter, "must be finite"));
    }
    if value < 0.0 {
        return Err(WavelabError::domain(
            parameter,
            format!("must be >= 0 (got {value})"),
        ));
    }
    Ok(value)
}

pub(crate) fn require_at_least(parameter: &str, value: u32, min: u32) -> WavelabResult<u32> {
    if value < min {
        return Err(WavelabError::domain(
            parameter,
            format!("must be >= {min} (got {value})"),
        ));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
