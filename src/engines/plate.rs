//! Chladni resonance patterns on square and circular plates.

use std::f64::consts::PI;
use std::str::FromStr;

use rayon::prelude::*;

use crate::engines::contour::contour_segments;
use crate::engines::{WaveEngine, normalize_choice};
use crate::foundation::bessel::{bessel_j, bessel_j_zero};
use crate::foundation::core::{FieldSample2D, Grid2D, Line, SimTime};
use crate::foundation::error::{WavelabError, WavelabResult};
use crate::foundation::math::require_at_least;
use crate::params::settings::SettingsStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlateParams {
    /// Square: first mode index. Circular: radial mode (nodal circles).
    pub n: u32,
    /// Square: second mode index. Circular: angular mode (nodal diameters).
    pub m: u32,
    /// Grid side length.
    pub resolution: usize,
}

impl Default for PlateParams {
    fn default() -> Self {
        Self {
            n: 3,
            m: 5,
            resolution: 500,
        }
    }
}

impl PlateParams {
    pub fn from_settings(store: &SettingsStore) -> WavelabResult<Self> {
        Ok(Self {
            n: store.resolve_count("ch_n", None)?,
            m: store.resolve_count("ch_m", None)?,
            ..Self::default()
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlateShape {
    #[default]
    Square,
    Circular,
}

impl FromStr for PlateShape {
    type Err = WavelabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "square" | "square_plate" => Ok(Self::Square),
            "circular" | "circle" | "circular_plate" => Ok(Self::Circular),
            other => Err(WavelabError::config(format!("unknown plate shape '{other}'"))),
        }
    }
}

/// How the two orthogonal square-plate modes combine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Superposition {
    Sum,
    /// Vanishes identically when `n == m`.
    #[default]
    Difference,
}

impl FromStr for Superposition {
    type Err = WavelabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "sum" | "plus" | "a+b" => Ok(Self::Sum),
            "difference" | "diff" | "minus" | "a_b" => Ok(Self::Difference),
            other => Err(WavelabError::config(format!(
                "unknown superposition '{other}'"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlateOptions {
    pub shape: PlateShape,
    /// Ignored for circular plates.
    pub superposition: Superposition,
}

/// Where the circular-plate wavenumber came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EigenvalueSource {
    /// n-th positive zero of `J_m`.
    BesselZero,
    /// `nπ`, used when the zero lookup is unsupported; the pattern is then approximate.
    Fallback,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlateDerived {
    pub shape: PlateShape,
    /// Circular plates only: wavenumber `k` scaling the radius.
    pub eigenvalue: Option<f64>,
    pub eigenvalue_source: Option<EigenvalueSource>,
    pub max_amplitude: f64,
    /// The whole plate is nodal (for example square difference with `n == m`).
    pub identically_zero: bool,
    /// Zero-level contour of the field.
    pub nodal_lines: Vec<Line>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlateFrame {
    pub field: FieldSample2D,
    /// `|Z|` for intensity rendering, masked where the field is.
    pub amplitude: Vec<Option<f64>>,
    pub derived: PlateDerived,
}

pub struct PlateEngine;

impl WaveEngine for PlateEngine {
    type Params = PlateParams;
    type Options = PlateOptions;
    type Frame = PlateFrame;

    const NAME: &'static str = "plate";

    /// Plate patterns are stationary; `time` is validated and otherwise unused.
    #[tracing::instrument(skip_all, fields(n = params.n, m = params.m, shape = ?opts.shape))]
    fn compute_frame(
        params: &PlateParams,
        time: SimTime,
        opts: &PlateOptions,
    ) -> WavelabResult<PlateFrame> {
        time.checked()?;
        let n = require_at_least("n", params.n, 1)?;
        let m = require_at_least("m", params.m, 1)?;
        let grid = Grid2D::unit_square(params.resolution)?;

        let (field, eigen) = match opts.shape {
            PlateShape::Square => (square_field(grid, n, m, opts.superposition), None),
            PlateShape::Circular => {
                let (k, source) = circular_eigenvalue(n, m);
                (circular_field(grid, n, m, k), Some((k, source)))
            }
        };

        let amplitude = field.magnitude();
        let max_amplitude = amplitude.iter().flatten().copied().fold(0.0, f64::max);
        let nodal_lines = contour_segments(&field, 0.0);

        Ok(PlateFrame {
            amplitude,
            derived: PlateDerived {
                shape: opts.shape,
                eigenvalue: eigen.map(|(k, _)| k),
                eigenvalue_source: eigen.map(|(_, s)| s),
                max_amplitude,
                identically_zero: max_amplitude == 0.0,
                nodal_lines,
            },
            field,
        })
    }
}

/// `cos(nπx)cos(mπy) ± cos(mπx)cos(nπy)` over the grid.
pub fn square_field(grid: Grid2D, n: u32, m: u32, mode: Superposition) -> FieldSample2D {
    // Both axes share coordinates, so one cosine table per mode index serves x and y.
    let cos_n: Vec<f64> = grid
        .coords
        .iter()
        .map(|&c| (f64::from(n) * PI * c).cos())
        .collect();
    let cos_m: Vec<f64> = grid
        .coords
        .iter()
        .map(|&c| (f64::from(m) * PI * c).cos())
        .collect();

    let res = grid.resolution;
    let mut values = vec![None; grid.len()];
    values
        .par_chunks_mut(res)
        .enumerate()
        .for_each(|(row, out)| {
            for (col, slot) in out.iter_mut().enumerate() {
                let term1 = cos_n[col] * cos_m[row];
                let term2 = cos_m[col] * cos_n[row];
                *slot = Some(match mode {
                    Superposition::Sum => term1 + term2,
                    Superposition::Difference => term1 - term2,
                });
            }
        });
    FieldSample2D { grid, values }
}

/// Wavenumber for mode `(n, m)` of a clamped circular plate of unit radius.
pub fn circular_eigenvalue(n: u32, m: u32) -> (f64, EigenvalueSource) {
    match bessel_j_zero(m, n) {
        Some(k) => (k, EigenvalueSource::BesselZero),
        None => {
            let k = f64::from(n) * PI;
            tracing::warn!(
                n,
                m,
                k,
                "Bessel zero lookup unsupported; falling back to k = n*pi (approximate pattern)"
            );
            (k, EigenvalueSource::Fallback)
        }
    }
}

/// `J_m(k r)·cos(mθ)` inside the unit disc, masked outside.
pub fn circular_field(grid: Grid2D, n: u32, m: u32, k: f64) -> FieldSample2D {
    let res = grid.resolution;
    let coords = &grid.coords;
    let mut values = vec![None; grid.len()];
    values
        .par_chunks_mut(res)
        .enumerate()
        .for_each(|(row, out)| {
            let y = coords[row];
            for (col, slot) in out.iter_mut().enumerate() {
                let x = coords[col];
                let r = x.hypot(y);
                if r > 1.0 {
                    continue;
                }
                let theta = y.atan2(x);
                *slot = Some(bessel_j(m, k * r) * (f64::from(m) * theta).cos());
            }
        });
    tracing::trace!(n, m, k, "circular field sampled");
    FieldSample2D { grid, values }
}

#[cfg(test)]
#[path = "../../tests/unit/engines/plate.rs"]
mod tests;
