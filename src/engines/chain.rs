//! Longitudinal standing waves in a chain of particles (sound in a pipe, coils of a spring).

use std::f64::consts::PI;
use std::str::FromStr;

use crate::engines::{WaveEngine, normalize_choice};
use crate::foundation::core::SimTime;
use crate::foundation::error::{WavelabError, WavelabResult};
use crate::foundation::math::{
    STRAIN_EPSILON, linspace, require_at_least, require_non_negative, require_positive,
};
use crate::params::settings::SettingsStore;

/// Length of the particle domain.
pub const CHAIN_LENGTH: f64 = 10.0;

/// Fraction of the particle spacing a particle may travel; keeps neighbors from crossing.
pub const SAFE_AMPLITUDE_FRACTION: f64 = 0.9;

/// Peak excursion of the driving speaker cone.
pub const SPEAKER_AMPLITUDE: f64 = 0.3;

/// Clock step per frame at speed factor 1.
pub const BASE_TIME_STEP: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChainParams {
    pub particles: u32,
    pub harmonic: u32,
    /// Fraction of the maximum safe displacement.
    pub amplitude_factor: f64,
    pub angular_frequency: f64,
}

impl Default for ChainParams {
    fn default() -> Self {
        Self {
            particles: 50,
            harmonic: 3,
            amplitude_factor: 0.8,
            angular_frequency: 2.0,
        }
    }
}

impl ChainParams {
    pub fn from_settings(store: &SettingsStore) -> WavelabResult<Self> {
        Ok(Self {
            particles: store.resolve_count("lw_particles", None)?,
            harmonic: store.resolve_count("lw_n", None)?,
            amplitude_factor: store.resolve("lw_amp", None)?,
            ..Self::default()
        })
    }
}

/// Which end condition the displacement satisfies.
///
/// `SineDisplacement` pins both ends (displacement nodes at `x = 0` and `x = L`, a closed
/// pipe); `CosineDisplacement` leaves them free (displacement antinodes, an open pipe).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryConvention {
    #[default]
    SineDisplacement,
    CosineDisplacement,
}

impl FromStr for BoundaryConvention {
    type Err = WavelabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "sine" | "sin" | "sine_displacement" | "fixed" | "closed" => {
                Ok(Self::SineDisplacement)
            }
            "cosine" | "cos" | "cosine_displacement" | "free" | "open" => {
                Ok(Self::CosineDisplacement)
            }
            other => Err(WavelabError::config(format!(
                "unknown boundary convention '{other}'"
            ))),
        }
    }
}

impl BoundaryConvention {
    /// Displacement shape `f(kx)`.
    fn shape(self, kx: f64) -> f64 {
        match self {
            Self::SineDisplacement => kx.sin(),
            Self::CosineDisplacement => kx.cos(),
        }
    }

    /// `g(kx)` with `d/dx f(kx) = k·g(kx)`.
    fn slope(self, kx: f64) -> f64 {
        match self {
            Self::SineDisplacement => kx.cos(),
            Self::CosineDisplacement => -kx.sin(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChainOptions {
    pub boundary: BoundaryConvention,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ChainDerived {
    pub spacing: f64,
    pub wavenumber: f64,
    pub max_amplitude: f64,
    pub amplitude: f64,
    /// Driving speaker cone offset `d_max·cos(ωt)`.
    pub speaker_displacement: f64,
    /// `cos(ωt)`.
    pub phase: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ChainFrame {
    pub equilibrium: Vec<f64>,
    pub positions: Vec<f64>,
    pub displacement: Vec<f64>,
    pub strain: Vec<f64>,
    /// `[0, 1]`: compression toward 1, rarefaction toward 0, rest at 0.5.
    pub colors: Vec<f64>,
    pub derived: ChainDerived,
}

pub struct ChainEngine;

impl WaveEngine for ChainEngine {
    type Params = ChainParams;
    type Options = ChainOptions;
    type Frame = ChainFrame;

    const NAME: &'static str = "chain";

    #[tracing::instrument(skip_all, fields(n = params.harmonic, boundary = ?opts.boundary, t = time.0))]
    fn compute_frame(
        params: &ChainParams,
        time: SimTime,
        opts: &ChainOptions,
    ) -> WavelabResult<ChainFrame> {
        let t = time.checked()?;
        let particles = require_at_least("particles", params.particles, 2)?;
        let harmonic = require_at_least("harmonic", params.harmonic, 1)?;
        let alpha = require_non_negative("amplitude_factor", params.amplitude_factor)?;
        let omega = require_positive("angular_frequency", params.angular_frequency)?;

        let spacing = CHAIN_LENGTH / f64::from(particles - 1);
        let k = f64::from(harmonic) * PI / CHAIN_LENGTH;
        let max_amplitude = SAFE_AMPLITUDE_FRACTION * spacing;
        let amplitude = alpha * max_amplitude;
        let phase = (omega * t).cos();
        let limit = amplitude * k + STRAIN_EPSILON;

        let equilibrium = linspace(0.0, CHAIN_LENGTH, particles as usize);
        let n = equilibrium.len();
        let mut positions = Vec::with_capacity(n);
        let mut displacement = Vec::with_capacity(n);
        let mut strain = Vec::with_capacity(n);
        let mut colors = Vec::with_capacity(n);
        for &x0 in &equilibrium {
            let kx = k * x0;
            let d = amplitude * opts.boundary.shape(kx) * phase;
            let s = amplitude * k * opts.boundary.slope(kx) * phase;
            displacement.push(d);
            positions.push(x0 + d);
            strain.push(s);
            colors.push(strain_color(s, limit));
        }

        Ok(ChainFrame {
            equilibrium,
            positions,
            displacement,
            strain,
            colors,
            derived: ChainDerived {
                spacing,
                wavenumber: k,
                max_amplitude,
                amplitude,
                speaker_displacement: SPEAKER_AMPLITUDE * phase,
                phase,
            },
        })
    }
}

/// `0.5 − 0.5·s/limit`, clamped to `[0, 1]`.
fn strain_color(strain: f64, limit: f64) -> f64 {
    (0.5 - 0.5 * strain / limit).clamp(0.0, 1.0)
}

/// Clock step for a host speed factor, `0.05·speed`.
pub fn time_step(speed_factor: f64) -> WavelabResult<f64> {
    Ok(BASE_TIME_STEP * require_positive("speed_factor", speed_factor)?)
}

#[cfg(test)]
#[path = "../../tests/unit/engines/chain.rs"]
mod tests;
