//! Radial standing waves on a circular wire loop.

use std::f64::consts::TAU;

use crate::animation::clock::period_times;
use crate::engines::{WaveEngine, compute_frames};
use crate::foundation::core::{FieldSample, Point, SimTime};
use crate::foundation::error::{WavelabError, WavelabResult};
use crate::foundation::math::{require_at_least, require_positive};
use crate::params::settings::SettingsStore;

/// Smallest angular sample count accepted for the loop outline.
pub const MIN_LOOP_SAMPLES: usize = 500;

/// Frames in one exported oscillation period.
pub const EXPORT_FRAMES: u32 = 50;

/// Playback rate for exported loops.
pub const EXPORT_FPS: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LoopParams {
    /// Angular wavelengths around the ring.
    pub mode: u32,
    pub amplitude: f64,
    /// `ω` in rad/s.
    pub angular_speed: f64,
    pub base_radius: f64,
}

impl Default for LoopParams {
    fn default() -> Self {
        Self {
            mode: 3,
            amplitude: 0.2,
            angular_speed: 2.0,
            base_radius: 1.0,
        }
    }
}

impl LoopParams {
    pub fn from_settings(store: &SettingsStore) -> WavelabResult<Self> {
        Ok(Self {
            mode: store.resolve_count("cw_n", None)?,
            amplitude: store.resolve("cw_amp", None)?,
            angular_speed: store.resolve("cw_speed", None)?,
            ..Self::default()
        })
    }

    fn validate(&self) -> WavelabResult<()> {
        require_at_least("mode", self.mode, 2)?;
        require_positive("amplitude", self.amplitude)?;
        require_positive("angular_speed", self.angular_speed)?;
        require_positive("base_radius", self.base_radius)?;
        Ok(())
    }

    /// `2π/ω`.
    pub fn period(&self) -> WavelabResult<f64> {
        Ok(TAU / require_positive("angular_speed", self.angular_speed)?)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoopOptions {
    pub samples: usize,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self { samples: 1000 }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LoopDerived {
    pub period: f64,
    /// `cos(ωt)`.
    pub phase: f64,
    /// Largest radius the loop can reach, `R0 + A`.
    pub extent: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LoopFrame {
    /// `R(θ)` at `θ ∈ [0, 2π)`.
    pub radii: FieldSample,
    /// Cartesian outline; the first point is repeated at the end to close the loop.
    pub outline: Vec<Point>,
    pub derived: LoopDerived,
}

pub struct LoopEngine;

impl WaveEngine for LoopEngine {
    type Params = LoopParams;
    type Options = LoopOptions;
    type Frame = LoopFrame;

    const NAME: &'static str = "loop";

    #[tracing::instrument(skip_all, fields(mode = params.mode, t = time.0))]
    fn compute_frame(
        params: &LoopParams,
        time: SimTime,
        opts: &LoopOptions,
    ) -> WavelabResult<LoopFrame> {
        let t = time.checked()?;
        params.validate()?;
        if opts.samples < MIN_LOOP_SAMPLES {
            return Err(WavelabError::config(format!(
                "loop samples must be >= {MIN_LOOP_SAMPLES} (got {})",
                opts.samples
            )));
        }

        let phase = (params.angular_speed * t).cos();
        let step = TAU / opts.samples as f64;
        let thetas: Vec<f64> = (0..opts.samples).map(|i| i as f64 * step).collect();
        let radii = FieldSample::from_fn(thetas, |theta| radius(params, theta, phase));

        let mut outline: Vec<Point> = radii
            .pairs()
            .map(|(theta, r)| Point::new(r * theta.cos(), r * theta.sin()))
            .collect();
        if let Some(&first) = outline.first() {
            outline.push(first);
        }

        Ok(LoopFrame {
            radii,
            outline,
            derived: LoopDerived {
                period: TAU / params.angular_speed,
                phase,
                extent: params.base_radius + params.amplitude,
            },
        })
    }
}

fn radius(params: &LoopParams, theta: f64, phase: f64) -> f64 {
    params.base_radius + params.amplitude * (f64::from(params.mode) * theta).sin() * phase
}

/// `R(θ, t) = R0 + A·sin(nθ)·cos(ωt)` at a single angle.
pub fn radius_at(params: &LoopParams, theta: f64, time: SimTime) -> WavelabResult<f64> {
    let t = time.checked()?;
    params.validate()?;
    Ok(radius(params, theta, (params.angular_speed * t).cos()))
}

/// Exactly one oscillation period as `frames` evenly spaced frames, for looping export.
///
/// Frame `i` is `compute_frame` at `t = i·T/frames`, so it matches a real-time frame at the
/// same `t` bit for bit.
pub fn period_sequence(
    params: &LoopParams,
    opts: &LoopOptions,
    frames: u32,
) -> WavelabResult<Vec<LoopFrame>> {
    let times = period_times(params.period()?, frames)?;
    compute_frames::<LoopEngine>(params, opts, &times)
}

#[cfg(test)]
#[path = "../../tests/unit/engines/ring.rs"]
mod tests;
