//! Closed-form wave field engines.
//!
//! Each engine is a stateless unit struct implementing [`WaveEngine`]: one pure
//! `compute_frame(params, time, options)` call per rendered frame. Hosts that need a finite
//! frame sequence (looping export) call [`compute_frames`] with the times they want.

use crate::foundation::core::SimTime;
use crate::foundation::error::WavelabResult;

pub mod chain;
pub mod contour;
pub mod plate;
pub mod ring;
pub mod string;

/// One simulation's frame computation.
pub trait WaveEngine {
    /// Physical inputs, already resolved and clamped by the host.
    type Params;
    /// Discrete per-engine choices.
    type Options: Default;
    /// Field samples plus derived quantities.
    type Frame: serde::Serialize;

    /// Short engine name used in logs and host output.
    const NAME: &'static str;

    /// Evaluate the field at `time`. Same inputs always give identical output.
    fn compute_frame(
        params: &Self::Params,
        time: SimTime,
        opts: &Self::Options,
    ) -> WavelabResult<Self::Frame>;
}

/// Evaluate `E` at each of `times`, in order.
#[tracing::instrument(skip(params, opts, times), fields(engine = E::NAME, frames = times.len()))]
pub fn compute_frames<E: WaveEngine>(
    params: &E::Params,
    opts: &E::Options,
    times: &[SimTime],
) -> WavelabResult<Vec<E::Frame>> {
    times
        .iter()
        .map(|&t| E::compute_frame(params, t, opts))
        .collect()
}

pub(crate) fn normalize_choice(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace(['-', ' '], "_")
}
