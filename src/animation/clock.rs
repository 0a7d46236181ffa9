use std::time::Duration;

use crate::foundation::core::SimTime;
use crate::foundation::error::{WavelabError, WavelabResult};

/// Minimum pause hosts leave between frames (caps animation at 50 fps).
pub const TARGET_FRAME_INTERVAL: Duration = Duration::from_millis(20);

/// How far simulation time moves per tick.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClockStep {
    /// Constant increment, independent of wall-clock time.
    Fixed { dt: f64 },
    /// Wall-clock delta multiplied by `scale` (slow motion below 1).
    RealTime { scale: f64 },
}

/// Monotonic simulation clock owned by the host loop.
///
/// The clock never sleeps and never calls an engine; the host decides when to tick.
#[derive(Clone, Debug)]
pub struct AnimationClock {
    step: ClockStep,
    time: SimTime,
    frames: u64,
}

impl AnimationClock {
    pub fn new(step: ClockStep) -> WavelabResult<Self> {
        let (name, v) = match step {
            ClockStep::Fixed { dt } => ("dt", dt),
            ClockStep::RealTime { scale } => ("scale", scale),
        };
        if !v.is_finite() || v <= 0.0 {
            return Err(WavelabError::config(format!(
                "clock {name} must be finite and > 0 (got {v})"
            )));
        }
        Ok(Self {
            step,
            time: SimTime::ZERO,
            frames: 0,
        })
    }

    pub fn fixed(dt: f64) -> WavelabResult<Self> {
        Self::new(ClockStep::Fixed { dt })
    }

    pub fn real_time(scale: f64) -> WavelabResult<Self> {
        Self::new(ClockStep::RealTime { scale })
    }

    pub fn step(&self) -> ClockStep {
        self.step
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Number of ticks since the last reset.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance by one frame. `wall_delta` is ignored by fixed-step clocks.
    pub fn tick(&mut self, wall_delta: Duration) -> SimTime {
        let delta = match self.step {
            ClockStep::Fixed { dt } => dt,
            ClockStep::RealTime { scale } => wall_delta.as_secs_f64() * scale,
        };
        self.time = self.time.advanced(delta);
        self.frames += 1;
        self.time
    }

    /// Back to `t = 0`, as when an animation restarts or parameters are re-locked.
    pub fn reset(&mut self) {
        tracing::debug!(frames = self.frames, t = self.time.0, "clock reset");
        self.time = SimTime::ZERO;
        self.frames = 0;
    }
}

/// Times `i·period/frames` for `i` in `0..frames`: exactly one period, endpoint excluded,
/// so the sequence loops without a repeated frame.
pub fn period_times(period: f64, frames: u32) -> WavelabResult<Vec<SimTime>> {
    if frames == 0 {
        return Err(WavelabError::config("frame count must be > 0"));
    }
    if !period.is_finite() || period <= 0.0 {
        return Err(WavelabError::domain("period", "must be finite and > 0"));
    }
    Ok((0..frames)
        .map(|i| SimTime(f64::from(i) * period / f64::from(frames)))
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
