//! Simulation time: the per-frame clock, parameter sweeps and export frame sequences.

pub mod clock;
pub mod sweep;
