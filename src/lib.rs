//! Wavelab computes closed-form standing-wave fields for teaching simulations.
//!
//! Four engines share one shape: a pure `compute_frame(params, time, options)` call that
//! returns field samples plus derived quantities.
//!
//! - [`StringEngine`]: transverse waves on a string fixed at both ends
//! - [`PlateEngine`]: Chladni patterns on square and circular plates
//! - [`LoopEngine`]: radial modes on a circular wire loop
//! - [`ChainEngine`]: longitudinal waves in a chain of particles
//!
//! Hosts own the time base ([`AnimationClock`]) and the parameter ranges ([`SettingsStore`]).
#![forbid(unsafe_code)]

pub mod animation;
pub mod engines;
pub mod foundation;
pub mod params;

pub use crate::animation::clock::{
    AnimationClock, ClockStep, TARGET_FRAME_INTERVAL, period_times,
};
pub use crate::animation::sweep::Sweep;
pub use crate::engines::chain::{
    BoundaryConvention, ChainEngine, ChainFrame, ChainOptions, ChainParams,
};
pub use crate::engines::plate::{
    PlateEngine, PlateFrame, PlateOptions, PlateParams, PlateShape, Superposition,
};
pub use crate::engines::ring::{LoopEngine, LoopFrame, LoopOptions, LoopParams};
pub use crate::engines::string::{
    ControlMode, StringEngine, StringFrame, StringOptions, StringParams,
};
pub use crate::engines::{WaveEngine, compute_frames};
pub use crate::foundation::core::{FieldSample, FieldSample2D, Grid2D, Line, Point, SimTime};
pub use crate::foundation::error::{WavelabError, WavelabResult};
pub use crate::params::range::ParamRange;
pub use crate::params::settings::SettingsStore;
