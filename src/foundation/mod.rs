//! Shared building blocks: errors, time and sample containers, numeric helpers.

pub mod bessel;
pub mod core;
pub mod error;
pub mod math;
