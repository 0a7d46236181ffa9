//! Parameter model: validated ranges and the immutable settings store.

pub mod range;
pub mod settings;
