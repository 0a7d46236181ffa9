/// Convenience result type used across wavelab.
pub type WavelabResult<T> = Result<T, WavelabError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant is local and recoverable: a host catches it, re-prompts or clamps, and
/// calls the engine again.
#[derive(thiserror::Error, Debug)]
pub enum WavelabError {
    /// A physical parameter is outside the domain an engine can evaluate.
    #[error("domain error: {parameter}: {reason}")]
    Domain {
        /// Name of the offending parameter (for example `"tension"`).
        parameter: String,
        /// Human-readable reason.
        reason: String,
    },

    /// Malformed engine options or settings (unknown enum value, bad range, sample count).
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WavelabError {
    /// Build a [`WavelabError::Domain`] value.
    pub fn domain(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Domain {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`WavelabError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`WavelabError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Parameter name for domain errors, `None` otherwise.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::Domain { parameter, .. } => Some(parameter),
            _ => None,
        }
    }

    /// True for [`WavelabError::Domain`].
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain { .. })
    }

    /// True for [`WavelabError::Config`].
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
