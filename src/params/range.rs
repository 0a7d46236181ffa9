use crate::foundation::error::{WavelabError, WavelabResult};

/// Valid interval, default and input granularity of one numeric parameter.
///
/// `step` only drives external input widgets; engines never read it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl ParamRange {
    pub fn new(min: f64, max: f64, default: f64, step: f64) -> WavelabResult<Self> {
        let r = Self {
            min,
            max,
            default,
            step,
        };
        r.validate()?;
        Ok(r)
    }

    pub fn validate(&self) -> WavelabResult<()> {
        for (name, v) in [
            ("min", self.min),
            ("max", self.max),
            ("default", self.default),
            ("step", self.step),
        ] {
            if !v.is_finite() {
                return Err(WavelabError::config(format!("range {name} must be finite")));
            }
        }
        if self.min >= self.max {
            return Err(WavelabError::config(format!(
                "range min must be less than max (min={}, max={})",
                self.min, self.max
            )));
        }
        if self.step <= 0.0 {
            return Err(WavelabError::config("range step must be > 0"));
        }
        Ok(())
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// The default, clamped into bounds that may have been edited since.
    pub fn default_value(&self) -> f64 {
        self.clamp(self.default)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Same default and step over new bounds.
    pub fn with_bounds(&self, min: f64, max: f64) -> WavelabResult<Self> {
        Self::new(min, max, self.default, self.step)
    }
}
