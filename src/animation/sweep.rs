use crate::foundation::error::{WavelabError, WavelabResult};

/// Time-varying modulation of one parameter, sampled at elapsed wall-clock seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "params")]
pub enum Sweep {
    Constant(f64),
    Sine {
        center: f64,
        amplitude: f64,
        period: f64,
    },
}

impl Sweep {
    /// Tension sweep for the string: 0.1 N to 99.9 N and back every 10 s.
    pub fn tension() -> Self {
        Self::Sine {
            center: 50.0,
            amplitude: 49.9,
            period: 10.0,
        }
    }

    pub fn validate(&self) -> WavelabResult<()> {
        match *self {
            Self::Constant(v) if !v.is_finite() => {
                Err(WavelabError::config("sweep constant must be finite"))
            }
            Self::Constant(_) => Ok(()),
            Self::Sine {
                center,
                amplitude,
                period,
            } => {
                if !center.is_finite() || !amplitude.is_finite() {
                    return Err(WavelabError::config(
                        "sweep center/amplitude must be finite",
                    ));
                }
                if !period.is_finite() || period <= 0.0 {
                    return Err(WavelabError::config("sweep period must be > 0"));
                }
                Ok(())
            }
        }
    }

    pub fn sample(&self, elapsed_secs: f64) -> f64 {
        match *self {
            Self::Constant(v) => v,
            Self::Sine {
                center,
                amplitude,
                period,
            } => {
                let phase = elapsed_secs.rem_euclid(period) / period * std::f64::consts::TAU;
                center + amplitude * phase.sin()
            }
        }
    }

    /// Smallest and largest value the sweep can produce.
    pub fn bounds(&self) -> (f64, f64) {
        match *self {
            Self::Constant(v) => (v, v),
            Self::Sine {
                center, amplitude, ..
            } => {
                let a = amplitude.abs();
                (center - a, center + a)
            }
        }
    }
}
