//! Transverse standing waves on a string fixed at both ends (Melde's experiment).

use std::f64::consts::{PI, TAU};
use std::str::FromStr;

use crate::engines::{WaveEngine, normalize_choice};
use crate::foundation::core::{FieldSample, SimTime};
use crate::foundation::error::{WavelabError, WavelabResult};
use crate::foundation::math::{NODE_TOLERANCE, linspace, require_non_negative, require_positive};
use crate::params::settings::SettingsStore;

/// Smallest sample count accepted for the displacement curve.
pub const MIN_STRING_SAMPLES: usize = 200;

/// Slow-motion factor applied to wall-clock time when the string animates in real time.
pub const STRING_TIME_SCALE: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StringParams {
    /// Tension `T` in newtons.
    pub tension: f64,
    /// Linear density `ρ` in kg/m.
    pub linear_density: f64,
    /// String length `L` in metres.
    pub length: f64,
    /// Single-wave amplitude `A`; the standing wave peaks at `2A`.
    pub amplitude: f64,
    /// Driving frequency in Hz, used in [`ControlMode::ManualFrequency`].
    pub frequency: f64,
    /// Target harmonic, used in [`ControlMode::SetHarmonic`].
    pub harmonic: u32,
}

impl Default for StringParams {
    fn default() -> Self {
        Self {
            tension: 10.0,
            linear_density: 0.001,
            length: 1.0,
            amplitude: 0.1,
            frequency: 50.0,
            harmonic: 1,
        }
    }
}

impl StringParams {
    pub fn from_settings(store: &SettingsStore) -> WavelabResult<Self> {
        Ok(Self {
            tension: store.resolve("sw_tension", None)?,
            linear_density: store.resolve("sw_density", None)?,
            length: store.resolve("sw_length", None)?,
            amplitude: store.resolve("sw_amplitude", None)?,
            frequency: store.resolve("sw_frequency", None)?,
            harmonic: store.resolve_count("sw_harmonic", None)?,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlMode {
    #[default]
    ManualFrequency,
    SetHarmonic,
}

impl FromStr for ControlMode {
    type Err = WavelabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "manual_frequency" | "manual" | "frequency" => Ok(Self::ManualFrequency),
            "set_harmonic" | "harmonic" => Ok(Self::SetHarmonic),
            other => Err(WavelabError::config(format!(
                "unknown control mode '{other}'"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StringOptions {
    pub control: ControlMode,
    pub samples: usize,
}

impl Default for StringOptions {
    fn default() -> Self {
        Self {
            control: ControlMode::ManualFrequency,
            samples: 500,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StringDerived {
    pub wave_speed: f64,
    pub frequency: f64,
    pub angular_frequency: f64,
    pub wavelength: f64,
    pub wavenumber: f64,
    /// `2L/λ`; an integer only when the frequency is locked to a harmonic.
    pub harmonic_number: f64,
    pub nodes: Vec<f64>,
    pub antinodes: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StringFrame {
    /// Instantaneous displacement `y(x, t)`.
    pub samples: FieldSample,
    /// Upper envelope `2A·sin(kx)`; the lower envelope is its negation.
    pub envelope: FieldSample,
    pub derived: StringDerived,
}

pub struct StringEngine;

impl WaveEngine for StringEngine {
    type Params = StringParams;
    type Options = StringOptions;
    type Frame = StringFrame;

    const NAME: &'static str = "string";

    #[tracing::instrument(skip_all, fields(t = time.0))]
    fn compute_frame(
        params: &StringParams,
        time: SimTime,
        opts: &StringOptions,
    ) -> WavelabResult<StringFrame> {
        let t = time.checked()?;
        if opts.samples < MIN_STRING_SAMPLES {
            return Err(WavelabError::config(format!(
                "string samples must be >= {MIN_STRING_SAMPLES} (got {})",
                opts.samples
            )));
        }
        let amplitude = require_non_negative("amplitude", params.amplitude)?;
        let derived = derive(params, opts.control)?;

        let k = derived.wavenumber;
        let phase = (derived.angular_frequency * t).cos();
        let xs = linspace(0.0, params.length, opts.samples);
        let envelope = FieldSample::from_fn(xs.clone(), |x| 2.0 * amplitude * (k * x).sin());
        let samples = FieldSample::from_fn(xs, |x| 2.0 * amplitude * (k * x).sin() * phase);

        Ok(StringFrame {
            samples,
            envelope,
            derived,
        })
    }
}

/// `sqrt(T/ρ)`.
pub fn wave_speed(tension: f64, linear_density: f64) -> WavelabResult<f64> {
    let tension = require_positive("tension", tension)?;
    let linear_density = require_positive("linear_density", linear_density)?;
    Ok((tension / linear_density).sqrt())
}

/// All derived quantities for the current operating point.
pub fn derive(params: &StringParams, control: ControlMode) -> WavelabResult<StringDerived> {
    let v = wave_speed(params.tension, params.linear_density)?;
    let length = require_positive("length", params.length)?;

    let frequency = match control {
        ControlMode::ManualFrequency => require_positive("frequency", params.frequency)?,
        ControlMode::SetHarmonic => {
            if params.harmonic == 0 {
                return Err(WavelabError::domain("harmonic", "must be >= 1"));
            }
            f64::from(params.harmonic) * v / (2.0 * length)
        }
    };

    let wavelength = v / frequency;
    if !wavelength.is_finite() || wavelength <= 0.0 {
        return Err(WavelabError::domain(
            "frequency",
            format!("wavelength is degenerate (λ={wavelength})"),
        ));
    }

    Ok(StringDerived {
        wave_speed: v,
        frequency,
        angular_frequency: TAU * frequency,
        wavelength,
        wavenumber: TAU / wavelength,
        harmonic_number: 2.0 * length / wavelength,
        nodes: half_wave_positions(wavelength, length, 0.0),
        antinodes: half_wave_positions(wavelength, length, 0.5),
    })
}

/// `(m + offset)·λ/2` for `m = 0, 1, ...` while within `L` (plus [`NODE_TOLERANCE`]).
fn half_wave_positions(wavelength: f64, length: f64, offset: f64) -> Vec<f64> {
    let half = wavelength / 2.0;
    let bound = length + NODE_TOLERANCE;
    (0u64..)
        .map(|m| (m as f64 + offset) * half)
        .take_while(|&x| x <= bound)
        .collect()
}

/// Frequency that puts harmonic `n` on the string at tension `T`:
/// `n/(2L·sqrt ρ)·sqrt T`.
pub fn required_frequency(
    tension: f64,
    linear_density: f64,
    length: f64,
    harmonic: u32,
) -> WavelabResult<f64> {
    let tension = require_positive("tension", tension)?;
    Ok(curve_factor(linear_density, length, harmonic)? * tension.sqrt())
}

fn curve_factor(linear_density: f64, length: f64, harmonic: u32) -> WavelabResult<f64> {
    let linear_density = require_positive("linear_density", linear_density)?;
    let length = require_positive("length", length)?;
    if harmonic == 0 {
        return Err(WavelabError::domain("harmonic", "must be >= 1"));
    }
    Ok(f64::from(harmonic) / (2.0 * length * linear_density.sqrt()))
}

/// Tension interval swept by the frequency-tension curve.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TensionRange {
    pub min: f64,
    pub max: f64,
    pub samples: usize,
}

impl Default for TensionRange {
    fn default() -> Self {
        Self {
            min: 0.1,
            max: 100.0,
            samples: 200,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrequencyCurve {
    pub harmonic: u32,
    /// `f(T)` sampled over the tension range; positions are tensions.
    pub curve: FieldSample,
    /// `(T, f(T))` at the current tension.
    pub operating_point: (f64, f64),
}

/// Frequency-vs-tension curve for a fixed harmonic, with the current operating point.
pub fn frequency_tension_curve(
    linear_density: f64,
    length: f64,
    harmonic: u32,
    range: TensionRange,
    operating_tension: f64,
) -> WavelabResult<FrequencyCurve> {
    let min = require_positive("tension", range.min)?;
    if !range.max.is_finite() || range.max <= min {
        return Err(WavelabError::config(
            "tension range max must be finite and > min",
        ));
    }
    if range.samples < 2 {
        return Err(WavelabError::config("tension range needs >= 2 samples"));
    }
    let factor = curve_factor(linear_density, length, harmonic)?;
    let operating_tension = require_positive("tension", operating_tension)?;

    let curve = FieldSample::from_fn(linspace(min, range.max, range.samples), |t| {
        factor * t.sqrt()
    });
    Ok(FrequencyCurve {
        harmonic,
        curve,
        operating_point: (operating_tension, factor * operating_tension.sqrt()),
    })
}

/// `2π` over the angular frequency: the time after which the string shape repeats.
pub fn oscillation_period(derived: &StringDerived) -> f64 {
    2.0 * PI / derived.angular_frequency
}

#[cfg(test)]
#[path = "../../tests/unit/engines/string.rs"]
mod tests;
