use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{WavelabError, WavelabResult};
use crate::params::range::ParamRange;

/// Built-in ranges: key, min, max, default, step.
const DEFAULT_RANGES: &[(&str, f64, f64, f64, f64)] = &[
    // Standing waves on a string
    ("sw_tension", 0.1, 200.0, 10.0, 0.1),
    ("sw_density", 0.0001, 0.05, 0.001, 0.0001),
    ("sw_length", 0.1, 10.0, 1.0, 0.1),
    ("sw_frequency", 1.0, 100.0, 50.0, 0.1),
    ("sw_harmonic", 1.0, 20.0, 1.0, 1.0),
    ("sw_amplitude", 0.01, 0.5, 0.1, 0.01),
    // Chladni plate
    ("ch_n", 1.0, 50.0, 3.0, 1.0),
    ("ch_m", 1.0, 50.0, 5.0, 1.0),
    // Circular wire loop
    ("cw_n", 2.0, 20.0, 3.0, 1.0),
    ("cw_speed", 0.1, 10.0, 2.0, 0.1),
    ("cw_amp", 0.05, 2.0, 0.2, 0.05),
    // Longitudinal chain
    ("lw_particles", 20.0, 200.0, 50.0, 5.0),
    ("lw_n", 1.0, 20.0, 3.0, 1.0),
    ("lw_amp", 0.1, 3.0, 0.8, 0.1),
    ("lw_speed", 0.1, 5.0, 1.0, 0.1),
];

/// Immutable table of parameter ranges, keyed by setting name.
///
/// Edits return a new store. Hosts resolve parameter values against a store before calling
/// an engine; engines never see it.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct SettingsStore {
    ranges: BTreeMap<String, ParamRange>,
}

#[derive(Clone, Copy, Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct RangeOverride {
    min: Option<f64>,
    max: Option<f64>,
    default: Option<f64>,
    step: Option<f64>,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::defaults()
    }
}

impl SettingsStore {
    pub fn defaults() -> Self {
        let ranges = DEFAULT_RANGES
            .iter()
            .map(|&(key, min, max, default, step)| {
                (
                    key.to_owned(),
                    ParamRange {
                        min,
                        max,
                        default,
                        step,
                    },
                )
            })
            .collect();
        Self { ranges }
    }

    pub fn get(&self, key: &str) -> WavelabResult<&ParamRange> {
        self.ranges
            .get(key)
            .ok_or_else(|| WavelabError::config(format!("unknown setting '{key}'")))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.ranges.keys().map(String::as_str)
    }

    /// Settings sharing a simulation prefix such as `"sw_"`, in key order.
    pub fn group<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a ParamRange)> + 'a {
        self.ranges
            .iter()
            .filter(move |(k, _)| k.starts_with(prefix))
            .map(|(k, r)| (k.as_str(), r))
    }

    /// The requested value clamped into range, or the clamped default.
    pub fn resolve(&self, key: &str, requested: Option<f64>) -> WavelabResult<f64> {
        let range = self.get(key)?;
        let Some(v) = requested else {
            return Ok(range.default_value());
        };
        if !v.is_finite() {
            return Err(WavelabError::domain(key, "must be finite"));
        }
        let clamped = range.clamp(v);
        if clamped != v {
            tracing::debug!(key, requested = v, clamped, "clamped setting into range");
        }
        Ok(clamped)
    }

    /// Integer-valued settings (mode numbers, particle counts), rounded after clamping.
    pub fn resolve_count(&self, key: &str, requested: Option<u32>) -> WavelabResult<u32> {
        let v = self.resolve(key, requested.map(f64::from))?;
        Ok(v.round().max(0.0) as u32)
    }

    pub fn with_range(&self, key: &str, min: f64, max: f64) -> WavelabResult<Self> {
        let edited = self.get(key)?.with_bounds(min, max)?;
        let mut ranges = self.ranges.clone();
        ranges.insert(key.to_owned(), edited);
        Ok(Self { ranges })
    }

    pub fn reset(&self) -> Self {
        Self::defaults()
    }

    /// Parse a JSON object of partial range overrides and merge it onto the defaults.
    pub fn from_json_str(s: &str) -> WavelabResult<Self> {
        let overrides: BTreeMap<String, RangeOverride> =
            serde_json::from_str(s).map_err(|e| WavelabError::serde(e.to_string()))?;
        let mut store = Self::defaults();
        for (key, o) in overrides {
            let base = *store.get(&key)?;
            let merged = ParamRange::new(
                o.min.unwrap_or(base.min),
                o.max.unwrap_or(base.max),
                o.default.unwrap_or(base.default),
                o.step.unwrap_or(base.step),
            )
            .map_err(|e| WavelabError::config(format!("setting '{key}': {e}")))?;
            store.ranges.insert(key, merged);
        }
        Ok(store)
    }

    pub fn from_path(path: &Path) -> WavelabResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read settings '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn to_json_string(&self) -> WavelabResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| WavelabError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/settings.rs"]
mod tests;
