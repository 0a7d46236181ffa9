use crate::foundation::error::{WavelabError, WavelabResult};
use crate::foundation::math::linspace;

pub use kurbo::{Line, Point};

/// Simulation time in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: Self = Self(0.0);

    pub fn secs(self) -> f64 {
        self.0
    }

    pub fn advanced(self, delta_secs: f64) -> Self {
        Self(self.0 + delta_secs)
    }

    /// Rejects NaN and infinities before they reach a field evaluation.
    pub fn checked(self) -> WavelabResult<f64> {
        if !self.0.is_finite() {
            return Err(WavelabError::domain("time", "must be finite"));
        }
        Ok(self.0)
    }
}

/// Ordered `(position, value)` samples of a 1D field.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FieldSample {
    pub positions: Vec<f64>,
    pub values: Vec<f64>,
}

impl FieldSample {
    pub fn from_fn(positions: Vec<f64>, f: impl Fn(f64) -> f64) -> Self {
        let values = positions.iter().map(|&p| f(p)).collect();
        Self { positions, values }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.positions
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }
}

/// Square sampling grid over `[-1, 1]^2`, shared by both axes.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Grid2D {
    pub resolution: usize,
    pub coords: Vec<f64>,
}

impl Grid2D {
    pub fn unit_square(resolution: usize) -> WavelabResult<Self> {
        if resolution < 2 {
            return Err(WavelabError::domain("resolution", "must be >= 2"));
        }
        Ok(Self {
            resolution,
            coords: linspace(-1.0, 1.0, resolution),
        })
    }

    pub fn len(&self) -> usize {
        self.resolution * self.resolution
    }

    pub fn is_empty(&self) -> bool {
        self.resolution == 0
    }

    /// Row-major index; rows run along `y`.
    ///
    /// # Panics
    ///
    /// If `col` or `row` is `>= resolution`.
    pub fn index(&self, col: usize, row: usize) -> usize {
        assert!(
            col < self.resolution && row < self.resolution,
            "grid cell ({col}, {row}) outside {0}x{0} grid",
            self.resolution
        );
        row * self.resolution + col
    }

    /// # Panics
    ///
    /// If `col` or `row` is `>= resolution`.
    pub fn point(&self, col: usize, row: usize) -> Point {
        Point::new(self.coords[col], self.coords[row])
    }
}

/// Sampled 2D field. `None` marks samples outside the physical domain.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FieldSample2D {
    pub grid: Grid2D,
    pub values: Vec<Option<f64>>,
}

impl FieldSample2D {
    /// `None` is a masked sample.
    ///
    /// # Panics
    ///
    /// If `col` or `row` is `>= grid.resolution`.
    pub fn get(&self, col: usize, row: usize) -> Option<f64> {
        self.values[self.grid.index(col, row)]
    }

    pub fn magnitude(&self) -> Vec<Option<f64>> {
        self.values.iter().map(|v| v.map(f64::abs)).collect()
    }

    pub fn defined(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(|v| *v)
    }
}
