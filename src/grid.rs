//! Spanwise sample grid and the profiles indexed on it.

use std::ops::Index;

use ndarray::Array1;

/// Relative slack applied when counting stations so that `20.0 / 0.1` yields 200 stations.
const COUNT_TOLERANCE: f64 = 1.0e-9;

/// Ordered stations `y_i = i·Δ` along the half-span.
///
/// Stations are left endpoints of cells of width `Δ`: a half-span `b/2` holds
/// `floor(b / (2Δ))` of them, so the last station sits one step inboard of the tip
/// whenever `Δ` divides the half-span. Every rectangle-rule sum in the crate uses the
/// same stations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpanGrid {
    /// Distance between neighbouring stations in metres.
    step: f64,
    /// Number of stations.
    len: usize,
}

impl SpanGrid {
    /// Build the grid covering `[0, half_span)` at spacing `step`.
    ///
    /// # Examples
    /// ```
    /// use sparx::SpanGrid;
    ///
    /// let grid = SpanGrid::new(10.0, 0.5);
    /// assert_eq!(grid.len(), 20);
    /// assert_eq!(grid.position(3), 1.5);
    /// ```
    #[must_use]
    pub fn new(half_span: f64, step: f64) -> Self {
        let ratio = half_span / step;
        let len = if ratio.is_finite() && ratio > 0.0 {
            // Truncation is the discretization rule.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let count = (ratio * (1.0 + COUNT_TOLERANCE)).floor() as usize;
            count
        } else {
            0
        };
        Self { step, len }
    }

    /// Build a grid with an explicit number of stations.
    #[must_use]
    pub const fn with_len(step: f64, len: usize) -> Self {
        Self { step, len }
    }

    /// Distance between neighbouring stations in metres.
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Number of stations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Return `true` when the grid holds no stations.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Spanwise position of station `index` in metres.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn position(&self, index: usize) -> f64 {
        index as f64 * self.step
    }

    /// Iterate over every station position from root to tip.
    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(move |index| self.position(index))
    }

    /// Index of the first station at or outboard of `y`, or `len()` when none is.
    #[must_use]
    pub fn first_index_from(&self, y: f64) -> usize {
        (0..self.len)
            .find(|&index| self.position(index) >= y)
            .unwrap_or(self.len)
    }

    /// Evaluate `f` at every station.
    pub fn sample<F: Fn(f64) -> f64>(&self, f: F) -> Profile {
        self.positions().map(f).collect()
    }

    /// Left-endpoint rectangle-rule integral of `f` over the stations.
    pub fn rectangle_sum<F: Fn(f64) -> f64>(&self, f: F) -> f64 {
        self.positions().map(|y| f(y) * self.step).sum()
    }
}

/// One physical quantity sampled at every station of a [`SpanGrid`].
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    /// Sampled values, root first.
    values: Array1<f64>,
}

impl Profile {
    /// Profile of `len` zeros.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self {
            values: Array1::zeros(len),
        }
    }

    /// Wrap existing samples.
    #[must_use]
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self {
            values: Array1::from_vec(values),
        }
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Return `true` when the profile holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Root sample.
    #[must_use]
    pub fn first(&self) -> Option<f64> {
        self.get(0)
    }

    /// Tip sample.
    #[must_use]
    pub fn last(&self) -> Option<f64> {
        self.len().checked_sub(1).and_then(|index| self.get(index))
    }

    /// Iterate over the samples from root to tip.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Borrow the underlying array.
    #[must_use]
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Copy the samples into a vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.values.to_vec()
    }

    /// Apply `f` to every sample.
    #[must_use]
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Self {
        Self {
            values: self.values.mapv(f),
        }
    }

    /// Combine two equally long profiles sample by sample.
    #[must_use]
    pub fn zip_map<F: Fn(f64, f64) -> f64>(&self, other: &Self, f: F) -> Self {
        debug_assert_eq!(self.len(), other.len());
        self.iter().zip(other.iter()).map(|(a, b)| f(a, b)).collect()
    }

    /// Largest magnitude together with its index.
    #[must_use]
    pub fn max_abs(&self) -> Option<(usize, f64)> {
        self.iter()
            .map(f64::abs)
            .enumerate()
            .fold(None, |best, (index, value)| match best {
                Some((_, current)) if current >= value => best,
                _ => Some((index, value)),
            })
    }

    /// Index of the first NaN or infinite sample.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<usize> {
        self.iter().position(|value| !value.is_finite())
    }

    /// Mutable access for the integrators.
    pub(crate) fn values_mut(&mut self) -> &mut Array1<f64> {
        &mut self.values
    }
}

impl Index<usize> for Profile {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

impl FromIterator<f64> for Profile {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<f64>> for Profile {
    fn from(values: Vec<f64>) -> Self {
        Self::from_vec(values)
    }
}
