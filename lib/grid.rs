//! Uniform one-dimensional coordinate grids.

use ndarray as nd;
use crate::error::GridError;

pub type GridResult<T> = Result<T, GridError>;

/// Uniformly spaced spatial grid of `n + 1` points, indexed `0..=n`.
///
/// Construction validates the spacing (`h > 0`) and point count (at least
/// three points), so every solver taking a `Grid` can assume both.
#[derive(Clone, Debug)]
pub struct Grid {
    // coordinate array
    x: nd::Array1<f64>,
    // grid spacing
    h: f64,
}

impl Grid {
    /// Create a new `Grid` from "linspace-style" arguments (start, inclusive
    /// end, and a number of points).
    pub fn new_linspace(xargs: (f64, f64, usize)) -> GridResult<Self> {
        GridError::check_points(xargs.2)?;
        let h = (xargs.1 - xargs.0) / (xargs.2 - 1) as f64;
        GridError::check_spacing(h)?;
        let x: nd::Array1<f64> = nd::Array1::linspace(xargs.0, xargs.1, xargs.2);
        Ok(Self { x, h })
    }

    /// Create a new `Grid` from a start coordinate, a spacing, and a number of
    /// intervals `n` (giving `n + 1` points).
    pub fn new_spacing(x0: f64, h: f64, n: usize) -> GridResult<Self> {
        GridError::check_spacing(h)?;
        GridError::check_points(n + 1)?;
        let x: nd::Array1<f64> = (0..=n).map(|i| x0 + i as f64 * h).collect();
        Ok(Self { x, h })
    }

    /// Get a reference to the coordinate array.
    pub fn x(&self) -> &nd::Array1<f64> { &self.x }

    /// Get the grid spacing.
    pub fn h(&self) -> f64 { self.h }

    /// Get the number of points, `n + 1`.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.x.len() }

    /// Get the index of the last point, `n`.
    pub fn last(&self) -> usize { self.x.len() - 1 }

    /// Sample a function over the grid.
    pub fn sample<F>(&self, f: F) -> nd::Array1<f64>
    where F: FnMut(f64) -> f64
    {
        self.x.mapv(f)
    }
}
