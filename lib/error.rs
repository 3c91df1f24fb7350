//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        Self::check_len(a.len(), b.len())
    }

    pub(crate) fn check_len(na: usize, nb: usize) -> Result<(), Self> {
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned when grid or time-step parameters are rejected before any
/// computation begins.
#[derive(Debug, Error)]
pub enum GridError {
    /// Returned when a non-positive (or non-finite) grid spacing is
    /// encountered.
    #[error("grid spacing must be greater than 0; got {0}")]
    BadSpacing(f64),

    /// Returned when a non-positive (or non-finite) time step is encountered.
    #[error("time step must be greater than 0; got {0}")]
    BadTimestep(f64),

    /// Returned when a grid has fewer than 3 points.
    #[error("grids must have at least 3 points; got {0}")]
    TooFewPoints(usize),

    /// Returned when a non-positive diffusion coefficient is encountered.
    #[error("diffusivity must be greater than 0; got {0}")]
    BadDiffusivity(f64),

    /// Returned when a time coordinate array has fewer than 2 points.
    #[error("time coordinate arrays must have at least 2 points; got {0}")]
    TooFewTimes(usize),

    /// Returned when a time coordinate array fails to increase strictly at the
    /// given index.
    #[error("time coordinates must be strictly increasing; failed at index {0}")]
    NonIncreasingTime(usize),
}

impl GridError {
    pub(crate) fn check_spacing(h: f64) -> Result<(), Self> {
        (h.is_finite() && h > 0.0).then_some(()).ok_or(Self::BadSpacing(h))
    }

    pub(crate) fn check_timestep(tau: f64) -> Result<(), Self> {
        (tau.is_finite() && tau > 0.0).then_some(()).ok_or(Self::BadTimestep(tau))
    }

    pub(crate) fn check_points(n: usize) -> Result<(), Self> {
        (n >= 3).then_some(()).ok_or(Self::TooFewPoints(n))
    }

    pub(crate) fn check_times(n: usize) -> Result<(), Self> {
        (n >= 2).then_some(()).ok_or(Self::TooFewTimes(n))
    }

    pub(crate) fn check_diffusivity(D: f64) -> Result<(), Self> {
        (D.is_finite() && D > 0.0).then_some(()).ok_or(Self::BadDiffusivity(D))
    }
}

/// Returned from the tridiagonal kernel in [`tridiag`][crate::tridiag].
#[derive(Debug, Error)]
pub enum TridiagError {
    /// Returned when a zero or near-zero pivot is met during elimination or
    /// back substitution. This signals a malformed or non-diagonally-dominant
    /// system (e.g. ill-posed boundary conditions).
    #[error("singular tridiagonal system: zero pivot at row {0}")]
    Singular(usize),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

/// Returned from spatial (time-independent) solver functions in
/// [`bvp`][crate::bvp] and [`eigen`][crate::eigen].
#[derive(Debug, Error)]
pub enum XError {
    /// Returned when a non-positive `epsilon` value is encountered.
    #[error("epsilon values must be greater than 0; got {0}")]
    BadEpsilon(f64),

    /// Returned when a non-positive `maxiters` value is encountered.
    #[error("maxiters must be greater than 0; got {0}")]
    BadMaxiters(usize),

    /// Returned when a basis vector used for deflation has zero norm.
    #[error("eigen::deflate: degenerate basis vector at index {0}")]
    DegenerateBasis(usize),

    /// Returned when an inverse-iteration iterate deflates to zero, i.e. the
    /// seed vector has no component outside the span of the accepted
    /// eigenvectors.
    #[error("eigen::inverse_iteration: iterate vanished while searching for eigenpair {0}")]
    VanishingIterate(usize),

    /// [`GridError`]
    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    /// [`TridiagError`]
    #[error("tridiagonal solve error: {0}")]
    Tridiag(#[from] TridiagError),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

impl XError {
    pub(crate) fn check_epsilon(epsilon: f64) -> Result<(), Self> {
        (epsilon > 0.0).then_some(()).ok_or(Self::BadEpsilon(epsilon))
    }

    pub(crate) fn check_maxiters(maxiters: usize) -> Result<(), Self> {
        (maxiters != 0).then_some(()).ok_or(Self::BadMaxiters(maxiters))
    }
}

/// Returned from time-dependent solver functions in
/// [`diffusion`][crate::diffusion] and [`timedep`][crate::timedep].
#[derive(Debug, Error)]
pub enum TError {
    /// [`GridError`]
    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    /// [`TridiagError`]
    #[error("tridiagonal solve error: {0}")]
    Tridiag(#[from] TridiagError),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}
