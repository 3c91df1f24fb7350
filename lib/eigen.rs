//! Extraction of the lowest eigenpairs of a tridiagonal operator by shifted
//! inverse iteration with Gram-Schmidt deflation.
//!
//! The default operator is the discretized one-dimensional Schrödinger
//! Hamiltonian (in units where ħ = m = 1)
//! ```text
//!       1 ∂²
//! H = - - --- + V(x)
//!       2 ∂x²
//! ```
//! whose three-point representation has diagonal `1/h² + V[i]` and
//! off-diagonals `-1/(2h²)`.
//!
//! ```
//! use progonka::eigen::{ Stop, System };
//!
//! let sys = System::new_linspace((-8.0, 8.0, 801), |x| 0.5 * x.powi(2)).unwrap();
//! let sols = sys.solve(2, Stop::default()).unwrap();
//! assert!((sols[0].e - 0.5).abs() < 1e-3);
//! assert!((sols[1].e - 1.5).abs() < 1e-3);
//! ```

use std::cmp;
use log::{ debug, warn };
use ndarray as nd;
use crate::{
    Arr1,
    error::{ GridError, LengthError, XError },
    grid::Grid,
    tridiag::Tridiagonal,
    utils::{ dot, norm },
    DEF_EPSILON,
    DEF_ITERS,
    DEF_MAXITERS,
};

pub type XResult<T> = Result<T, XError>;

/// A single eigenpair.
///
/// This struct is usually only returned by a solver function; you probably
/// won't ever instantiate it yourself. The eigenvector has unit Euclidean
/// norm.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Eigenvalue estimate
    pub e: f64,
    /// Eigenvector
    pub wf: nd::Array1<f64>,
}

impl Solution {
    /// Compare two `Solution`s by their eigenvalue.
    pub fn cmp_energy(&self, other: &Self) -> Option<cmp::Ordering> {
        self.e.partial_cmp(&other.e)
    }

    /// Compute the residual `‖A wf - e wf‖` with respect to an operator.
    pub fn residual(&self, op: &Tridiagonal<f64>) -> XResult<f64> {
        let mut r = op.apply(&self.wf)?;
        r.scaled_add(-self.e, &self.wf);
        Ok(norm(&r))
    }
}

/// Stopping rule for each eigenpair's inner iteration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Stop {
    /// Perform exactly this many solves per eigenpair.
    Iters(usize),
    /// Iterate until the change in the eigenvalue estimate between
    /// consecutive solves falls below `epsilon` (default: `1e-10`), for at
    /// most `maxiters` solves (default: `1000`). The change is relative to the
    /// estimate, or absolute for estimates smaller than 1 in magnitude.
    Tolerance {
        epsilon: Option<f64>,
        maxiters: Option<usize>,
    },
}

impl Default for Stop {
    /// Fixed count of 60 solves.
    fn default() -> Self { Self::Iters(DEF_ITERS) }
}

impl Stop {
    /// Return `true` if `self` is `Iters`.
    pub fn is_iters(&self) -> bool { matches!(self, Self::Iters(_)) }

    /// Return `true` if `self` is `Tolerance`.
    pub fn is_tolerance(&self) -> bool { matches!(self, Self::Tolerance { .. }) }

    // (maximum number of solves, convergence bound if any)
    fn params(&self) -> XResult<(usize, Option<f64>)> {
        match *self {
            Self::Iters(n) => {
                XError::check_maxiters(n)?;
                Ok((n, None))
            },
            Self::Tolerance { epsilon, maxiters } => {
                let epsilon = epsilon.unwrap_or(DEF_EPSILON);
                let maxiters = maxiters.unwrap_or(DEF_MAXITERS);
                XError::check_epsilon(epsilon)?;
                XError::check_maxiters(maxiters)?;
                Ok((maxiters, Some(epsilon)))
            },
        }
    }
}

/// Construct the three-point Hamiltonian for a potential sampled with spacing
/// `dx`.
pub fn hamiltonian<S>(dx: f64, V: &Arr1<S>) -> XResult<Tridiagonal<f64>>
where S: nd::Data<Elem = f64>
{
    GridError::check_spacing(dx)?;
    GridError::check_points(V.len())?;
    Ok(build_hamiltonian(dx, V))
}

// unchecked version of `hamiltonian`
pub(crate) fn build_hamiltonian<S>(dx: f64, V: &Arr1<S>) -> Tridiagonal<f64>
where S: nd::Data<Elem = f64>
{
    let ondx2 = dx.powi(2).recip();
    let mut H = Tridiagonal::from_elem(V.len(), -ondx2 / 2.0, ondx2, -ondx2 / 2.0);
    V.iter().enumerate()
        .for_each(|(i, &Vi)| {
            let (a, b, c) = H.row(i);
            H.set_row(i, a, b + Vi, c);
        });
    H
}

/// Generate the trial vector `1 + i / (n - 1)`, `i ∊ {0, ..., n - 1}`.
pub fn seed_ramp(n: usize) -> nd::Array1<f64> {
    nd::Array1::linspace(1.0, 2.0, n)
}

/// Remove from `d` its components along each vector in `basis`, in order.
///
/// Returns [`XError::DegenerateBasis`] if a basis vector has zero norm.
pub fn deflate<S>(d: &mut Arr1<S>, basis: &[Solution]) -> XResult<()>
where S: nd::DataMut<Elem = f64>
{
    for (k, sol) in basis.iter().enumerate() {
        LengthError::check(&sol.wf, &*d)?;
        let norm2: f64 = dot(&sol.wf, &sol.wf);
        if !(norm2 > 0.0 && norm2.is_finite()) {
            return Err(XError::DegenerateBasis(k));
        }
        let proj: f64 = dot(&sol.wf, &*d) / norm2;
        d.scaled_add(-proj, &sol.wf);
    }
    Ok(())
}

// relative change test, absolute near zero
fn settled(e_prev: f64, e_new: f64, epsilon: f64) -> bool {
    (e_new - e_prev).abs() < epsilon * e_new.abs().max(1.0)
}

// run the inner iteration for the eigenpair following those in `basis`
fn find_next<S>(
    op: &Tridiagonal<f64>,
    seed: &Arr1<S>,
    basis: &[Solution],
    shift: f64,
    stop: Stop,
) -> XResult<Solution>
where S: nd::Data<Elem = f64>
{
    let j = basis.len();
    let (maxiters, epsilon) = stop.params()?;
    let mut d: nd::Array1<f64> = seed.to_owned();
    deflate(&mut d, basis)?;
    let mut dnorm = norm(&d);
    if !(dnorm > 0.0 && dnorm.is_finite()) {
        return Err(XError::VanishingIterate(j));
    }
    d /= dnorm;

    let mut work: nd::Array1<f64> = nd::Array1::zeros(op.len());
    let mut y: nd::Array1<f64>;
    let mut e_new: f64;
    let mut e = f64::NAN;
    let mut converged = false;
    let mut k: usize = 0;
    for i in 0..maxiters {
        k = i;
        y = d.clone();
        op.solve_inplace(&mut y, &mut work)?;
        deflate(&mut y, basis)?;
        dnorm = norm(&y);
        if !(dnorm > 0.0 && dnorm.is_finite()) {
            return Err(XError::VanishingIterate(j));
        }
        // `d` has unit norm, so the norm ratio is 1 / ‖y‖; the sign recovers
        // eigenvalues below the shift
        e_new = shift + dot(&d, &y).signum() / dnorm;
        y /= dnorm;
        d = y;
        if let Some(eps) = epsilon {
            if settled(e, e_new, eps) {
                e = e_new;
                converged = true;
                break;
            }
        }
        e = e_new;
    }
    if epsilon.is_some() && !converged {
        warn!(
            "eigen::inverse_iteration: eigenpair {} reached maxiters ({}) \
            before converging",
            j,
            maxiters,
        );
    }
    debug!(
        "eigen::inverse_iteration: eigenpair {}: e = {:.6e} after {} solves",
        j,
        e,
        k + 1,
    );
    Ok(Solution { e, wf: d })
}

/// Find the `count` eigenpairs of `op` nearest to `shift`, starting every
/// search from `seed`.
///
/// Each eigenpair is found by repeatedly solving `(op - shift) y = d` and
/// deflating `y` against all previously found eigenvectors. The eigenvalue
/// estimate is `shift ± ‖d‖ / ‖y‖` from the last solve. No sorting is
/// performed: pairs come out in order of increasing distance from `shift` only
/// if the iteration has converged.
pub fn inverse_iteration<S>(
    op: &Tridiagonal<f64>,
    seed: &Arr1<S>,
    count: usize,
    shift: f64,
    stop: Stop,
) -> XResult<Vec<Solution>>
where S: nd::Data<Elem = f64>
{
    LengthError::check(op.b(), seed)?;
    stop.params()?;
    let op_shifted = op.shifted(shift);
    let mut basis: Vec<Solution> = Vec::with_capacity(count);
    for _ in 0..count {
        let sol = find_next(&op_shifted, seed, &basis, shift, stop)?;
        basis.push(sol);
    }
    Ok(basis)
}

/// Simple record to keep track of a grid and a potential sampled on it.
#[derive(Clone, Debug)]
pub struct System {
    // coordinate grid
    grid: Grid,
    // potential array
    V: nd::Array1<f64>,
}

impl System {
    /// Create a new `System`, generating the coordinate array from
    /// "linspace-style" arguments (start, inclusive end, and an array length).
    pub fn new_linspace<F>(xargs: (f64, f64, usize), V: F) -> XResult<Self>
    where F: FnMut(f64) -> f64
    {
        let grid = Grid::new_linspace(xargs)?;
        let V = grid.sample(V);
        Ok(Self { grid, V })
    }

    /// Create a new `System` from a grid and a bare potential array.
    pub fn new_arrays(grid: Grid, V: nd::Array1<f64>) -> XResult<Self> {
        LengthError::check(grid.x(), &V)?;
        Ok(Self { grid, V })
    }

    /// Get a reference to the grid.
    pub fn grid(&self) -> &Grid { &self.grid }

    /// Get a reference to the coordinate array.
    pub fn get_x(&self) -> &nd::Array1<f64> { self.grid.x() }

    /// Get a reference to the potential array.
    pub fn get_V(&self) -> &nd::Array1<f64> { &self.V }

    /// Get the coordinate array grid spacing.
    pub fn get_dx(&self) -> f64 { self.grid.h() }

    /// Get the length of the coordinate and potential arrays.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.grid.len() }

    /// Construct the Hamiltonian.
    pub fn hamiltonian(&self) -> XResult<Tridiagonal<f64>> {
        hamiltonian(self.grid.h(), &self.V)
    }

    /// Find the lowest `count` eigenpairs, starting from [`seed_ramp`] with no
    /// shift.
    pub fn solve(&self, count: usize, stop: Stop) -> XResult<Vec<Solution>> {
        self.solve_shifted(count, 0.0, stop)
    }

    /// Find the `count` eigenpairs nearest to `shift`, starting from
    /// [`seed_ramp`].
    pub fn solve_shifted(&self, count: usize, shift: f64, stop: Stop)
        -> XResult<Vec<Solution>>
    {
        let H = self.hamiltonian()?;
        inverse_iteration(&H, &seed_ramp(self.len()), count, shift, stop)
    }
}
