//! Linear second-order two-point boundary-value problems
//! ```text
//! y''(x) + p(x) y'(x) + q(x) y(x) = f(x)
//! ```
//! on a [`Grid`], solved by a single call to the tridiagonal kernel.
//!
//! Interior rows use central differences. The boundary rows are written by
//! [`Boundaries`]; derivative (Neumann) rows are then raised from first to
//! second order by eliminating `y''` at the boundary through the equation
//! itself, so that the whole solution converges as `O(h²)`.
//!
//! ```
//! use std::f64::consts::FRAC_PI_2;
//! use progonka::{ boundary::Boundaries, bvp, grid::Grid };
//!
//! // y'' = sin(x), y(-π/2) = 0, y'(π/2) = 1
//! let grid = Grid::new_linspace((-FRAC_PI_2, FRAC_PI_2, 1001)).unwrap();
//! let y = bvp::solve_fn(&grid, f64::sin, Boundaries::dirichlet_neumann(0.0, 1.0))
//!     .unwrap();
//! let exact = grid.sample(|x| -x.sin() - 1.0 + x + FRAC_PI_2);
//! assert!(y.iter().zip(&exact).all(|(yk, ek)| (yk - ek).abs() < 1e-4));
//! ```

use log::debug;
use ndarray as nd;
use crate::{
    Arr1,
    boundary::{ Boundaries, Condition },
    error::{ LengthError, XError },
    grid::Grid,
    tridiag::Tridiagonal,
};

pub type XResult<T> = Result<T, XError>;

/// Solve `y'' + p y' + q y = f` for coefficient functions sampled on the grid.
pub fn solve_linear<S, T, U>(
    grid: &Grid,
    p: &Arr1<S>,
    q: &Arr1<T>,
    f: &Arr1<U>,
    boundaries: Boundaries,
) -> XResult<nd::Array1<f64>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
    U: nd::Data<Elem = f64>,
{
    LengthError::check(grid.x(), p)?;
    LengthError::check(grid.x(), q)?;
    LengthError::check(grid.x(), f)?;
    let h = grid.h();
    let n = grid.last();
    let ondx2 = h.powi(2).recip();
    let mut op: Tridiagonal<f64> = Tridiagonal::zeros(n + 1);
    let mut d: nd::Array1<f64> = f.to_owned();
    for i in 1..n {
        op.set_row(
            i,
            ondx2 - p[i] / (2.0 * h),
            -2.0 * ondx2 + q[i],
            ondx2 + p[i] / (2.0 * h),
        );
    }
    boundaries.apply(&mut op, &mut d, h)?;

    // y(x₀ ± h) = y(x₀) ± h y'(x₀) + h²/2 y''(x₀), with y'' = f - p y' - q y
    if let Condition::Neumann(g) = boundaries.left {
        let (a0, b0, c0) = op.row(0);
        op.set_row(0, a0, b0 + h / 2.0 * q[0], c0);
        d[0] += h / 2.0 * (f[0] - p[0] * g);
    }
    if let Condition::Neumann(g) = boundaries.right {
        let (an, bn, cn) = op.row(n);
        op.set_row(n, an, bn - h / 2.0 * q[n], cn);
        d[n] -= h / 2.0 * (f[n] - p[n] * g);
    }

    debug!(
        "bvp::solve_linear: {} points, h = {:e}, {:?}",
        grid.len(),
        h,
        boundaries,
    );
    let y = op.solve(&d)?;
    Ok(y)
}

/// Solve `y'' = f` for a right-hand side sampled on the grid.
pub fn solve<S>(grid: &Grid, f: &Arr1<S>, boundaries: Boundaries)
    -> XResult<nd::Array1<f64>>
where S: nd::Data<Elem = f64>
{
    let zero: nd::Array1<f64> = nd::Array1::zeros(grid.len());
    solve_linear(grid, &zero, &zero, f, boundaries)
}

/// Solve `y'' = f` for a right-hand side given as a function, sampling it on
/// the grid first.
pub fn solve_fn<F>(grid: &Grid, f: F, boundaries: Boundaries)
    -> XResult<nd::Array1<f64>>
where F: FnMut(f64) -> f64
{
    solve(grid, &grid.sample(f), boundaries)
}
