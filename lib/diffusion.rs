//! Implicit time stepping for the one-dimensional diffusion equation
//! ```text
//! ∂p         ∂²p
//! -- = D --- + f(x, t)
//! ∂t         ∂x²
//! ```
//! on a [`Grid`], with one tridiagonal solve per time level.
//!
//! In all 2D arrays, the first (or zero-th) axis indexes time.
//!
//! ```
//! use progonka::{ boundary::Boundaries, diffusion::{ self, Stepper }, grid::Grid };
//!
//! let grid = Grid::new_linspace((0.0, 1.0, 101)).unwrap();
//! let p0 = grid.sample(|x| x * (1.0 - x).powi(2));
//! let stepper = Stepper::new(grid, 0.01, Boundaries::dirichlet(0.0, 0.0)).unwrap();
//! let p = stepper.evolve(&p0, 100).unwrap();
//! assert_eq!(p.shape(), &[101, 101]);
//! let energy = diffusion::energy(&p);
//! assert!(energy[100] < energy[0]);
//! ```

use log::debug;
use ndarray as nd;
use crate::{
    Arr1,
    Arr2,
    boundary::Boundaries,
    error::{ GridError, LengthError, TError },
    grid::Grid,
    tridiag::Tridiagonal,
};

pub type TResult<T> = Result<T, TError>;

/// Time discretization.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Scheme {
    /// Average of explicit and implicit spatial terms (θ = ½); second order in
    /// time.
    #[default]
    CrankNicolson,
    /// Fully implicit, backward Euler (θ = 1); first order in time, but damps
    /// stiff modes.
    Implicit,
}

impl Scheme {
    /// Weight of the implicit (new time level) terms.
    pub fn theta(&self) -> f64 {
        match self {
            Self::CrankNicolson => 0.5,
            Self::Implicit => 1.0,
        }
    }
}

/// Drives a field through successive time levels.
///
/// Both schemes are unconditionally stable for the diffusion term; no check
/// on `D τ / h²` is made.
pub struct Stepper<'a> {
    grid: Grid,
    tau: f64,
    D: f64,
    scheme: Scheme,
    boundaries: Boundaries,
    source: Option<Box<dyn Fn(f64, f64) -> f64 + 'a>>,
}

impl<'a> Stepper<'a> {
    /// Create a new `Stepper` with time step `tau`, unit diffusivity, no
    /// source, and the Crank-Nicolson scheme.
    pub fn new(grid: Grid, tau: f64, boundaries: Boundaries) -> TResult<Self> {
        GridError::check_timestep(tau)?;
        Ok(Self {
            grid,
            tau,
            D: 1.0,
            scheme: Scheme::default(),
            boundaries,
            source: None,
        })
    }

    /// Set the diffusion coefficient.
    pub fn with_diffusivity(mut self, D: f64) -> TResult<Self> {
        GridError::check_diffusivity(D)?;
        self.D = D;
        Ok(self)
    }

    /// Set the time discretization.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Set a source term `f(x, t)`.
    pub fn with_source<F>(mut self, f: F) -> Self
    where F: Fn(f64, f64) -> f64 + 'a
    {
        self.source = Some(Box::new(f));
        self
    }

    /// Get a reference to the spatial grid.
    pub fn grid(&self) -> &Grid { &self.grid }

    /// Get the time step.
    pub fn tau(&self) -> f64 { self.tau }

    /// Get the boundary conditions.
    pub fn boundaries(&self) -> &Boundaries { &self.boundaries }

    /// Generate the time coordinates of levels `0..=steps`.
    pub fn times(&self, steps: usize) -> nd::Array1<f64> {
        (0..=steps).map(|m| m as f64 * self.tau).collect()
    }

    // the operator is the same at every time level; only the right-hand side
    // changes
    fn operator(&self) -> Tridiagonal<f64> {
        let r = self.D * self.tau / self.grid.h().powi(2);
        let theta = self.scheme.theta();
        let mut op = Tridiagonal::from_elem(
            self.grid.len(),
            -theta * r,
            1.0 + 2.0 * theta * r,
            -theta * r,
        );
        self.boundaries.apply_operator(&mut op, self.grid.h());
        op
    }

    fn source_at(&self, x: f64, t: f64) -> f64 {
        self.source.as_ref().map(|f| f(x, t)).unwrap_or(0.0)
    }

    fn step_with<S>(
        &self,
        op: &Tridiagonal<f64>,
        prev: &Arr1<S>,
        t_prev: f64,
        work: &mut nd::Array1<f64>,
    ) -> TResult<nd::Array1<f64>>
    where S: nd::Data<Elem = f64>
    {
        let n = self.grid.last();
        let r = self.D * self.tau / self.grid.h().powi(2);
        let theta = self.scheme.theta();
        let t_next = t_prev + self.tau;
        let x = self.grid.x();
        let mut d: nd::Array1<f64> = nd::Array1::zeros(n + 1);
        for i in 1..n {
            let lap = prev[i + 1] - 2.0 * prev[i] + prev[i - 1];
            let src
                = (1.0 - theta) * self.source_at(x[i], t_prev)
                + theta * self.source_at(x[i], t_next);
            d[i] = prev[i] + (1.0 - theta) * r * lap + self.tau * src;
        }
        self.boundaries.apply_rhs(&mut d);
        op.solve_inplace(&mut d, work)?;
        Ok(d)
    }

    /// Advance a single time level, from `prev` at time `t_prev` to time
    /// `t_prev + tau`.
    pub fn step<S>(&self, prev: &Arr1<S>, t_prev: f64)
        -> TResult<nd::Array1<f64>>
    where S: nd::Data<Elem = f64>
    {
        LengthError::check(self.grid.x(), prev)?;
        let op = self.operator();
        let mut work: nd::Array1<f64> = nd::Array1::zeros(self.grid.len());
        self.step_with(&op, prev, t_prev, &mut work)
    }

    /// Advance the initial field `p0` (at time 0) through `steps` time levels,
    /// returning all `steps + 1` levels.
    ///
    /// Values at Dirichlet ends are written into the initial level as well, so
    /// that every level is consistent with the boundary conditions.
    pub fn evolve<S>(&self, p0: &Arr1<S>, steps: usize)
        -> TResult<nd::Array2<f64>>
    where S: nd::Data<Elem = f64>
    {
        LengthError::check(self.grid.x(), p0)?;
        debug!(
            "diffusion::evolve: {} levels on {} points (tau = {:e}, scheme = {:?})",
            steps,
            self.grid.len(),
            self.tau,
            self.scheme,
        );
        let op = self.operator();
        let mut work: nd::Array1<f64> = nd::Array1::zeros(self.grid.len());
        let mut p: nd::Array2<f64> = nd::Array2::zeros((steps + 1, self.grid.len()));
        let mut p_temp: nd::Array1<f64> = p0.to_owned();
        self.boundaries.impose(&mut p_temp);
        p.slice_mut(nd::s![0, ..]).assign(&p_temp);
        let iter = p.axis_iter_mut(nd::Axis(0)).enumerate().skip(1);
        for (m, pm) in iter {
            let t_prev = (m - 1) as f64 * self.tau;
            p_temp = self.step_with(&op, &p_temp, t_prev, &mut work)?;
            p_temp.clone().move_into(pm);
        }
        Ok(p)
    }
}

/// Compute the discrete energy `Σ p²` at every time level.
pub fn energy<S>(p: &Arr2<S>) -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    p.axis_iter(nd::Axis(0))
        .map(|pm| pm.iter().map(|pk| pk.powi(2)).sum::<f64>())
        .collect()
}

/// Compute the sum of interior values `Σ p[1..n]` at every time level.
///
/// Levels with fewer than three points have no interior and sum to zero.
pub fn interior_sum<S>(p: &Arr2<S>) -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    let n = p.ncols();
    if n < 3 { return nd::Array1::zeros(p.nrows()); }
    p.axis_iter(nd::Axis(0))
        .map(|pm| pm.slice(nd::s![1..n - 1]).sum())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;
    use super::*;

    #[test]
    fn energy_decays() {
        let L = 1.0;
        let (n, k) = (100, 100);
        let grid = Grid::new_linspace((0.0, L, n + 1)).unwrap();
        let h = grid.h();
        let p0: nd::Array1<f64>
            = (0..=n).map(|i| h * i as f64 * (1.0 - i as f64 * h / L).powi(2)).collect();
        let stepper
            = Stepper::new(grid, 1.0 / k as f64, Boundaries::dirichlet(0.0, 0.0))
            .unwrap();
        let p = stepper.evolve(&p0, k).unwrap();
        assert_eq!(p.shape(), &[k + 1, n + 1]);
        let e = energy(&p);
        for m in 1..=k {
            assert!(e[m] <= e[m - 1] * (1.0 + 1e-12), "energy grew at level {m}");
        }
        assert!(e[k] < 1e-3 * e[0]);
        assert!(p.column(0).iter().all(|pk| *pk == 0.0));
        assert!(p.column(n).iter().all(|pk| *pk == 0.0));
    }

    #[test]
    fn matches_decaying_mode() {
        let grid = Grid::new_linspace((0.0, 1.0, 51)).unwrap();
        let p0 = grid.sample(|x| (PI * x).sin());
        let stepper
            = Stepper::new(grid.clone(), 1e-3, Boundaries::dirichlet(0.0, 0.0))
            .unwrap();
        let p = stepper.evolve(&p0, 100).unwrap();
        let t = stepper.times(100)[100];
        let exact = grid.sample(|x| (PI * x).sin() * (-PI.powi(2) * t).exp());
        let err = p.row(100).iter().zip(&exact)
            .map(|(pk, ek)| (pk - ek).abs())
            .fold(0.0_f64, f64::max);
        assert!(err < 1e-3, "max error {err}");
    }

    #[test]
    fn linear_profile_is_steady() {
        let grid = Grid::new_linspace((0.0, 1.0, 21)).unwrap();
        let p0 = grid.sample(|x| 1.0 + 2.0 * x);
        for scheme in [Scheme::CrankNicolson, Scheme::Implicit] {
            let stepper
                = Stepper::new(grid.clone(), 0.1, Boundaries::dirichlet(1.0, 3.0))
                .unwrap()
                .with_scheme(scheme);
            let p = stepper.evolve(&p0, 20).unwrap();
            assert!(
                p.row(20).iter().zip(&p0).all(|(pk, p0k)| (pk - p0k).abs() < 1e-10)
            );
        }
    }

    #[test]
    fn source_reaches_steady_state() {
        // D p'' = -2 with zero ends has p = x (1 - x)
        let grid = Grid::new_linspace((0.0, 1.0, 51)).unwrap();
        let p0: nd::Array1<f64> = nd::Array1::zeros(grid.len());
        let stepper
            = Stepper::new(grid.clone(), 0.05, Boundaries::dirichlet(0.0, 0.0))
            .unwrap()
            .with_scheme(Scheme::Implicit)
            .with_source(|_, _| 2.0);
        let p = stepper.evolve(&p0, 200).unwrap();
        let exact = grid.sample(|x| x * (1.0 - x));
        assert!(p.row(200).iter().zip(&exact).all(|(pk, ek)| (pk - ek).abs() < 1e-8));
    }

    #[test]
    fn diffusivity_scales_time() {
        let grid = Grid::new_linspace((0.0, 1.0, 41)).unwrap();
        let p0 = grid.sample(|x| (PI * x).sin());
        let bcs = Boundaries::dirichlet(0.0, 0.0);
        let slow = Stepper::new(grid.clone(), 2e-3, bcs).unwrap()
            .evolve(&p0, 50).unwrap();
        let fast = Stepper::new(grid, 1e-3, bcs).unwrap()
            .with_diffusivity(2.0).unwrap()
            .evolve(&p0, 50).unwrap();
        assert!(
            slow.row(50).iter().zip(fast.row(50))
                .all(|(sk, fk)| (sk - fk).abs() < 1e-12)
        );
    }

    #[test]
    fn insulated_ends() {
        let grid = Grid::new_linspace((0.0, 1.0, 101)).unwrap();
        let p0 = grid.sample(|x| if (0.4..0.6).contains(&x) { 1.0 } else { 0.0 });
        let stepper
            = Stepper::new(grid, 1e-3, Boundaries::neumann(0.0, 0.0)).unwrap();
        let p = stepper.evolve(&p0, 500).unwrap();
        let s = interior_sum(&p);
        assert!(((s[500] - s[0]) / s[0]).abs() < 1e-2);
        let last = p.row(500);
        let spread = last.iter().cloned().fold(f64::MIN, f64::max)
            - last.iter().cloned().fold(f64::MAX, f64::min);
        assert!(spread < 0.5);
        assert!((last[0] - last[1]).abs() < 1e-12);
    }

    #[test]
    fn interior_sum_short_levels() {
        let p = nd::array![[1.0, 2.0, 3.0, 4.0], [0.5, 0.5, 0.5, 0.5]];
        assert_eq!(interior_sum(&p), nd::array![5.0, 1.0]);
        let narrow: nd::Array2<f64> = nd::Array2::ones((3, 1));
        assert_eq!(interior_sum(&narrow), nd::Array1::<f64>::zeros(3));
        let empty: nd::Array2<f64> = nd::Array2::zeros((2, 0));
        assert_eq!(interior_sum(&empty), nd::Array1::<f64>::zeros(2));
        let pair: nd::Array2<f64> = nd::Array2::ones((1, 2));
        assert_eq!(interior_sum(&pair), nd::array![0.0]);
    }

    #[test]
    fn single_step_matches_evolve() {
        let grid = Grid::new_linspace((0.0, 1.0, 11)).unwrap();
        let p0 = grid.sample(|x| x * (1.0 - x));
        let stepper
            = Stepper::new(grid, 0.01, Boundaries::dirichlet(0.0, 0.0)).unwrap();
        let p = stepper.evolve(&p0, 1).unwrap();
        let p1 = stepper.step(&p0, 0.0).unwrap();
        assert_eq!(p.row(1), p1);
    }

    #[test]
    fn rejects_bad_input() {
        let grid = Grid::new_linspace((0.0, 1.0, 11)).unwrap();
        let bcs = Boundaries::dirichlet(0.0, 0.0);
        assert!(matches!(
            Stepper::new(grid.clone(), 0.0, bcs),
            Err(TError::Grid(GridError::BadTimestep(_))),
        ));
        assert!(matches!(
            Stepper::new(grid.clone(), 0.1, bcs).unwrap().with_diffusivity(-1.0),
            Err(TError::Grid(GridError::BadDiffusivity(_))),
        ));
        let stepper = Stepper::new(grid, 0.1, bcs).unwrap();
        assert!(matches!(
            stepper.evolve(&nd::Array1::<f64>::zeros(5), 3),
            Err(TError::Length(LengthError(11, 5))),
        ));
        let grid = Grid::new_spacing(0.0, 0.25, 4).unwrap();
        let stepper = Stepper::new(grid, 0.1, Boundaries::neumann(0.0, 0.0)).unwrap();
        // insulated ends are fine for diffusion; the identity part keeps the
        // operator invertible
        assert!(stepper.evolve(&nd::Array1::<f64>::ones(5), 2).is_ok());
    }
}
