//! Boundary conditions for two-point problems on a [`Grid`][crate::grid::Grid],
//! and their injection into the first and last rows of a tridiagonal system.
//!
//! The interior rows of a system are the business of each physical problem
//! (diffusion, boundary-value, eigenvalue); the two boundary rows are always
//! written here, so that every solver in the crate treats a given [`Condition`]
//! identically.
//!
//! Row formats, for grid spacing `h`:
//! ```text
//! Dirichlet(v), left:    y[0] = v                   (b = 1, c = 0, d = v)
//! Dirichlet(v), right:   y[n] = v                   (a = 0, b = 1, d = v)
//! Neumann(g), left:      (y[1] - y[0]) / h = g      (b = -1/h, c = 1/h, d = g)
//! Neumann(g), right:     (y[n] - y[n-1]) / h = g    (a = -1/h, b = 1/h, d = g)
//! ```

use ndarray as nd;
use crate::{
    Arr1,
    error::LengthError,
    tridiag::Tridiagonal,
};

/// A condition imposed at one end of the grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Condition {
    /// Fixed value.
    Dirichlet(f64),
    /// Fixed first derivative, by one-sided difference.
    Neumann(f64),
}

impl Condition {
    /// Return `true` if `self` is `Dirichlet`.
    pub fn is_dirichlet(&self) -> bool { matches!(self, Self::Dirichlet(_)) }

    /// Return `true` if `self` is `Neumann`.
    pub fn is_neumann(&self) -> bool { matches!(self, Self::Neumann(_)) }

    /// Return the fixed boundary value if `self` is `Dirichlet`.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Dirichlet(v) => Some(*v),
            Self::Neumann(_) => None,
        }
    }

    /// Return the right-hand side entry of the boundary row.
    pub fn rhs(&self) -> f64 {
        match self {
            Self::Dirichlet(v) => *v,
            Self::Neumann(g) => *g,
        }
    }

    // (b, c) for the first row
    fn left_row(&self, h: f64) -> (f64, f64) {
        match self {
            Self::Dirichlet(_) => (1.0, 0.0),
            Self::Neumann(_) => (-h.recip(), h.recip()),
        }
    }

    // (a, b) for the last row
    fn right_row(&self, h: f64) -> (f64, f64) {
        match self {
            Self::Dirichlet(_) => (0.0, 1.0),
            Self::Neumann(_) => (-h.recip(), h.recip()),
        }
    }
}

/// A pair of conditions for the two ends of the grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Boundaries {
    /// Condition at `x[0]`.
    pub left: Condition,
    /// Condition at `x[n]`.
    pub right: Condition,
}

impl Boundaries {
    pub fn new(left: Condition, right: Condition) -> Self {
        Self { left, right }
    }

    /// Fixed values at both ends.
    pub fn dirichlet(left: f64, right: f64) -> Self {
        Self::new(Condition::Dirichlet(left), Condition::Dirichlet(right))
    }

    /// Fixed value on the left, fixed derivative on the right.
    pub fn dirichlet_neumann(left: f64, right: f64) -> Self {
        Self::new(Condition::Dirichlet(left), Condition::Neumann(right))
    }

    /// Fixed derivative on the left, fixed value on the right.
    pub fn neumann_dirichlet(left: f64, right: f64) -> Self {
        Self::new(Condition::Neumann(left), Condition::Dirichlet(right))
    }

    /// Fixed derivatives at both ends.
    pub fn neumann(left: f64, right: f64) -> Self {
        Self::new(Condition::Neumann(left), Condition::Neumann(right))
    }

    /// Return `true` if neither end fixes a value.
    ///
    /// Pure second-difference operators are singular under such conditions.
    pub fn is_pure_neumann(&self) -> bool {
        self.left.is_neumann() && self.right.is_neumann()
    }

    /// Overwrite the first and last rows of `op` with the boundary rows for
    /// grid spacing `h`, zeroing the unused slots `a[0]` and `c[n]`.
    ///
    /// *Panics if `op` has fewer than 2 rows*.
    pub fn apply_operator(&self, op: &mut Tridiagonal<f64>, h: f64) {
        let n = op.len() - 1;
        let (b0, c0) = self.left.left_row(h);
        op.set_row(0, 0.0, b0, c0);
        let (an, bn) = self.right.right_row(h);
        op.set_row(n, an, bn, 0.0);
    }

    /// Overwrite the first and last entries of a right-hand side vector.
    ///
    /// *Panics if `d` is empty*.
    pub fn apply_rhs<S>(&self, d: &mut Arr1<S>)
    where S: nd::DataMut<Elem = f64>
    {
        let n = d.len() - 1;
        d[0] = self.left.rhs();
        d[n] = self.right.rhs();
    }

    /// Apply [`Self::apply_operator`] and [`Self::apply_rhs`] together.
    ///
    /// *Panics if `op` has fewer than 2 rows*.
    pub fn apply<S>(&self, op: &mut Tridiagonal<f64>, d: &mut Arr1<S>, h: f64)
        -> Result<(), LengthError>
    where S: nd::DataMut<Elem = f64>
    {
        LengthError::check(op.b(), &*d)?;
        self.apply_operator(op, h);
        self.apply_rhs(d);
        Ok(())
    }

    /// Write the values of any Dirichlet ends into a field sampled on the
    /// grid.
    ///
    /// *Panics if `p` is empty*.
    pub fn impose<S>(&self, p: &mut Arr1<S>)
    where S: nd::DataMut<Elem = f64>
    {
        let n = p.len() - 1;
        if let Some(v) = self.left.value() { p[0] = v; }
        if let Some(v) = self.right.value() { p[n] = v; }
    }
}

#[cfg(test)]
mod tests {
    use crate::{ error::TridiagError, grid::Grid };
    use super::*;

    // second-difference operator y'' with zero right-hand side
    fn laplacian(grid: &Grid) -> Tridiagonal<f64> {
        let ondx2 = grid.h().powi(2).recip();
        Tridiagonal::from_elem(grid.len(), ondx2, -2.0 * ondx2, ondx2)
    }

    #[test]
    fn dirichlet_rows() {
        let grid = Grid::new_linspace((0.0, 1.0, 5)).unwrap();
        let mut op = laplacian(&grid);
        let mut d: nd::Array1<f64> = nd::Array1::zeros(grid.len());
        Boundaries::dirichlet(2.0, -1.0).apply(&mut op, &mut d, grid.h()).unwrap();
        assert_eq!(op.row(0), (0.0, 1.0, 0.0));
        assert_eq!(op.row(4), (0.0, 1.0, 0.0));
        assert_eq!((d[0], d[4]), (2.0, -1.0));
        let y = op.solve(&d).unwrap();
        let exact = grid.sample(|x| 2.0 - 3.0 * x);
        assert!(y.iter().zip(&exact).all(|(yk, ek)| (yk - ek).abs() < 1e-12));
    }

    #[test]
    fn neumann_rows() {
        let grid = Grid::new_linspace((0.0, 2.0, 9)).unwrap();
        let h = grid.h();
        let mut op = laplacian(&grid);
        let mut d: nd::Array1<f64> = nd::Array1::zeros(grid.len());
        Boundaries::dirichlet_neumann(1.0, 0.5).apply(&mut op, &mut d, h).unwrap();
        assert_eq!(op.row(8), (-1.0 / h, 1.0 / h, 0.0));
        // linear solutions are reproduced exactly by one-sided differences
        let y = op.solve(&d).unwrap();
        let exact = grid.sample(|x| 1.0 + 0.5 * x);
        assert!(y.iter().zip(&exact).all(|(yk, ek)| (yk - ek).abs() < 1e-12));

        let mut op = laplacian(&grid);
        Boundaries::neumann_dirichlet(0.5, 2.0).apply(&mut op, &mut d, h).unwrap();
        assert_eq!(op.row(0), (0.0, -1.0 / h, 1.0 / h));
        let y = op.solve(&d).unwrap();
        let exact = grid.sample(|x| 1.0 + 0.5 * x);
        assert!(y.iter().zip(&exact).all(|(yk, ek)| (yk - ek).abs() < 1e-12));
    }

    #[test]
    fn pure_neumann_is_singular() {
        // power-of-two spacing keeps the elimination exact
        let grid = Grid::new_spacing(0.0, 0.25, 8).unwrap();
        let bcs = Boundaries::neumann(0.0, 0.0);
        assert!(bcs.is_pure_neumann());
        let mut op = laplacian(&grid);
        let mut d: nd::Array1<f64> = nd::Array1::zeros(grid.len());
        bcs.apply(&mut op, &mut d, grid.h()).unwrap();
        assert!(matches!(op.solve(&d), Err(TridiagError::Singular(8))));
    }

    #[test]
    fn impose_values() {
        let mut p: nd::Array1<f64> = nd::Array1::ones(4);
        Boundaries::dirichlet_neumann(0.0, 3.0).impose(&mut p);
        assert_eq!(p, nd::array![0.0, 1.0, 1.0, 1.0]);
        Boundaries::dirichlet(5.0, 6.0).impose(&mut p);
        assert_eq!(p, nd::array![5.0, 1.0, 1.0, 6.0]);
    }

    #[test]
    fn length_checked() {
        let mut op: Tridiagonal<f64> = Tridiagonal::zeros(4);
        let mut d: nd::Array1<f64> = nd::Array1::zeros(3);
        assert!(Boundaries::dirichlet(0.0, 0.0).apply(&mut op, &mut d, 0.1).is_err());
    }
}
