//! The tridiagonal (Thomas, or *progonka*) kernel.
//!
//! Systems are written row-wise as
//! ```text
//! a[i] y[i - 1] + b[i] y[i] + c[i] y[i + 1] = d[i],   i ∊ {0, ..., n - 1}
//! ```
//! with `a[0]` and `c[n - 1]` unused. The first and last rows are free to
//! encode any boundary equation (see [`boundary`][crate::boundary]); the kernel
//! has no knowledge of what they mean.
//!
//! Elimination is performed without pivoting, which is valid for the
//! diagonally dominant systems produced by the discretizations in this crate.
//! Pivots that vanish relative to the magnitude of their row are reported as
//! [`TridiagError::Singular`] rather than being divided through.
//!
//! ```
//! use ndarray as nd;
//! use progonka::tridiag;
//!
//! let a = nd::array![0.0_f64, -1.0, -1.0];
//! let b = nd::array![2.0_f64, 2.0, 2.0];
//! let c = nd::array![-1.0_f64, -1.0, 0.0];
//! let d = nd::array![1.0_f64, 0.0, 1.0];
//! let y = tridiag::solve(&a, &b, &c, &d).unwrap();
//! assert!(y.iter().all(|yk| (yk - 1.0).abs() < 1e-12));
//! ```

use ndarray as nd;
use num_complex::ComplexFloat;
use num_traits::Float;
use crate::{
    Arr1,
    error::{ LengthError, TridiagError },
};

pub type TridiagResult<T> = Result<T, TridiagError>;

// magnitude of an (un-eliminated) row, against which its pivot is compared
fn row_scale<A>(a: A, b: A, c: A) -> A::Real
where A: ComplexFloat
{
    a.abs() + b.abs() + c.abs()
}

fn check_pivot<A>(pivot: A, scale: A::Real, row: usize) -> TridiagResult<()>
where A: ComplexFloat
{
    let mag = pivot.abs();
    let finite = <A::Real as Float>::is_finite(mag);
    (finite && mag > scale * <A::Real as Float>::epsilon())
        .then_some(())
        .ok_or(TridiagError::Singular(row))
}

// forward elimination followed by back substitution; `b` is overwritten with
// the eliminated diagonal and `d` with the solution
fn eliminate<A, S, T, U, V>(
    a: &Arr1<S>,
    b: &mut Arr1<T>,
    c: &Arr1<U>,
    d: &mut Arr1<V>,
) -> TridiagResult<()>
where
    A: ComplexFloat,
    S: nd::Data<Elem = A>,
    T: nd::DataMut<Elem = A>,
    U: nd::Data<Elem = A>,
    V: nd::DataMut<Elem = A>,
{
    let n = b.len();
    if n == 0 { return Ok(()); }
    check_pivot(b[0], row_scale(a[0], b[0], c[0]), 0)?;
    let mut factor: A;
    for i in 1..n {
        let scale = row_scale(a[i], b[i], c[i]);
        factor = a[i] / b[i - 1];
        b[i] = b[i] - factor * c[i - 1];
        d[i] = d[i] - factor * d[i - 1];
        check_pivot(b[i], scale, i)?;
    }
    d[n - 1] = d[n - 1] / b[n - 1];
    for i in (0..n - 1).rev() {
        d[i] = (d[i] - c[i] * d[i + 1]) / b[i];
    }
    Ok(())
}

fn check_lengths(n: usize, lens: [usize; 3]) -> TridiagResult<()> {
    lens.into_iter()
        .try_for_each(|len| LengthError::check_len(n, len))
        .map_err(TridiagError::from)
}

/// Solve the system given by sub-diagonal `a`, diagonal `b`, super-diagonal
/// `c`, and right-hand side `d`, returning a newly allocated solution.
///
/// None of the inputs are modified; the elimination works on private copies
/// of `b` and `d`.
pub fn solve<S, T, U, V, A>(
    a: &Arr1<S>,
    b: &Arr1<T>,
    c: &Arr1<U>,
    d: &Arr1<V>,
) -> TridiagResult<nd::Array1<A>>
where
    A: ComplexFloat,
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    U: nd::Data<Elem = A>,
    V: nd::Data<Elem = A>,
{
    check_lengths(b.len(), [a.len(), c.len(), d.len()])?;
    let mut b_work: nd::Array1<A> = b.to_owned();
    let mut y: nd::Array1<A> = d.to_owned();
    eliminate(a, &mut b_work, c, &mut y)?;
    Ok(y)
}

/// Like [`solve`], but operating in place on caller-owned buffers.
///
/// On success, `d` holds the solution and `b` holds the eliminated diagonal;
/// on failure both are left in an unspecified state. Callers that need the
/// original diagonal afterwards must pass a copy.
pub fn solve_inplace<S, T, U, V, A>(
    a: &Arr1<S>,
    b: &mut Arr1<T>,
    c: &Arr1<U>,
    d: &mut Arr1<V>,
) -> TridiagResult<()>
where
    A: ComplexFloat,
    S: nd::Data<Elem = A>,
    T: nd::DataMut<Elem = A>,
    U: nd::Data<Elem = A>,
    V: nd::DataMut<Elem = A>,
{
    check_lengths(b.len(), [a.len(), c.len(), d.len()])?;
    eliminate(a, b, c, d)
}

/// An owned tridiagonal operator, reusable across many right-hand sides.
///
/// Arrays held by this type are guaranteed to have equal lengths.
#[derive(Clone, Debug, PartialEq)]
pub struct Tridiagonal<A> {
    a: nd::Array1<A>,
    b: nd::Array1<A>,
    c: nd::Array1<A>,
}

impl<A> Tridiagonal<A>
where A: ComplexFloat
{
    /// Create a new operator from its three diagonals.
    pub fn new(
        a: nd::Array1<A>,
        b: nd::Array1<A>,
        c: nd::Array1<A>,
    ) -> TridiagResult<Self>
    {
        check_lengths(b.len(), [a.len(), c.len(), b.len()])?;
        Ok(Self { a, b, c })
    }

    /// Create a new operator of size `n` with constant diagonals.
    ///
    /// The unused slots `a[0]` and `c[n - 1]` are set to zero.
    pub fn from_elem(n: usize, a: A, b: A, c: A) -> Self {
        let mut a: nd::Array1<A> = nd::Array1::from_elem(n, a);
        let b: nd::Array1<A> = nd::Array1::from_elem(n, b);
        let mut c: nd::Array1<A> = nd::Array1::from_elem(n, c);
        if n > 0 {
            a[0] = A::zero();
            c[n - 1] = A::zero();
        }
        Self { a, b, c }
    }

    /// Get the number of rows.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.b.len() }

    /// Get a reference to the sub-diagonal.
    pub fn a(&self) -> &nd::Array1<A> { &self.a }

    /// Get a reference to the diagonal.
    pub fn b(&self) -> &nd::Array1<A> { &self.b }

    /// Get a reference to the super-diagonal.
    pub fn c(&self) -> &nd::Array1<A> { &self.c }

    /// Get the coefficients `(a[i], b[i], c[i])` of a single row.
    ///
    /// *Panics if `i` is out of bounds*.
    pub fn row(&self, i: usize) -> (A, A, A) {
        (self.a[i], self.b[i], self.c[i])
    }

    /// Overwrite the coefficients of a single row.
    ///
    /// *Panics if `i` is out of bounds*.
    pub fn set_row(&mut self, i: usize, a: A, b: A, c: A) {
        self.a[i] = a;
        self.b[i] = b;
        self.c[i] = c;
    }

    /// Solve `A y = d`, returning a newly allocated solution.
    pub fn solve<S>(&self, d: &Arr1<S>) -> TridiagResult<nd::Array1<A>>
    where S: nd::Data<Elem = A>
    {
        solve(&self.a, &self.b, &self.c, d)
    }

    /// Solve `A y = d` in place, overwriting `d` with the solution.
    ///
    /// `work` is scratch space for the eliminated diagonal and is resized as
    /// needed, so that repeated solves need not allocate.
    pub fn solve_inplace<S>(&self, d: &mut Arr1<S>, work: &mut nd::Array1<A>)
        -> TridiagResult<()>
    where S: nd::DataMut<Elem = A>
    {
        if work.len() == self.b.len() {
            work.assign(&self.b);
        } else {
            *work = self.b.clone();
        }
        solve_inplace(&self.a, work, &self.c, d)
    }

    /// Compute the product `A y`.
    pub fn apply<S>(&self, y: &Arr1<S>) -> TridiagResult<nd::Array1<A>>
    where S: nd::Data<Elem = A>
    {
        LengthError::check(&self.b, y)?;
        let n = self.len();
        let Ay: nd::Array1<A>
            = (0..n)
            .map(|i| {
                let mut acc = self.b[i] * y[i];
                if i > 0 { acc = acc + self.a[i] * y[i - 1]; }
                if i + 1 < n { acc = acc + self.c[i] * y[i + 1]; }
                acc
            })
            .collect();
        Ok(Ay)
    }

    /// Return the operator `A - sigma I`.
    pub fn shifted(&self, sigma: A) -> Self {
        let mut new = self.clone();
        new.b.mapv_inplace(|bk| bk - sigma);
        new
    }

    /// Apply a function to every coefficient, possibly changing the scalar
    /// type.
    ///
    /// The unused slots `a[0]` and `c[n - 1]` remain zero.
    pub fn map<B, F>(&self, mut f: F) -> Tridiagonal<B>
    where
        B: ComplexFloat,
        F: FnMut(A) -> B,
    {
        let n = self.len();
        let mut a: nd::Array1<B> = self.a.mapv(&mut f);
        let b: nd::Array1<B> = self.b.mapv(&mut f);
        let mut c: nd::Array1<B> = self.c.mapv(&mut f);
        if n > 0 {
            a[0] = B::zero();
            c[n - 1] = B::zero();
        }
        Tridiagonal { a, b, c }
    }

    /// Create a new operator of size `n` with all coefficients zero.
    pub fn zeros(n: usize) -> Self {
        Self::from_elem(n, A::zero(), A::zero(), A::zero())
    }
}
