//! Miscellaneous tools.

use std::ops::DivAssign;
use ndarray::{ self as nd, Ix1 };
use num_complex::ComplexFloat;
use num_traits::Num;

/// Integrate using the trapezoidal rule.
///
/// *Panics if `y` has length less than 2*.
pub fn trapz<S, A>(y: &nd::ArrayBase<S, Ix1>, dx: A) -> A
where
    S: nd::Data<Elem = A>,
    A: Num + Copy,
{
    let n: usize = y.len();
    let two = A::one() + A::one();
    let inner = y.iter().skip(1).take(n - 2).fold(A::zero(), |acc, yk| acc + *yk);
    (dx / two) * (y[0] + two * inner + y[n - 1])
}

/// Euclidean inner product `Σ conj(q) p` of two vectors.
///
/// Arrays of unequal length are truncated to the shorter.
pub fn dot<S, T, A>(q: &nd::ArrayBase<S, Ix1>, p: &nd::ArrayBase<T, Ix1>) -> A
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    A: ComplexFloat,
{
    q.iter().zip(p)
        .fold(A::zero(), |acc, (qk, pk)| acc + qk.conj() * *pk)
}

/// Euclidean norm of a vector.
pub fn norm<S, A>(q: &nd::ArrayBase<S, Ix1>) -> f64
where
    S: nd::Data<Elem = A>,
    A: ComplexFloat<Real = f64>,
{
    q.iter().map(|qk| qk.abs().powi(2)).sum::<f64>().sqrt()
}

/// Calculate the norm of a wavefunction, `∫ |q|² dx`, by the trapezoidal
/// rule.
///
/// *Panics if `q` has length less than 2*.
pub fn wf_norm<S, A>(q: &nd::ArrayBase<S, Ix1>, dx: f64) -> f64
where
    S: nd::Data<Elem = A>,
    A: ComplexFloat<Real = f64>,
{
    trapz(&q.mapv(|qk| qk.abs().powi(2)), dx)
}

/// Renormalize a wavefunction in place, so that [`wf_norm`] gives 1.
///
/// *Panics if `q` has length less than 2*.
pub fn wf_renormalize<S, A>(q: &mut nd::ArrayBase<S, Ix1>, dx: f64)
where
    S: nd::DataMut<Elem = A>,
    A: ComplexFloat<Real = f64> + DivAssign<f64>,
{
    let norm = wf_norm(&*q, dx).sqrt();
    q.iter_mut().for_each(|qk| { *qk /= norm; });
}

/// Return a normalized copy of a wavefunction.
///
/// *Panics if `q` has length less than 2*.
pub fn wf_normalized<S, A>(q: &nd::ArrayBase<S, Ix1>, dx: f64) -> nd::Array1<A>
where
    S: nd::Data<Elem = A>,
    A: ComplexFloat<Real = f64> + DivAssign<f64>,
{
    let mut new = q.to_owned();
    wf_renormalize(&mut new, dx);
    new
}
