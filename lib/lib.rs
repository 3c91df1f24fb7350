#![allow(non_snake_case)]

//! Provides a tridiagonal (Thomas, or *progonka*) linear solver and the
//! finite-difference problems built on top of it: implicit time stepping for
//! the one-dimensional diffusion equation, linear two-point boundary-value
//! problems, lowest eigenpairs of the one-dimensional Schrödinger Hamiltonian,
//! and Crank-Nicolson propagation of the time-dependent Schrödinger equation.
//!
//! Provides implementations for the following numerical routines:
//! - Kernel:
//!     - Thomas algorithm for real and complex tridiagonal systems
//!     - Dirichlet and Neumann boundary rows
//! - Time-independent:
//!     - Direct solution of `y'' + p y' + q y = f`
//!     - Shifted inverse iteration with Gram-Schmidt deflation
//! - Time-dependent:
//!     - Crank-Nicolson and fully implicit diffusion (with optional source)
//!     - Crank-Nicolson Schrödinger propagation
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod grid;
pub mod tridiag;
pub mod boundary;
pub mod diffusion;
pub mod bvp;
pub mod eigen;
pub mod timedep;
pub mod utils;

pub mod docs;

pub(crate) const DEF_EPSILON: f64 = 1e-10;
pub(crate) const DEF_MAXITERS: usize = 1000;
pub(crate) const DEF_ITERS: usize = 60;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;
