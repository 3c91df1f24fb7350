//! Provides functions to compute solutions to the 1+1-dimensional
//! (time-dependent) Schrödinger equation (TDSE) for motion in a conservative
//! potential, by the Crank-Nicolson (Cayley) form of the propagator
//! ```text
//! (1 + i dt/2 H) q[m + 1] = (1 - i dt/2 H) q[m]
//! ```
//! with `H` the three-point Hamiltonian of [`eigen`][crate::eigen]. Each step
//! is a single complex tridiagonal solve. The wavefunction is taken to vanish
//! just outside the grid.
//!
//! In all 2D arrays, the first (or zero-th) axis indexes time.

use log::debug;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    eigen::build_hamiltonian,
    error::{ GridError, LengthError, TError },
    tridiag::Tridiagonal,
};

pub type TResult<T> = Result<T, TError>;

// return an array of differences between adjacent time coordinates, checking
// that they are all positive
fn time_steps<S>(t: &Arr1<S>) -> TResult<nd::Array1<f64>>
where S: nd::Data<Elem = f64>
{
    GridError::check_times(t.len())?;
    let dt: nd::Array1<f64>
        = t.iter().zip(t.iter().skip(1))
        .map(|(tk, tkp1)| tkp1 - tk)
        .collect();
    if let Some(k) = dt.iter().position(|dtk| !(*dtk > 0.0 && dtk.is_finite())) {
        return Err(GridError::NonIncreasingTime(k + 1).into());
    }
    Ok(dt)
}

fn check_inputs<S, T>(dx: f64, V: &Arr1<S>, q0: &Arr1<T>) -> TResult<()>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
{
    GridError::check_spacing(dx)?;
    GridError::check_points(V.len())?;
    LengthError::check(V, q0)?;
    Ok(())
}

// take a single Crank-Nicolson step *in place*
fn cn_step<S>(
    H: &Tridiagonal<C64>,
    q: &mut Arr1<S>,
    dt: f64,
    work: &mut nd::Array1<C64>,
) -> TResult<()>
where S: nd::DataMut<Elem = C64>
{
    let half = C64::i() * (dt / 2.0);
    let Hq = H.apply(&*q)?;
    nd::Zip::from(&mut *q).and(&Hq)
        .for_each(|qk, Hqk| { *qk -= half * Hqk; });
    let lhs = H.map(|Hk| half * Hk).shifted(C64::new(-1.0, 0.0));
    lhs.solve_inplace(q, work)?;
    Ok(())
}

/// Propagate an initial state `q0` through a series of time coordinates `t`
/// for a time-independent potential `V`.
///
/// `t` must be strictly increasing and have at least two elements; steps may
/// be non-uniform. The propagator is unitary, so the Euclidean norm of the
/// state is conserved up to rounding and no renormalization is performed.
///
/// See also [`crank_nicolson_func`].
pub fn crank_nicolson<S, T, U>(dx: f64, V: &Arr1<S>, q0: &Arr1<T>, t: &Arr1<U>)
    -> TResult<nd::Array2<C64>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
    U: nd::Data<Elem = f64>,
{
    check_inputs(dx, V, q0)?;
    let dt = time_steps(t)?;
    let H: Tridiagonal<C64> = build_hamiltonian(dx, V).map(C64::from);
    let mut q: nd::Array2<C64> = nd::Array2::zeros((t.len(), V.len()));
    let mut q_temp: nd::Array1<C64> = q0.to_owned();
    let mut work: nd::Array1<C64> = nd::Array1::zeros(V.len());
    q.slice_mut(nd::s![0, ..]).assign(q0);
    let iter = dt.iter().zip(q.axis_iter_mut(nd::Axis(0)).skip(1));
    for (&dtk, mut qkp1) in iter {
        cn_step(&H, &mut q_temp, dtk, &mut work)?;
        qkp1.assign(&q_temp);
    }
    debug!(
        "timedep::crank_nicolson: {} points, {} steps",
        V.len(),
        dt.len(),
    );
    Ok(q)
}

/// Propagate an initial state `q0` through a series of time coordinates `t`
/// for a time-dependent potential described by a function.
///
/// Each step uses the potential at the midpoint of its time interval.
///
/// See also [`crank_nicolson`].
pub fn crank_nicolson_func<F, S, T>(dx: f64, mut V: F, q0: &Arr1<S>, t: &Arr1<T>)
    -> TResult<nd::Array2<C64>>
where
    F: FnMut(f64) -> nd::Array1<f64>,
    S: nd::Data<Elem = C64>,
    T: nd::Data<Elem = f64>,
{
    let dt = time_steps(t)?;
    let mut q: nd::Array2<C64> = nd::Array2::zeros((t.len(), q0.len()));
    let mut q_temp: nd::Array1<C64> = q0.to_owned();
    let mut work: nd::Array1<C64> = nd::Array1::zeros(q0.len());
    let mut Vk: nd::Array1<f64>;
    let mut H: Tridiagonal<C64>;
    q.slice_mut(nd::s![0, ..]).assign(q0);
    let iter = dt.iter().zip(t).zip(q.axis_iter_mut(nd::Axis(0)).skip(1));
    for ((&dtk, &tk), mut qkp1) in iter {
        Vk = V(tk + dtk / 2.0);
        check_inputs(dx, &Vk, q0)?;
        H = build_hamiltonian(dx, &Vk).map(C64::from);
        cn_step(&H, &mut q_temp, dtk, &mut work)?;
        qkp1.assign(&q_temp);
    }
    debug!(
        "timedep::crank_nicolson_func: {} points, {} steps",
        q0.len(),
        dt.len(),
    );
    Ok(q)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;
    use crate::{
        eigen::{ Stop, System },
        utils::norm,
    };
    use super::*;

    fn coherent(x: &nd::Array1<f64>, x0: f64) -> nd::Array1<C64> {
        let q = x.mapv(|xk| C64::from((-(xk - x0).powi(2) / 2.0).exp()));
        let n = norm(&q);
        q / C64::from(n)
    }

    fn mean_x(x: &nd::Array1<f64>, q: nd::ArrayView1<C64>) -> f64 {
        let w: f64 = q.iter().map(|qk| qk.norm_sqr()).sum();
        x.iter().zip(q).map(|(xk, qk)| xk * qk.norm_sqr()).sum::<f64>() / w
    }

    #[test]
    fn conserves_norm() {
        let x: nd::Array1<f64> = nd::Array1::linspace(-10.0, 10.0, 501);
        let dx = x[1] - x[0];
        let V = x.mapv(|xk| 0.5 * xk.powi(2));
        let q0 = &coherent(&x, 2.0) * &x.mapv(|xk| C64::cis(3.0 * xk));
        let t: nd::Array1<f64> = nd::Array1::linspace(0.0, 2.0, 201);
        let q = crank_nicolson(dx, &V, &q0, &t).unwrap();
        assert_eq!(q.shape(), &[201, 501]);
        for qk in q.axis_iter(nd::Axis(0)) {
            assert!((norm(&qk) - 1.0).abs() < 1e-8);
        }
    }

    #[test]
    fn stationary_state() {
        let sys = System::new_linspace((-8.0, 8.0, 401), |x| 0.5 * x.powi(2)).unwrap();
        let ground = &sys.solve(1, Stop::Iters(200)).unwrap()[0];
        let q0 = ground.wf.mapv(C64::from);
        let dt = 0.01;
        let t: nd::Array1<f64> = (0..101).map(|k| k as f64 * dt).collect();
        let q = crank_nicolson(sys.get_dx(), sys.get_V(), &q0, &t).unwrap();
        let max_dev = q.axis_iter(nd::Axis(0))
            .flat_map(|qk| {
                qk.iter().zip(&q0)
                    .map(|(qkx, q0x)| (qkx.norm() - q0x.norm()).abs())
                    .collect::<Vec<f64>>()
            })
            .fold(0.0_f64, f64::max);
        assert!(max_dev < 1e-8);
        // phase advances by 2 atan(E dt / 2) per step
        let mid = sys.len() / 2;
        let phase = q[[1, mid]] / q0[mid];
        let expected = C64::cis(-2.0 * (ground.e * dt / 2.0).atan());
        assert!((phase - expected).norm() < 1e-10);
    }

    #[test]
    fn coherent_state_oscillates() {
        let x: nd::Array1<f64> = nd::Array1::linspace(-10.0, 10.0, 1001);
        let dx = x[1] - x[0];
        let V = x.mapv(|xk| 0.5 * xk.powi(2));
        let q0 = coherent(&x, 2.0);
        let t: nd::Array1<f64> = nd::Array1::linspace(0.0, PI, 315);
        let q = crank_nicolson(dx, &V, &q0, &t).unwrap();
        assert!((mean_x(&x, q.slice(nd::s![0, ..])) - 2.0).abs() < 1e-6);
        assert!((mean_x(&x, q.slice(nd::s![314, ..])) + 2.0).abs() < 0.05);
    }

    #[test]
    fn func_matches_static() {
        let x: nd::Array1<f64> = nd::Array1::linspace(-6.0, 6.0, 241);
        let dx = x[1] - x[0];
        let V = x.mapv(|xk| 0.5 * xk.powi(2));
        let q0 = coherent(&x, 1.0);
        let t: nd::Array1<f64> = nd::Array1::linspace(0.0, 0.5, 51);
        let q_static = crank_nicolson(dx, &V, &q0, &t).unwrap();
        let q_func = crank_nicolson_func(dx, |_| V.clone(), &q0, &t).unwrap();
        let max_diff = q_static.iter().zip(&q_func)
            .map(|(a, b)| (a - b).norm())
            .fold(0.0_f64, f64::max);
        assert!(max_diff < 1e-12);
    }

    #[test]
    fn rejects_bad_input() {
        let x: nd::Array1<f64> = nd::Array1::linspace(-1.0, 1.0, 11);
        let dx = x[1] - x[0];
        let V: nd::Array1<f64> = nd::Array1::zeros(11);
        let q0 = coherent(&x, 0.0);
        assert!(matches!(
            crank_nicolson(dx, &V, &q0, &nd::array![0.0, 0.1, 0.1]),
            Err(TError::Grid(GridError::NonIncreasingTime(2))),
        ));
        assert!(matches!(
            crank_nicolson(dx, &V, &q0, &nd::array![0.0]),
            Err(TError::Grid(GridError::TooFewTimes(1))),
        ));
        assert!(matches!(
            crank_nicolson(dx, &V.slice(nd::s![..5]), &q0, &nd::array![0.0, 1.0]),
            Err(TError::Length(LengthError(5, 11))),
        ));
        assert!(matches!(
            crank_nicolson(-dx, &V, &q0, &nd::array![0.0, 1.0]),
            Err(TError::Grid(GridError::BadSpacing(_))),
        ));
    }
}
