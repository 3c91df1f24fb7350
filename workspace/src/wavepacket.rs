use std::f64::consts::PI;
use log::info;
use ndarray as nd;
use num_complex::Complex64 as C64;
use progonka::{ timedep, utils };

const X0: f64 = 2.5; // initial displacement
const K0: f64 = 1.0; // initial momentum

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let x: nd::Array1<f64> = nd::Array1::linspace(-10.0, 10.0, 2001);
    let dx = x[1] - x[0];
    let v: nd::Array1<f64> = x.mapv(|xk| xk.powi(2) / 2.0);
    let q0: nd::Array1<C64>
        = utils::wf_normalized(
            &x.mapv(|xk| {
                (-(xk - X0).powi(2) / 2.0).exp() * C64::cis(K0 * xk)
            }),
            dx,
        );
    let t: nd::Array1<f64> = nd::Array1::linspace(0.0, 2.0 * PI, 1001);
    info!("propagating over one period in {} steps", t.len() - 1);
    let q: nd::Array2<C64> = timedep::crank_nicolson(dx, &v, &q0, &t)?;

    println!("{:>8}  {:>10}  {:>12}", "t", "<x>", "norm");
    for (k, qk) in q.axis_iter(nd::Axis(0)).enumerate().step_by(100) {
        let prob: nd::Array1<f64> = qk.mapv(|qkx| qkx.norm_sqr());
        let mean_x = utils::trapz(&(&prob * &x), dx);
        println!("{:8.4}  {:10.5}  {:12.9}", t[k], mean_x, utils::wf_norm(&qk, dx));
    }
    Ok(())
}
