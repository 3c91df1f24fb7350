use log::info;
use ndarray as nd;
use progonka::{
    boundary::Boundaries,
    diffusion::{ self, Scheme, Stepper },
    grid::Grid,
};

const L: f64 = 1.0; // rod length
const T: f64 = 1.0; // total time
const N: usize = 100; // spatial intervals
const K: usize = 100; // time steps

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let grid = Grid::new_spacing(0.0, L / N as f64, N)?;
    let h = grid.h();
    let p0: nd::Array1<f64>
        = (0..=N).map(|i| h * i as f64 * (1.0 - i as f64 * h / L).powi(2)).collect();
    let stepper
        = Stepper::new(grid, T / K as f64, Boundaries::dirichlet(0.0, 0.0))?
        .with_scheme(Scheme::CrankNicolson);
    info!("evolving {} points over {} steps", N + 1, K);
    let p: nd::Array2<f64> = stepper.evolve(&p0, K)?;
    let t = stepper.times(K);
    let energy = diffusion::energy(&p);

    println!("{:>8}  {:>14}  {:>14}", "t", "max p", "sum p²");
    for m in (0..=K).step_by(10) {
        let pmax = p.row(m).iter().copied().fold(0.0_f64, f64::max);
        println!("{:8.3}  {:14.6e}  {:14.6e}", t[m], pmax, energy[m]);
    }
    Ok(())
}
