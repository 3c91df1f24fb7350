use std::f64::consts::{ FRAC_PI_2, PI };
use ndarray as nd;
use progonka::{ boundary::Boundaries, bvp, grid::Grid };

const H: f64 = 0.001;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // y'' = sin(x), y(-π/2) = a, y'(π/2) = b
    let (a, b) = (0.0, 1.0);
    let n = (PI / H).round() as usize;
    let grid = Grid::new_linspace((-FRAC_PI_2, FRAC_PI_2, n + 1))?;
    let y: nd::Array1<f64>
        = bvp::solve_fn(&grid, f64::sin, Boundaries::dirichlet_neumann(a, b))?;
    let exact = grid.sample(|x| -x.sin() - 1.0 + a + b * x + PI * b / 2.0);

    println!("{:>10}  {:>14}  {:>14}", "x", "y", "exact");
    for i in (0..=n).step_by(n / 10) {
        println!("{:10.5}  {:14.8}  {:14.8}", grid.x()[i], y[i], exact[i]);
    }
    let max_err = y.iter().zip(&exact)
        .map(|(yk, ek)| (yk - ek).abs())
        .fold(0.0_f64, f64::max);
    println!("max |y - exact| = {:.3e}", max_err);
    Ok(())
}
