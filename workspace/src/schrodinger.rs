use log::info;
use progonka::eigen::{ Solution, Stop, System };

const NPOINTS: usize = 4000;
const NSTATES: usize = 4;
const NITERS: usize = 60;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let sys = System::new_linspace((-10.0, 10.0, NPOINTS), |x| x.powi(2) / 2.0)?;
    info!("harmonic potential on {} points, dx = {:.3e}", sys.len(), sys.get_dx());
    let sols: Vec<Solution> = sys.solve(NSTATES, Stop::Iters(NITERS))?;
    let ham = sys.hamiltonian()?;

    println!("{:>3}  {:>12}  {:>12}  {:>12}", "n", "E", "exact", "residual");
    for (n, sol) in sols.iter().enumerate() {
        println!(
            "{:3}  {:12.6}  {:12.6}  {:12.3e}",
            n,
            sol.e,
            n as f64 + 0.5,
            sol.residual(&ham)?,
        );
    }

    // converge to a fixed tolerance for comparison
    let sols_tol: Vec<Solution>
        = sys.solve(NSTATES, Stop::Tolerance { epsilon: Some(1e-12), maxiters: None })?;
    for (n, (fixed, tol)) in sols.iter().zip(&sols_tol).enumerate() {
        println!("E[{}]: fixed - converged = {:.3e}", n, fixed.e - tol.e);
    }
    Ok(())
}
