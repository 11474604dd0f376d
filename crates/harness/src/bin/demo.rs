//! Side-by-side solve demo
//!
//! Generates a seeded diagonally dominant system, solves it with the
//! sequential reference and with a striped worker group, and prints the
//! agreement and residual figures.

use std::env;

use vstripe_comm::WorkerConfig;
use vstripe_harness::{max_residual, random_system, SolvePipeline};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let n: usize = env::var("VSTRIPE_N").ok().and_then(|v| v.parse().ok()).unwrap_or(8);
    let workers: usize = env::var("VSTRIPE_WORKERS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(4);
    let seed: u64 = env::var("VSTRIPE_SEED").ok().and_then(|v| v.parse().ok()).unwrap_or(7);

    println!("=== vstripe demo: {n} equations, {workers} workers, seed {seed} ===\n");

    let input = random_system(n, seed);
    let pipeline = SolvePipeline::new(WorkerConfig::with_workers(workers));

    let report = pipeline.report(&input)?;

    println!("--- Sequential reference ---");
    print_solution(&report.sequential);
    println!("\n--- Striped ({workers} workers) ---");
    print_solution(&report.striped);

    println!("\n--- Agreement ---");
    println!("max |seq - striped|: {:.3e}", report.max_error);
    println!("max striped residual: {:.3e}", report.residual);
    println!(
        "max sequential residual: {:.3e}",
        max_residual(&input, &report.sequential)?
    );

    Ok(())
}

fn print_solution(solution: &[f64]) {
    for (i, x) in solution.iter().enumerate() {
        println!("  x[{i}] = {x:>12.6}");
    }
}
