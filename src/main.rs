mod errors;
mod io;
mod model;
mod rng;
mod simulation;

use crate::io::reporting;
use crate::io::scenarios;
use crate::simulation::engine::PricingSimulation;
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== GBM Monte Carlo Option Pricing ===");

    // 1. READ RUN SETTINGS
    // Usage: option-pricer [iterations] [seed]
    // No seed means the ambient thread-local generator: every run differs.
    let args: Vec<String> = env::args().collect();
    let iterations = match args.get(1) {
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) if n >= 1 => n,
            _ => {
                eprintln!("iterations must be a positive integer, got '{raw}'");
                std::process::exit(2);
            }
        },
        None => 50_000,
    };
    let seed = match args.get(2) {
        Some(raw) => match raw.parse::<u64>() {
            Ok(s) => Some(s),
            Err(_) => {
                eprintln!("seed must be an unsigned integer, got '{raw}'");
                std::process::exit(2);
            }
        },
        None => None,
    };

    // 2. BUILD THE SCENARIOS
    // The at-the-money benchmark plus two boundary cases.
    let runs = vec![
        ("at-the-money", scenarios::at_the_money(iterations, seed)),
        (
            "deep out-of-the-money",
            scenarios::deep_out_of_the_money(iterations, seed),
        ),
        ("zero-volatility", scenarios::zero_volatility(iterations, seed)),
    ];

    println!(
        "Pricing {} scenarios with {} paths each (seed: {:?})...",
        runs.len(),
        iterations,
        seed
    );

    // 3. RUN EACH SCENARIO
    let mut benchmark_trace = Vec::new();
    println!("\n=== Price Table ===");
    for (name, config) in runs {
        let mut sim = match PricingSimulation::new(config) {
            Ok(sim) => sim,
            Err(e) => {
                eprintln!("Error building '{name}': {e}");
                std::process::exit(1);
            }
        };

        match sim.run() {
            Ok(result) => {
                if result.degenerate {
                    eprintln!("Warning: '{name}' produced a non-finite estimate");
                }
                println!("{name}: {:.6} (std error {:.6})", result.price, result.std_error);
                // Keep the benchmark's trace for the CSV export below.
                if name == "at-the-money" {
                    benchmark_trace = sim.history.clone();
                }
            }
            Err(e) => {
                eprintln!("Error running '{name}': {e}");
                std::process::exit(1);
            }
        }
    }

    // 4. EXPORT THE BENCHMARK CONVERGENCE TRACE
    let output_file = "convergence_trace.csv";
    match reporting::write_convergence_log(output_file, &benchmark_trace) {
        Ok(_) => println!("\nSuccess! Convergence trace written to ./{output_file}"),
        Err(e) => eprintln!("Error writing CSV: {e}"),
    }

    println!("\nSimulation Complete.");
}
