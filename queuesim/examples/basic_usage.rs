//! Basic usage example showing how to use the queuesim meta-crate

use queuesim::prelude::*;

fn main() {
    queuesim::core::init_simulation_logging();

    let config = Mm1SweepConfig {
        lambda_values: vec![0.5, 1.0, 1.5, 2.5],
        mu_values: vec![2.0],
        num_events: 20_000,
        seed: Some(42),
        horizon: None,
        workers: None,
    };

    let table = run_mm1_sweep(&config).expect("sweep configuration is valid");
    print!("{table}");

    for row in table.completed() {
        if let Some(ci) = row.e_tsys_ci {
            println!(
                "λ={:.2} μ={:.2}: E[T_sys] 95% CI [{:.3}, {:.3}]",
                row.result.lambda, row.result.mu, ci.ci_low, ci.ci_high
            );
        }
    }
}
