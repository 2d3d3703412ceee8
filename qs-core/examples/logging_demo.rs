//! Demonstration of logging in queuesim-core
//!
//! Runs one short M/M/1 task with every recurrence step traced.
//!
//! Run with: cargo run --package queuesim-core --example logging_demo

use queuesim_core::{init_detailed_simulation_logging, run_mm1_traced, simulation_span, RunConfig};
use tracing::info;

fn main() {
    init_detailed_simulation_logging();

    let _span = simulation_span("logging_demo").entered();
    let config = RunConfig::new(0.8, 1.0, 8).with_seed(42);

    match run_mm1_traced(&config) {
        Ok((result, trace)) => {
            for customer in trace.customers() {
                info!(
                    index = customer.index,
                    waiting = customer.waiting(),
                    sojourn = customer.sojourn(),
                    "Customer summary"
                );
            }
            info!(?result, "Demo finished");
        }
        Err(err) => tracing::error!(%err, "Demo run failed"),
    }
}
