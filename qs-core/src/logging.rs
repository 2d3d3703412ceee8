//! Structured logging for queue simulations
//!
//! All crates in the workspace log through `tracing`. Binaries and tests call
//! one of the `init_*` functions once to install a `tracing-subscriber`
//! formatter.
//!
//! # Controlling output
//!
//! ```bash
//! # Default (info level)
//! queuesim mm1 -l 0.5 1.0 -m 2.0 -n 10000
//!
//! # Per-customer recurrence steps (very verbose)
//! RUST_LOG=queuesim_core::queue=trace queuesim mm1 -l 1.0 -m 2.0 -n 10
//!
//! # Sweep scheduling only
//! RUST_LOG=queuesim_sweep=debug queuesim poisson --rates 2 --num-events 1000
//! ```
//!
//! Level guidelines:
//! - **TRACE**: individual customers
//! - **DEBUG**: per-run summaries of the recurrence and sweep dispatch
//! - **INFO**: run and sweep completion
//! - **WARN**: unstable parameter pairs and failed rows
//! - **ERROR**: invariant violations

use tracing::{error, info, warn, Span};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging at `info`.
pub fn init_simulation_logging() {
    init_simulation_logging_with_level("info")
}

/// Initialize logging with a specific level
///
/// `RUST_LOG`, when set, takes precedence over `level`. Calling this more than
/// once (for example from several tests) is harmless: only the first
/// subscriber is installed.
///
/// # Example
/// ```rust
/// use queuesim_core::logging::init_simulation_logging_with_level;
///
/// init_simulation_logging_with_level("debug");
/// ```
pub fn init_simulation_logging_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{level},queuesim_core::queue=info").into());

    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true),
        )
        .with(filter)
        .try_init();

    if installed.is_ok() {
        info!("Simulation logging initialized at level: {}", level);
    }
}

/// Initialize verbose, pretty-printed logging for debugging a single run.
pub fn init_detailed_simulation_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "trace,queuesim_core=trace,queuesim_sweep=debug".into());

    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .pretty(),
        )
        .with(filter)
        .try_init();

    if installed.is_ok() {
        info!("Detailed simulation logging initialized");
    }
}

/// Span covering a whole sweep.
pub fn simulation_span(name: &str) -> Span {
    tracing::info_span!("simulation", name = name)
}

/// Span covering one (λ, μ) run.
pub fn run_span(lambda: f64, mu: f64, seed: u64) -> Span {
    tracing::debug_span!("run", lambda, mu, seed)
}

/// Span covering one simulated Poisson process.
pub fn process_span(rate: f64, num_events: usize) -> Span {
    tracing::debug_span!("process", rate, num_events)
}

/// Logging helpers for sweep-level events
pub mod events {
    use super::*;

    pub fn sweep_started(name: &str, tasks: usize, workers: Option<usize>) {
        info!(sweep = name, tasks, workers = ?workers, "Sweep started");
    }

    pub fn sweep_completed(name: &str, succeeded: usize, failed: usize) {
        info!(sweep = name, succeeded, failed, "Sweep completed");
    }

    pub fn task_failed(lambda: f64, mu: f64, kind: &str, reason: &str) {
        warn!(lambda, mu, kind, reason, "Task failed");
    }
}

/// Logging helpers for conditions that point at a defect
pub mod diagnostics {
    use super::*;

    pub fn simulation_inconsistency(description: &str, expected: &str, actual: &str) {
        error!(
            description = description,
            expected = expected,
            actual = actual,
            "Simulation inconsistency detected"
        );
    }
}
