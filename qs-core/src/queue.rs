//! Single-server FIFO queue recurrence
//!
//! With one server and arrivals already in order, no event heap is needed:
//! each customer starts service as soon as both it has arrived and the
//! previous customer has left.

use crate::error::SimError;
use crate::logging::diagnostics;
use serde::Serialize;
use tracing::{debug, trace};

/// One served customer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Customer {
    pub index: usize,
    pub arrival: f64,
    pub service: f64,
    pub service_start: f64,
    pub departure: f64,
}

impl Customer {
    /// Time spent waiting in the queue before service.
    pub fn waiting(&self) -> f64 {
        self.service_start - self.arrival
    }

    /// Total time in system, from arrival to departure.
    ///
    /// Equals `waiting() + service` up to rounding.
    pub fn sojourn(&self) -> f64 {
        self.departure - self.arrival
    }
}

/// Timing trace of one queue run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationTrace {
    customers: Vec<Customer>,
    busy_time: f64,
    idle_time: f64,
    horizon: f64,
}

impl SimulationTrace {
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Sum of all service durations.
    pub fn busy_time(&self) -> f64 {
        self.busy_time
    }

    /// Time the server spent with nobody to serve, up to the horizon.
    pub fn idle_time(&self) -> f64 {
        self.idle_time
    }

    /// Last departure, or the fixed horizon if that is later.
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    pub fn waiting_times(&self) -> impl Iterator<Item = f64> + '_ {
        self.customers.iter().map(Customer::waiting)
    }

    pub fn sojourn_times(&self) -> impl Iterator<Item = f64> + '_ {
        self.customers.iter().map(Customer::sojourn)
    }
}

/// Run the FIFO recurrence over paired arrivals and service durations.
///
/// `horizon` extends the observation window past the last departure; a value
/// earlier than the last departure is ignored.
///
/// # Panics
///
/// Panics if `arrivals` and `services` have different lengths.
pub fn simulate_fifo(
    arrivals: &[f64],
    services: &[f64],
    horizon: Option<f64>,
) -> Result<SimulationTrace, SimError> {
    assert_eq!(
        arrivals.len(),
        services.len(),
        "arrival and service sequences must pair up by index"
    );

    let mut customers = Vec::with_capacity(arrivals.len());
    let mut previous_departure = 0.0_f64;
    let mut busy_time = 0.0;
    let mut idle_time = 0.0;

    for (index, (&arrival, &service)) in arrivals.iter().zip(services).enumerate() {
        if arrival > previous_departure {
            idle_time += arrival - previous_departure;
        }
        let service_start = arrival.max(previous_departure);
        let departure = service_start + service;

        if departure.is_nan() || departure < previous_departure {
            diagnostics::simulation_inconsistency(
                "departure order",
                "non-decreasing departures",
                &format!("customer {index} departs at {departure}"),
            );
            return Err(SimError::InvariantViolation(format!(
                "departure of customer {index} ({departure}) precedes previous departure ({previous_departure})"
            )));
        }

        trace!(index, arrival, service_start, departure, "Customer served");
        busy_time += service;
        previous_departure = departure;
        customers.push(Customer {
            index,
            arrival,
            service,
            service_start,
            departure,
        });
    }

    let mut total_horizon = previous_departure;
    if let Some(fixed) = horizon {
        if fixed > total_horizon {
            idle_time += fixed - total_horizon;
            total_horizon = fixed;
        }
    }

    debug!(
        customers = customers.len(),
        busy_time,
        idle_time,
        horizon = total_horizon,
        "Queue recurrence finished"
    );

    Ok(SimulationTrace {
        customers,
        busy_time,
        idle_time,
        horizon: total_horizon,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hand_computed_trace() {
        // Second customer queues behind the first, third finds the server idle.
        let trace = simulate_fifo(&[1.0, 2.0, 10.0], &[3.0, 1.0, 2.0], None).unwrap();
        let c = trace.customers();

        assert_eq!(c[0].service_start, 1.0);
        assert_eq!(c[0].departure, 4.0);
        assert_eq!(c[1].service_start, 4.0);
        assert_eq!(c[1].waiting(), 2.0);
        assert_eq!(c[1].departure, 5.0);
        assert_eq!(c[2].service_start, 10.0);
        assert_eq!(c[2].waiting(), 0.0);
        assert_eq!(c[2].departure, 12.0);

        let sojourns: Vec<f64> = trace.sojourn_times().collect();
        assert_eq!(sojourns, vec![3.0, 3.0, 2.0]);

        assert_eq!(trace.busy_time(), 6.0);
        assert_eq!(trace.idle_time(), 1.0 + 5.0);
        assert_eq!(trace.horizon(), 12.0);
    }

    #[test]
    fn fixed_horizon_adds_trailing_idle() {
        let trace = simulate_fifo(&[1.0], &[1.0], Some(10.0)).unwrap();
        assert_eq!(trace.horizon(), 10.0);
        assert_eq!(trace.idle_time(), 1.0 + 8.0);

        // A horizon before the last departure does not truncate the trace.
        let trace = simulate_fifo(&[1.0], &[1.0], Some(0.5)).unwrap();
        assert_eq!(trace.horizon(), 2.0);
    }

    #[test]
    fn empty_input_gives_empty_trace() {
        let trace = simulate_fifo(&[], &[], None).unwrap();
        assert!(trace.is_empty());
        assert_eq!(trace.horizon(), 0.0);
    }

    #[test]
    #[should_panic(expected = "must pair up by index")]
    fn mismatched_lengths_panic() {
        let _ = simulate_fifo(&[1.0, 2.0], &[1.0], None);
    }

    #[test]
    fn negative_service_is_an_invariant_violation() {
        let err = simulate_fifo(&[1.0, 2.0], &[3.0, -5.0], None).unwrap_err();
        assert!(matches!(err, SimError::InvariantViolation(_)));
    }
}
