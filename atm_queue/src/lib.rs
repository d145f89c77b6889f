//! ATM queue simulation
//!
//! Discrete-event model of customers arriving at a bank of service terminals.
//! Customers arrive with exponentially distributed gaps, compete for a
//! fixed-capacity bank of interchangeable servers in strict FIFO order, hold
//! a server for a normally distributed service duration, and release it.
//!
//! Key agents:
//! - ArrivalSource: perpetual arrival generator, owns the run's seeded RNG
//! - ServerBank: the resource pool with its FIFO wait queue
//! - Customer: per-customer process, spawned at each arrival
//!
//! A scenario run drives the event loop to a fixed horizon and aggregates the
//! agents' statistics into a [`RunResult`].

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod arrivals;
pub mod customer;
pub mod report;
pub mod runner;
pub mod server_bank;

/// Standard deviation of the service-time draw, in minutes. A fixed constant
/// regardless of the configured mean.
pub const SERVICE_TIME_STD_DEV: f64 = 5.0;

/// Floor applied to every service-time draw, in minutes.
pub const MIN_SERVICE_TIME: f64 = 2.0;

/// All possible events in the ATM queue simulation
#[derive(Debug, Clone)]
pub enum Event {
    /// Kicks off the arrival process at t = 0
    Start,

    /// A customer has arrived and asks for a server
    ServerRequested { customer: usize },

    /// The bank hands a server to a customer; `requested_at` is when the
    /// customer originally asked
    ServerGranted { customer: usize, requested_at: f64 },

    /// A customer is done and returns its server to the bank
    ServerReleased { customer: usize },
}

/// One simulation configuration. Immutable input to a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub server_count: usize,
    /// Mean service time per customer, in minutes
    pub mean_service_time: f64,
    /// Mean gap between customer arrivals, in minutes
    pub mean_inter_arrival_time: f64,
}

impl Scenario {
    pub fn new(
        name: &str,
        server_count: usize,
        mean_service_time: f64,
        mean_inter_arrival_time: f64,
    ) -> Scenario {
        Scenario {
            name: name.to_string(),
            server_count,
            mean_service_time,
            mean_inter_arrival_time,
        }
    }

    /// Reject any configuration parameter that is not strictly positive,
    /// before any simulation state is built.
    pub fn validate(&self) -> Result<(), InvalidScenario> {
        if self.server_count == 0 {
            return Err(InvalidScenario::new(&self.name, "server_count"));
        }
        if !(self.mean_service_time > 0.0) {
            return Err(InvalidScenario::new(&self.name, "mean_service_time"));
        }
        if !(self.mean_inter_arrival_time > 0.0) {
            return Err(InvalidScenario::new(&self.name, "mean_inter_arrival_time"));
        }
        Ok(())
    }
}

/// A scenario configuration with a non-positive parameter. Raised before the
/// run starts; one invalid scenario never aborts its siblings in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidScenario {
    pub scenario: String,
    pub field: &'static str,
}

impl InvalidScenario {
    fn new(scenario: &str, field: &'static str) -> InvalidScenario {
        InvalidScenario {
            scenario: scenario.to_string(),
            field,
        }
    }
}

impl fmt::Display for InvalidScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid scenario '{}': {} must be positive",
            self.scenario, self.field
        )
    }
}

impl std::error::Error for InvalidScenario {}

/// Per-customer record, filled progressively as the customer moves through
/// the system. Immutable once the customer completes.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    /// Sequential id, starting at 1
    pub id: usize,
    pub arrival_time: f64,
    /// Pre-drawn service duration, already floored at [`MIN_SERVICE_TIME`]
    pub service_duration: f64,
    /// Time spent between requesting a server and being granted one; `None`
    /// until the customer reaches a server
    pub wait_time: Option<f64>,
    pub completed: bool,
}

/// Observable state of the arrival process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalStats {
    /// Customers spawned so far, including the one whose arrival is still
    /// pending on the event queue
    pub customers_spawned: usize,
}

/// Observable state of the server bank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerBankStats {
    pub capacity: usize,
    pub occupancy: usize,
    pub queue_length: usize,
    /// Queue depth sampled at each arrival, before the new request is
    /// processed
    pub queue_samples: Vec<usize>,
    pub total_granted: usize,
    pub total_released: usize,
}

impl ServerBankStats {
    pub fn is_at_capacity(&self) -> bool {
        self.occupancy == self.capacity
    }

    pub fn has_queue(&self) -> bool {
        self.queue_length > 0
    }

    /// Mean over all recorded queue-depth samples; 0 if none were recorded.
    pub fn mean_queue_sample(&self) -> f64 {
        if self.queue_samples.is_empty() {
            return 0.0;
        }
        self.queue_samples.iter().sum::<usize>() as f64 / self.queue_samples.len() as f64
    }
}

/// Unified stats enum for all agents
#[derive(Debug, Clone)]
pub enum Stats {
    Arrivals(ArrivalStats),
    ServerBank(ServerBankStats),
    Customer(CustomerRecord),
}

/// Aggregated output of one scenario run. Read-only once produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub scenario: Scenario,
    /// Customers whose service completed before the horizon
    pub customers_handled: usize,
    /// Mean wait over completed customers; 0 if none completed
    pub mean_wait_time: f64,
    /// Mean over the queue-depth samples taken at each arrival; 0 if none
    pub mean_queue_length: f64,
    /// Estimated share of server-time consumed, as a percentage. Uses the
    /// configured mean service time rather than realized durations, so it can
    /// exceed 100 under some configurations.
    pub utilization_pct: f64,
    /// Wait times of completed customers, in arrival order
    pub wait_times: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_scenario_passes_validation() {
        let scenario = Scenario::new("Base Case", 1, 3.0, 4.0);
        assert!(scenario.validate().is_ok());
    }

    #[test]
    fn zero_servers_rejected() {
        let scenario = Scenario::new("broken", 0, 3.0, 4.0);
        let err = scenario.validate().unwrap_err();
        assert_eq!(err.field, "server_count");
    }

    #[test]
    fn non_positive_service_time_rejected() {
        let scenario = Scenario::new("broken", 1, 0.0, 4.0);
        let err = scenario.validate().unwrap_err();
        assert_eq!(err.field, "mean_service_time");

        let scenario = Scenario::new("broken", 1, -3.0, 4.0);
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn non_positive_inter_arrival_rejected() {
        let scenario = Scenario::new("broken", 1, 3.0, -1.0);
        let err = scenario.validate().unwrap_err();
        assert_eq!(err.field, "mean_inter_arrival_time");
    }

    #[test]
    fn nan_parameters_rejected() {
        let scenario = Scenario::new("broken", 1, f64::NAN, 4.0);
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn invalid_scenario_display_names_scenario_and_field() {
        let err = InvalidScenario::new("Base Case", "server_count");
        let message = err.to_string();
        assert!(message.contains("Base Case"));
        assert!(message.contains("server_count"));
    }

    #[test]
    fn mean_queue_sample_handles_empty() {
        let stats = ServerBankStats {
            capacity: 2,
            occupancy: 0,
            queue_length: 0,
            queue_samples: vec![],
            total_granted: 0,
            total_released: 0,
        };
        assert_eq!(stats.mean_queue_sample(), 0.0);
    }

    #[test]
    fn mean_queue_sample_averages_samples() {
        let stats = ServerBankStats {
            capacity: 1,
            occupancy: 1,
            queue_length: 2,
            queue_samples: vec![0, 1, 2, 3],
            total_granted: 1,
            total_released: 0,
        };
        assert_eq!(stats.mean_queue_sample(), 1.5);
    }

    #[test]
    fn bank_stats_semantic_queries() {
        let stats = ServerBankStats {
            capacity: 2,
            occupancy: 2,
            queue_length: 1,
            queue_samples: vec![],
            total_granted: 2,
            total_released: 0,
        };
        assert!(stats.is_at_capacity());
        assert!(stats.has_queue());
    }
}
