//! Arrival process agent
//!
//! A perpetual generator: each arrival schedules the next one, so exactly one
//! future arrival is pending at any time. The source owns the run's seeded
//! RNG; the inter-arrival gap and the new customer's service duration are
//! drawn from that single stream, in a fixed order, so one seed reproduces a
//! run exactly.

use crate::customer::Customer;
use crate::{ArrivalStats, Event, MIN_SERVICE_TIME, SERVICE_TIME_STD_DEV, Scenario, Stats};
use des::{Agent, Response};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Exp, Normal};

pub struct ArrivalSource {
    rng: StdRng,
    inter_arrival: Exp<f64>,
    service_time: Normal<f64>,
    next_customer_id: usize,
    customers_spawned: usize,
}

impl ArrivalSource {
    /// Build the source for one run. The scenario must already be validated;
    /// both distributions are well-formed for positive means.
    pub fn new(scenario: &Scenario, seed: u64) -> ArrivalSource {
        ArrivalSource {
            rng: StdRng::seed_from_u64(seed),
            inter_arrival: Exp::new(1.0 / scenario.mean_inter_arrival_time).unwrap(),
            service_time: Normal::new(scenario.mean_service_time, SERVICE_TIME_STD_DEV).unwrap(),
            next_customer_id: 1,
            customers_spawned: 0,
        }
    }

    fn draw_gap(&mut self) -> f64 {
        self.inter_arrival.sample(&mut self.rng)
    }

    fn draw_service_duration(&mut self) -> f64 {
        self.service_time.sample(&mut self.rng).max(MIN_SERVICE_TIME)
    }

    /// Spawn the next customer and schedule its request for the arrival
    /// instant.
    fn next_arrival(&mut self, current_t: f64) -> Response<Event, Stats> {
        let gap = self.draw_gap();
        let service_duration = self.draw_service_duration();
        let customer = self.next_customer_id;
        self.next_customer_id += 1;
        self.customers_spawned += 1;

        let arrival_t = current_t + gap;
        Response {
            events: vec![(arrival_t, Event::ServerRequested { customer })],
            agents: vec![Box::new(Customer::new(customer, arrival_t, service_duration))],
        }
    }
}

impl Agent<Event, Stats> for ArrivalSource {
    fn act(&mut self, current_t: f64, data: &Event) -> Response<Event, Stats> {
        match data {
            Event::Start => self.next_arrival(current_t),
            // Each arrival's own request event triggers the next arrival.
            Event::ServerRequested { .. } => self.next_arrival(current_t),
            _ => Response::new(),
        }
    }

    fn stats(&self) -> Stats {
        Stats::Arrivals(ArrivalStats {
            customers_spawned: self.customers_spawned,
        })
    }
}
