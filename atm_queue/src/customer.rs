//! Per-customer process agent, spawned by the arrival source. Reacts only to
//! events carrying its own id.

use crate::{CustomerRecord, Event, Stats};
use des::{Agent, Response};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Waiting,
    InService,
    Completed,
}

pub struct Customer {
    id: usize,
    arrival_time: f64,
    service_duration: f64,
    wait_time: Option<f64>,
    state: State,
}

impl Customer {
    pub fn new(id: usize, arrival_time: f64, service_duration: f64) -> Customer {
        Customer {
            id,
            arrival_time,
            service_duration,
            wait_time: None,
            state: State::Waiting,
        }
    }
}

impl Agent<Event, Stats> for Customer {
    fn act(&mut self, current_t: f64, data: &Event) -> Response<Event, Stats> {
        match data {
            Event::ServerGranted { customer, .. } if *customer == self.id => {
                self.wait_time = Some(current_t - self.arrival_time);
                self.state = State::InService;
                Response::event(
                    current_t + self.service_duration,
                    Event::ServerReleased { customer: self.id },
                )
            }
            Event::ServerReleased { customer } if *customer == self.id => {
                self.state = State::Completed;
                Response::new()
            }
            _ => Response::new(),
        }
    }

    fn stats(&self) -> Stats {
        Stats::Customer(CustomerRecord {
            id: self.id,
            arrival_time: self.arrival_time,
            service_duration: self.service_duration,
            wait_time: self.wait_time,
            completed: self.state == State::Completed,
        })
    }
}
