//! Server bank agent: the fixed-capacity resource pool
//!
//! Invariants: occupancy never exceeds capacity, and the wait queue is
//! non-empty only while every server is busy. Requests are granted in strict
//! FIFO order; a released server is handed to the longest-waiting requester
//! at the same simulated instant.

use crate::{Event, ServerBankStats, Stats};
use des::{Agent, Response};
use std::collections::VecDeque;

pub struct ServerBank {
    capacity: usize,
    occupancy: usize,
    // (customer, requested_at), front is the longest-waiting requester
    queue: VecDeque<(usize, f64)>,
    queue_samples: Vec<usize>,
    total_granted: usize,
    total_released: usize,
}

impl ServerBank {
    pub fn new(capacity: usize) -> ServerBank {
        ServerBank {
            capacity,
            occupancy: 0,
            queue: VecDeque::new(),
            queue_samples: Vec::new(),
            total_granted: 0,
            total_released: 0,
        }
    }
}

impl Agent<Event, Stats> for ServerBank {
    fn act(&mut self, current_t: f64, data: &Event) -> Response<Event, Stats> {
        match data {
            Event::ServerRequested { customer } => {
                // Arrival-instant queue depth, sampled before this request is
                // processed.
                self.queue_samples.push(self.queue.len());

                if self.occupancy == self.capacity {
                    self.queue.push_back((*customer, current_t));
                    Response::new()
                } else {
                    self.occupancy += 1;
                    self.total_granted += 1;
                    Response::event(
                        current_t,
                        Event::ServerGranted {
                            customer: *customer,
                            requested_at: current_t,
                        },
                    )
                }
            }
            Event::ServerReleased { .. } => {
                self.occupancy -= 1;
                self.total_released += 1;

                // Same-instant handoff to the longest-waiting requester.
                if let Some((customer, requested_at)) = self.queue.pop_front() {
                    self.occupancy += 1;
                    self.total_granted += 1;
                    Response::event(
                        current_t,
                        Event::ServerGranted {
                            customer,
                            requested_at,
                        },
                    )
                } else {
                    Response::new()
                }
            }
            _ => Response::new(),
        }
    }

    fn stats(&self) -> Stats {
        Stats::ServerBank(ServerBankStats {
            capacity: self.capacity,
            occupancy: self.occupancy,
            queue_length: self.queue.len(),
            queue_samples: self.queue_samples.clone(),
            total_granted: self.total_granted,
            total_released: self.total_released,
        })
    }
}
