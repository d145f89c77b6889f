//! Discrete-event simulation engine: a time-ordered event queue broadcast to
//! a set of agents, each of which may schedule further events or spawn new
//! agents in response.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct Event<T> {
    t: f64,
    seq: u64,
    data: T,
}

impl<T> PartialEq for Event<T> {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq && self.t.total_cmp(&other.t).is_eq()
    }
}

impl<T> Eq for Event<T> {}

impl<T> Ord for Event<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the BinaryHeap pops the earliest deadline first; equal
        // deadlines pop in scheduling order (lowest sequence number first).
        other
            .t
            .total_cmp(&self.t)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> PartialOrd for Event<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// What an agent hands back from [`Agent::act`]: events to schedule and
/// agents to add to the simulation.
pub struct Response<T, S> {
    pub events: Vec<(f64, T)>,
    pub agents: Vec<Box<dyn Agent<T, S>>>,
}

impl<T, S> Response<T, S> {
    pub fn new() -> Response<T, S> {
        Response {
            events: Vec::new(),
            agents: Vec::new(),
        }
    }

    pub fn event(t: f64, data: T) -> Response<T, S> {
        Response {
            events: vec![(t, data)],
            agents: Vec::new(),
        }
    }

    pub fn events(events: Vec<(f64, T)>) -> Response<T, S> {
        Response {
            events,
            agents: Vec::new(),
        }
    }

    pub fn agent(agent: Box<dyn Agent<T, S>>) -> Response<T, S> {
        Response {
            events: Vec::new(),
            agents: vec![agent],
        }
    }
}

/// A simulation process. Every scheduled event is broadcast to every agent;
/// agents filter for the events that concern them. `S` is the agent's
/// observable statistics snapshot.
pub trait Agent<T, S> {
    fn act(&mut self, _current_t: f64, _data: &T) -> Response<T, S> {
        Response::new()
    }

    fn stats(&self) -> S;
}

pub struct EventLoop<T, S> {
    queue: BinaryHeap<Event<T>>,
    current_t: f64,
    next_seq: u64,
    agents: Vec<Box<dyn Agent<T, S>>>,
}

impl<T, S> EventLoop<T, S> {
    pub fn new(events: Vec<(f64, T)>, agents: Vec<Box<dyn Agent<T, S>>>) -> EventLoop<T, S> {
        let mut event_loop = EventLoop {
            queue: BinaryHeap::new(),
            current_t: 0.0,
            next_seq: 0,
            agents,
        };
        for (t, data) in events {
            event_loop.push(t, data);
        }
        event_loop
    }

    fn push(&mut self, t: f64, data: T) {
        // Nothing can be scheduled in the past; the clock is monotonic.
        let t = t.max(self.current_t);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Event { t, seq, data });
    }

    fn dispatch(&mut self, event: Event<T>) {
        self.current_t = event.t;
        let mut new_agents = Vec::new();
        for agent in &mut self.agents {
            let response = agent.act(event.t, &event.data);
            for (t, data) in response.events {
                let t = t.max(event.t);
                let seq = self.next_seq;
                self.next_seq += 1;
                self.queue.push(Event { t, seq, data });
            }
            new_agents.extend(response.agents);
        }
        // Agents spawned during a dispatch join the broadcast set afterwards,
        // in time for any later event.
        self.agents.extend(new_agents);
    }

    /// Drive the clock forward until no pending event remains strictly before
    /// `until`. Events at or beyond the horizon are never dispatched.
    pub fn run(&mut self, until: f64) {
        while self.queue.peek().is_some_and(|head| head.t < until) {
            if let Some(event) = self.queue.pop() {
                self.dispatch(event);
            }
        }
    }

    pub fn current_t(&self) -> f64 {
        self.current_t
    }

    /// Snapshot every agent's statistics, in registration order.
    pub fn stats(&self) -> Vec<S> {
        self.agents.iter().map(|agent| agent.stats()).collect()
    }
}
