//! Bounded experience replay memory.

use std::collections::VecDeque;

use rand::seq::index;
use rand::Rng;

/// A single `(s, a, r, s', done)` experience.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: Vec<f32>,
    /// Index into the action table.
    pub action: usize,
    pub reward: f64,
    pub next_state: Vec<f32>,
    pub done: bool,
}

/// FIFO replay buffer; once full, each insert evicts the oldest transition.
#[derive(Debug)]
pub struct ReplayBuffer {
    capacity: usize,
    transitions: VecDeque<Transition>,
}

impl ReplayBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            transitions: VecDeque::with_capacity(capacity.min(4096)),
        }
    }

    pub fn add(&mut self, transition: Transition) {
        if self.capacity == 0 {
            return;
        }
        if self.transitions.len() == self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Draws `batch_size` distinct transitions uniformly at random.
    ///
    /// Returns `None` if fewer than `batch_size` transitions are stored.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, batch_size: usize) -> Option<Vec<&Transition>> {
        if batch_size == 0 || self.transitions.len() < batch_size {
            return None;
        }
        let picks = index::sample(rng, self.transitions.len(), batch_size);
        Some(picks.iter().map(|i| &self.transitions[i]).collect())
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}
