//! Bounded FIFO store of experience, sampled uniformly for training.

use ndarray::Array1;
use rand::thread_rng;
use std::collections::VecDeque;

use crate::error::{AresError, Result};

/// One recorded step of experience. Immutable once stored.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state: Array1<f32>,
    pub action: usize,
    pub reward: f32,
    pub next_state: Array1<f32>,
    pub done: bool,
}

/// Ring buffer of transitions with FIFO eviction at capacity.
///
/// Shared by every enemy within the single simulation thread; callers that
/// move it across threads must add their own synchronization.
#[derive(Clone)]
pub struct ReplayBuffer {
    buffer: VecDeque<Transition>,
    capacity: usize,
}

impl ReplayBuffer {
    pub fn new(capacity: usize) -> Self {
        ReplayBuffer {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a transition, evicting the oldest one once at capacity.
    pub fn push(&mut self, transition: Transition) {
        if self.buffer.len() == self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(transition);
    }

    /// Draw `batch_size` transitions uniformly at random, with no duplicate
    /// indices within one call. Errors when fewer transitions are stored than
    /// requested.
    pub fn sample(&self, batch_size: usize) -> Result<Vec<&Transition>> {
        if self.buffer.len() < batch_size {
            return Err(AresError::EmptyBuffer(format!(
                "buffer holds {} transitions, need {}",
                self.buffer.len(),
                batch_size
            )));
        }

        let mut rng = thread_rng();
        let indices = rand::seq::index::sample(&mut rng, self.buffer.len(), batch_size);
        Ok(indices.into_iter().map(|i| &self.buffer[i]).collect())
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.buffer.iter()
    }
}
