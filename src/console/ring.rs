//! Bounded FIFO buffer of accepted console events.

use super::message::ConsoleEvent;
use crate::types::Generation;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct ConsoleRing {
    capacity: usize,
    events: VecDeque<ConsoleEvent>,
}

impl ConsoleRing {
    /// Create a ring holding at most `capacity` events (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            events: VecDeque::with_capacity(capacity),
        }
    }

    /// Append an event, returning the evicted oldest event when full
    pub fn push(&mut self, event: ConsoleEvent) -> Option<ConsoleEvent> {
        let evicted = if self.events.len() == self.capacity {
            self.events.pop_front()
        } else {
            None
        };
        self.events.push_back(event);
        evicted
    }

    /// Drop every event not produced by `generation`
    pub fn retain_generation(&mut self, generation: Generation) {
        self.events.retain(|event| event.generation == generation);
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &ConsoleEvent> {
        self.events.iter()
    }

    pub fn to_vec(&self) -> Vec<ConsoleEvent> {
        self.events.iter().cloned().collect()
    }
}
