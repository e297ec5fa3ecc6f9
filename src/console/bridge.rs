//! Generation gate between the channel and the ring buffer.

use super::message::{parse_message, ConsoleEvent};
use super::ring::ConsoleRing;
use crate::types::Generation;
use serde_json::Value;
use tracing::{debug, trace};

/// Outcome of delivering one message to the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Accepted,
    /// From a context that is no longer live
    Stale,
    /// Payload failed validation
    Dropped,
}

/// Owns the console buffer and the generation it currently accepts
#[derive(Debug, Clone)]
pub struct ConsoleBridge {
    ring: ConsoleRing,
    live: Option<Generation>,
    stale: u64,
    dropped: u64,
}

impl ConsoleBridge {
    pub fn new(capacity: usize) -> Self {
        Self {
            ring: ConsoleRing::new(capacity),
            live: None,
            stale: 0,
            dropped: 0,
        }
    }

    /// Accept messages from `generation` only, discarding anything buffered earlier
    pub fn begin_generation(&mut self, generation: Generation) {
        self.live = Some(generation);
        self.ring.retain_generation(generation);
    }

    /// Stop accepting messages from any context
    pub fn suspend(&mut self) {
        self.live = None;
        self.ring.clear();
    }

    pub fn live_generation(&self) -> Option<Generation> {
        self.live
    }

    /// Deliver a payload posted by the context that was created as `origin`.
    ///
    /// Never panics and never returns an error: rejected payloads are counted and
    /// logged at trace level.
    pub fn receive(&mut self, origin: Generation, payload: &Value) -> Delivery {
        if self.live != Some(origin) {
            self.stale += 1;
            debug!(%origin, live = ?self.live, "Discarding console message from stale context");
            return Delivery::Stale;
        }
        match parse_message(payload) {
            Ok(message) => {
                self.ring.push(message.into_event(origin));
                Delivery::Accepted
            }
            Err(e) => {
                self.dropped += 1;
                trace!(%origin, error = %e, "Dropping channel message");
                Delivery::Dropped
            }
        }
    }

    pub fn events(&self) -> Vec<ConsoleEvent> {
        self.ring.to_vec()
    }

    pub fn ring(&self) -> &ConsoleRing {
        &self.ring
    }

    pub fn clear(&mut self) {
        self.ring.clear();
    }

    pub fn stale_count(&self) -> u64 {
        self.stale
    }

    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }
}
