//! Inbound message channel between execution contexts and the host.
//!
//! Every context gets a [`ContextPort`] stamped with the generation it was created
//! under. Whatever the sandbox posts through that port reaches the host as an
//! [`InboundEvent`] carrying that generation, so late deliveries from a destroyed
//! context can be recognised and discarded no matter when they arrive.

use crate::types::Generation;
use serde_json::Value;
use std::sync::mpsc::{channel, Receiver, Sender};
use tracing::trace;

/// Typed event delivered to the host
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// Raw payload posted by the context
    Message { origin: Generation, payload: Value },
    /// The context finished loading its document
    Loaded { origin: Generation },
}

impl InboundEvent {
    pub fn origin(&self) -> Generation {
        match self {
            InboundEvent::Message { origin, .. } | InboundEvent::Loaded { origin } => *origin,
        }
    }
}

/// Host end of the channel; hands out ports to new contexts
#[derive(Clone)]
pub struct PreviewBus {
    sender: Sender<InboundEvent>,
}

impl PreviewBus {
    pub fn new_pair() -> (Self, Receiver<InboundEvent>) {
        let (sender, receiver) = channel();
        (Self { sender }, receiver)
    }

    /// Port for the context created as `generation`
    pub fn port(&self, generation: Generation) -> ContextPort {
        ContextPort {
            generation,
            sender: self.sender.clone(),
        }
    }
}

/// Context end of the channel
#[derive(Debug, Clone)]
pub struct ContextPort {
    generation: Generation,
    sender: Sender<InboundEvent>,
}

impl ContextPort {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Forward a payload posted by the context.
    ///
    /// Returns `false` when the host side is gone; the payload is then lost, which is
    /// the same outcome as delivery to a superseded generation.
    pub fn post(&self, payload: Value) -> bool {
        self.send(InboundEvent::Message {
            origin: self.generation,
            payload,
        })
    }

    /// Forward the context's load-complete signal
    pub fn signal_loaded(&self) -> bool {
        self.send(InboundEvent::Loaded {
            origin: self.generation,
        })
    }

    fn send(&self, event: InboundEvent) -> bool {
        match self.sender.send(event) {
            Ok(()) => true,
            Err(_) => {
                trace!(generation = %self.generation, "Host channel closed; event lost");
                false
            }
        }
    }
}
