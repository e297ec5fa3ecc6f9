//! Headless backend that keeps contexts in memory.
//!
//! Used by tests and the CLI's dry runs: a context is just its document and its port,
//! and the caller plays the part of the sandboxed code by posting through the port.

use super::capability::CapabilitySet;
use super::host::{ContextBackend, ContextRequest};
use crate::channel::ContextPort;
use crate::error::SandboxError;
use crate::types::Generation;
use serde_json::Value;
use std::collections::{BTreeMap, VecDeque};

/// Destroyed contexts remembered for late-delivery simulation
pub const RETIRED_LIMIT: usize = 64;

/// A context held by [`MemoryBackend`]
#[derive(Debug, Clone)]
pub struct MemoryContext {
    pub document: String,
    pub capabilities: CapabilitySet,
    pub port: ContextPort,
}

impl MemoryContext {
    /// Post a payload as the sandboxed code would
    pub fn post(&self, payload: Value) -> bool {
        self.port.post(payload)
    }

    pub fn signal_loaded(&self) -> bool {
        self.port.signal_loaded()
    }
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    alive: BTreeMap<Generation, MemoryContext>,
    /// Ports of the most recently destroyed contexts, kept so callers can simulate
    /// late deliveries. Holds at most [`RETIRED_LIMIT`] entries.
    retired: BTreeMap<Generation, ContextPort>,
    destroyed: VecDeque<Generation>,
    fail_next: Option<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `create` fail with `reason`
    pub fn fail_next_create(&mut self, reason: impl Into<String>) {
        self.fail_next = Some(reason.into());
    }

    pub fn alive(&self) -> Vec<Generation> {
        self.alive.keys().copied().collect()
    }

    pub fn context(&self, generation: Generation) -> Option<&MemoryContext> {
        self.alive.get(&generation)
    }

    /// Port of any context ever created, live or destroyed
    pub fn port(&self, generation: Generation) -> Option<&ContextPort> {
        self.alive
            .get(&generation)
            .map(|context| &context.port)
            .or_else(|| self.retired.get(&generation))
    }

    /// Generations in the order they were destroyed, oldest first, up to [`RETIRED_LIMIT`]
    pub fn destroyed(&self) -> Vec<Generation> {
        self.destroyed.iter().copied().collect()
    }
}

impl ContextBackend for MemoryBackend {
    type Handle = Generation;

    fn create(&mut self, request: ContextRequest<'_>) -> Result<Generation, SandboxError> {
        if let Some(reason) = self.fail_next.take() {
            return Err(SandboxError::MountFailed(reason));
        }
        self.alive.insert(
            request.generation,
            MemoryContext {
                document: request.document.as_str().to_string(),
                capabilities: request.capabilities.clone(),
                port: request.port,
            },
        );
        Ok(request.generation)
    }

    fn destroy(&mut self, handle: Generation) {
        if let Some(context) = self.alive.remove(&handle) {
            self.retired.insert(handle, context.port);
            self.destroyed.push_back(handle);
            while self.destroyed.len() > RETIRED_LIMIT {
                if let Some(oldest) = self.destroyed.pop_front() {
                    self.retired.remove(&oldest);
                }
            }
        }
    }
}
