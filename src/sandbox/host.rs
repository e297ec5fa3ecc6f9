//! Generation-tracking owner of the single live context.

use super::capability::CapabilitySet;
use crate::channel::{ContextPort, PreviewBus};
use crate::config::RuntimeConfig;
use crate::error::SandboxError;
use crate::synthesis::SynthesizedDocument;
use crate::types::Generation;
use tracing::{info, warn};

/// Everything a backend needs to bring up one context
pub struct ContextRequest<'a> {
    pub generation: Generation,
    pub document: &'a SynthesizedDocument,
    pub capabilities: &'a CapabilitySet,
    /// The context's only route back to the host
    pub port: ContextPort,
}

/// Isolation mechanism behind the host
pub trait ContextBackend {
    type Handle;

    /// Instantiate an isolated context running `request.document`
    fn create(&mut self, request: ContextRequest<'_>) -> Result<Self::Handle, SandboxError>;

    /// Tear the context down immediately; work in flight inside it is abandoned
    fn destroy(&mut self, handle: Self::Handle);
}

struct LiveContext<H> {
    generation: Generation,
    handle: H,
}

pub struct SandboxHost<B: ContextBackend> {
    backend: B,
    bus: PreviewBus,
    runtime: RuntimeConfig,
    next_generation: Generation,
    live: Option<LiveContext<B::Handle>>,
}

impl<B: ContextBackend> SandboxHost<B> {
    pub fn new(backend: B, bus: PreviewBus, runtime: RuntimeConfig) -> Self {
        Self {
            backend,
            bus,
            runtime,
            next_generation: Generation::ZERO,
            live: None,
        }
    }

    /// Replace the live context with a new one running `document`.
    ///
    /// The previous context is destroyed before the new one is created. A generation
    /// is consumed even when the backend fails, so numbers are never reused.
    pub fn create_context(
        &mut self,
        document: &SynthesizedDocument,
    ) -> Result<Generation, SandboxError> {
        self.destroy_live();

        let generation = self.next_generation;
        self.next_generation = generation.next();
        let capabilities = CapabilitySet::for_document(document, &self.runtime);
        let request = ContextRequest {
            generation,
            document,
            capabilities: &capabilities,
            port: self.bus.port(generation),
        };
        match self.backend.create(request) {
            Ok(handle) => {
                info!(%generation, fingerprint = %document.fingerprint(), "Created execution context");
                self.live = Some(LiveContext { generation, handle });
                Ok(generation)
            }
            Err(e) => {
                warn!(%generation, error = %e, "Execution context failed to start");
                Err(e)
            }
        }
    }

    /// Destroy the context created as `generation`; it must be the live one
    pub fn destroy_context(&mut self, generation: Generation) -> Result<(), SandboxError> {
        match &self.live {
            Some(live) if live.generation == generation => {
                self.destroy_live();
                Ok(())
            }
            _ => Err(SandboxError::UnknownContext(generation)),
        }
    }

    /// Destroy whatever context is live, if any
    pub fn destroy_live(&mut self) {
        if let Some(live) = self.live.take() {
            info!(generation = %live.generation, "Destroying execution context");
            self.backend.destroy(live.handle);
        }
    }

    pub fn live_generation(&self) -> Option<Generation> {
        self.live.as_ref().map(|live| live.generation)
    }

    pub fn live_handle(&self) -> Option<&B::Handle> {
        self.live.as_ref().map(|live| &live.handle)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
