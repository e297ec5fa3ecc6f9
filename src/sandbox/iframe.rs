//! Browser-hosted backend: one `<iframe srcdoc>` element per context.
//!
//! The backend does not run anything itself. It renders the frame markup a host page
//! embeds, and keeps the live context's port so the embedding layer can forward the
//! frame's `message` and `load` events into the host channel.

use super::host::{ContextBackend, ContextRequest};
use crate::channel::ContextPort;
use crate::error::SandboxError;
use crate::synthesis::escape_html;
use crate::types::Generation;

/// The live frame
#[derive(Debug, Clone)]
pub struct FrameHandle {
    generation: Generation,
    markup: String,
}

impl FrameHandle {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Element id the host page uses to find the frame
    pub fn element_id(&self) -> String {
        format!("preview-{}", self.generation)
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }
}

#[derive(Debug, Default)]
pub struct IframeBackend {
    current: Option<(FrameHandle, ContextPort)>,
}

impl IframeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup of the live frame, if any
    pub fn markup(&self) -> Option<&str> {
        self.current.as_ref().map(|(handle, _)| handle.markup())
    }

    /// Port for forwarding events of the frame created as `generation`.
    ///
    /// Returns `None` once that frame is gone; events from it must then be dropped.
    pub fn port(&self, generation: Generation) -> Option<&ContextPort> {
        self.current
            .as_ref()
            .filter(|(handle, _)| handle.generation == generation)
            .map(|(_, port)| port)
    }
}

impl ContextBackend for IframeBackend {
    type Handle = FrameHandle;

    fn create(&mut self, request: ContextRequest<'_>) -> Result<FrameHandle, SandboxError> {
        if request.document.is_empty() {
            return Err(SandboxError::MountFailed("empty document".to_string()));
        }
        let generation = request.generation;
        let markup = format!(
            "<iframe id=\"preview-{generation}\" data-generation=\"{}\" title=\"live-preview\" sandbox=\"{}\" csp=\"{}\" srcdoc=\"{}\"></iframe>",
            generation.value(),
            request.capabilities.sandbox_attribute(),
            escape_html(&request.capabilities.content_security_policy()),
            escape_html(request.document.as_str()),
        );
        let handle = FrameHandle { generation, markup };
        self.current = Some((handle.clone(), request.port));
        Ok(handle)
    }

    fn destroy(&mut self, handle: FrameHandle) {
        if self
            .current
            .as_ref()
            .is_some_and(|(live, _)| live.generation == handle.generation)
        {
            self.current = None;
        }
    }
}
