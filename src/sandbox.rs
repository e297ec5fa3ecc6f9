//! Isolated execution contexts
//!
//! A [`SandboxHost`] owns at most one live execution context. Creating a context
//! always destroys the previous one first and tags the new one with the next
//! [`Generation`](crate::types::Generation). The actual isolation mechanism lives
//! behind [`ContextBackend`]: an iframe in a browser host, an in-memory simulation
//! in tests.
//!
//! Every context is granted the same fixed [`CapabilitySet`]: script execution,
//! messaging to the host over its [`ContextPort`](crate::channel::ContextPort), and
//! network access limited to the runtime allowlist when the document needs it.

mod capability;
mod host;
mod iframe;
mod memory;

pub use capability::{Capability, CapabilitySet, NetworkPolicy};
pub use host::{ContextBackend, ContextRequest, SandboxHost};
pub use iframe::{FrameHandle, IframeBackend};
pub use memory::{MemoryBackend, MemoryContext};
