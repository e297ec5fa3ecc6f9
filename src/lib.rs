//! Livepreview: Generation-Gated Live Preview Engine
//!
//! Turns a snapshot of a small web project into one self-contained document, runs it
//! in an isolated execution context, and relays the context's console output back to
//! the host. Every context carries a generation number; anything a superseded
//! context sends after it was replaced is discarded.

pub mod channel;
pub mod classify;
pub mod cli;
pub mod config;
pub mod console;
pub mod diagnose;
pub mod entry;
pub mod error;
pub mod files;
pub mod logging;
pub mod refresh;
pub mod sandbox;
pub mod synthesis;
pub mod types;

pub use classify::{classify, ModeClassification};
pub use diagnose::{detect, StaticDiagnostic};
pub use files::ProjectFileSet;
pub use refresh::{PreviewState, RefreshController};
pub use synthesis::{synthesize, SynthesizedDocument};
pub use types::Generation;
