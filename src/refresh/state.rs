use crate::types::Generation;
use serde::{Deserialize, Serialize};

/// Preview lifecycle state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PreviewState {
    /// Nothing mounted yet; the document is the default shell
    #[default]
    Idle,
    Synthesizing,
    /// Context created, waiting for its load-complete signal
    Loading { generation: Generation },
    Ready { generation: Generation },
    /// A diagnostic page is shown; terminal until the next trigger
    ErrorDisplay { message: String },
}

impl PreviewState {
    pub fn label(&self) -> &'static str {
        match self {
            PreviewState::Idle => "idle",
            PreviewState::Synthesizing => "synthesizing",
            PreviewState::Loading { .. } => "loading",
            PreviewState::Ready { .. } => "ready",
            PreviewState::ErrorDisplay { .. } => "error",
        }
    }

    /// Generation of the context this state refers to, if any
    pub fn generation(&self) -> Option<Generation> {
        match self {
            PreviewState::Loading { generation } | PreviewState::Ready { generation } => {
                Some(*generation)
            }
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PreviewState::ErrorDisplay { .. })
    }
}
