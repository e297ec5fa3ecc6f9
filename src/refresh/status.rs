use super::state::PreviewState;
use crate::types::Generation;
use serde::Serialize;

/// Snapshot of the preview for status bars and `--format json` output
#[derive(Debug, Clone, Serialize)]
pub struct PreviewStatus {
    pub state: String,
    pub generation: Option<Generation>,
    /// "Framework" or "Plain"
    pub mode: String,
    pub has_error: bool,
    pub error_message: Option<String>,
    pub console_count: usize,
    pub document_fingerprint: String,
}

impl PreviewStatus {
    pub(super) fn describe(state: &PreviewState) -> String {
        match state {
            PreviewState::Loading { generation } | PreviewState::Ready { generation } => {
                format!("{} ({})", state.label(), generation)
            }
            _ => state.label().to_string(),
        }
    }
}
