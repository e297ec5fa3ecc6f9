//! Refresh state machine
//!
//! [`RefreshController`] is the single owner of everything a preview needs: the
//! committed file set, the sandbox host and its generation counter, the console
//! bridge and the current [`PreviewState`]. Triggers (`files_changed`, `run`,
//! `run_with`) always restart the sequence; inbound context events are drained from
//! the channel with [`RefreshController::pump`] and checked against the live
//! generation before they can change anything.

mod controller;
mod state;
mod status;

pub use controller::RefreshController;
pub use state::PreviewState;
pub use status::PreviewStatus;
