//! Shared identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one execution context's lifetime.
///
/// Generations are handed out by [`crate::sandbox::SandboxHost`] starting at 0 and
/// strictly increase for the lifetime of the host. Every asynchronous signal coming
/// back from a context is compared against the live generation before it may touch
/// host state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    pub const ZERO: Generation = Generation(0);

    pub fn new(value: u64) -> Self {
        Generation(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}
