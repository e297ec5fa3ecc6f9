//! Wire schema for messages posted by an execution context.

use crate::error::ChannelError;
use crate::types::Generation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Console level carried by a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsoleLevel {
    Log,
    Warn,
    Error,
    Info,
}

impl ConsoleLevel {
    /// Parse a wire `type` field such as `CONSOLE_WARN`
    pub fn from_wire(kind: &str) -> Option<Self> {
        match kind {
            "CONSOLE_LOG" => Some(ConsoleLevel::Log),
            "CONSOLE_WARN" => Some(ConsoleLevel::Warn),
            "CONSOLE_ERROR" => Some(ConsoleLevel::Error),
            "CONSOLE_INFO" => Some(ConsoleLevel::Info),
            _ => None,
        }
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            ConsoleLevel::Log => "CONSOLE_LOG",
            ConsoleLevel::Warn => "CONSOLE_WARN",
            ConsoleLevel::Error => "CONSOLE_ERROR",
            ConsoleLevel::Info => "CONSOLE_INFO",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConsoleLevel::Log => "log",
            ConsoleLevel::Warn => "warn",
            ConsoleLevel::Error => "error",
            ConsoleLevel::Info => "info",
        }
    }
}

/// A validated message, not yet attributed to a generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleMessage {
    pub level: ConsoleLevel,
    pub data: String,
    pub timestamp: DateTime<Utc>,
}

impl ConsoleMessage {
    pub fn into_event(self, generation: Generation) -> ConsoleEvent {
        ConsoleEvent {
            level: self.level,
            message: self.data,
            timestamp: self.timestamp,
            generation,
        }
    }
}

/// A console entry accepted into the host buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleEvent {
    pub level: ConsoleLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub generation: Generation,
}

#[derive(Deserialize)]
struct WireMessage {
    #[serde(rename = "type")]
    kind: String,
    data: String,
    timestamp: String,
}

/// Validate a raw channel payload.
///
/// Anything that is not an object with a known `type`, a string `data` and an
/// RFC 3339 `timestamp` is rejected.
pub fn parse_message(payload: &Value) -> Result<ConsoleMessage, ChannelError> {
    if !payload.is_object() {
        return Err(ChannelError::Malformed("payload is not an object".to_string()));
    }
    let wire = WireMessage::deserialize(payload)
        .map_err(|e| ChannelError::Malformed(e.to_string()))?;
    let level = ConsoleLevel::from_wire(&wire.kind)
        .ok_or_else(|| ChannelError::UnknownType(wire.kind.clone()))?;
    let timestamp = DateTime::parse_from_rfc3339(&wire.timestamp)
        .map_err(|_| ChannelError::BadTimestamp(wire.timestamp.clone()))?
        .with_timezone(&Utc);
    Ok(ConsoleMessage {
        level,
        data: wire.data,
        timestamp,
    })
}
