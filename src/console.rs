//! Console relay
//!
//! Executing contexts intercept their own console and post `{ type, data, timestamp }`
//! messages to the host. The host stamps each message with the generation of the
//! context it came from; the [`ConsoleBridge`] keeps only messages from the live
//! generation, in a bounded ring buffer.

mod bridge;
mod message;
mod ring;

pub use bridge::{ConsoleBridge, Delivery};
pub use message::{parse_message, ConsoleEvent, ConsoleLevel, ConsoleMessage};
pub use ring::ConsoleRing;
