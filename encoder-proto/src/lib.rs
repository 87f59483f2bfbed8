//! Line-delimited JSON protocol for the quadrature encoder bridge.
//!
//! This crate provides everything needed to speak the bridge's wire
//! protocol:
//!
//! - **Types**: message variants for both directions
//!   - [`Command`] - Inbound control command (reset / ping / led)
//!   - [`OutboundEvent`] - Outbound report (encoder / pong)
//!
//! - **Parsing**: decode incoming command lines
//!   - [`parse_command()`] - Parse one line into a [`Command`]
//!   - [`ParseError`] - Why a line was rejected
//!
//! - **Serialization**: encode outgoing event lines
//!   - [`Serialize`] trait - Render an event into a caller buffer
//!
//! # Protocol Format
//!
//! UTF-8 text, one JSON object per line, newline-terminated, in both
//! directions.
//!
//! ## Outbound
//!
//! ```text
//! {"type":"encoder","delta":<int>,"position":<int>}
//! {"type":"pong","position":<int>}
//! ```
//!
//! ## Inbound
//!
//! ```text
//! {"type":"reset","position":<int>}   position optional, default 0
//! {"type":"ping"}
//! {"type":"led","on":<bool>}          on optional, default false
//! ```
//!
//! Lines that do not match any of these shapes are rejected by the parser;
//! the bridge discards them without a reply, so a noisy or half-connected
//! transport cannot disturb the poll loop.
//!
//! # Examples
//!
//! ## Parsing Commands
//!
//! ```
//! use encoder_proto::{parse_command, Command};
//!
//! let cmd = parse_command(b"{\"type\":\"reset\",\"position\":100}\n").unwrap();
//! assert_eq!(cmd, Command::Reset { position: 100 });
//!
//! assert!(parse_command(b"not json").is_err());
//! ```
//!
//! ## Serializing Events
//!
//! ```
//! use encoder_proto::{OutboundEvent, Serialize};
//!
//! let mut buf = [0u8; 64];
//! let len = OutboundEvent::Pong { position: 42 }.serialize(&mut buf).unwrap();
//! assert_eq!(&buf[..len], b"{\"type\":\"pong\",\"position\":42}\n");
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//! - **`heapless`**: Enable `serialize_to_vec()` methods
//! - **`embedded-io`**: Enable `serialize_io()` methods for I/O peripherals
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

mod fmt;
pub mod parser;
pub mod serialize;
pub mod types;

// Re-export types at crate root for convenience
pub use parser::{parse_command, ParseError, MAX_LINE_LENGTH};
pub use serialize::{Serialize, SerializeError, MAX_EVENT_SIZE};
pub use types::{Command, OutboundEvent};
