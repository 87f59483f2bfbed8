//! Platform-agnostic core of the quadrature encoder bridge.
//!
//! This crate decodes a two-channel quadrature encoder and reports position
//! changes over a line-delimited JSON protocol, without any
//! platform-specific dependencies. It can be used both in embedded
//! `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`decoder`]: Quadrature state machine ([`QuadratureDecoder`], [`transition_delta`])
//! - [`accumulator`]: Position and pending-delta bookkeeping ([`PositionAccumulator`])
//! - [`scheduler`]: Rate-limited report coalescing ([`TransmissionScheduler`])
//! - [`dispatcher`]: Command handling ([`handle_command`])
//! - [`engine`]: The poll-loop body tying it all together ([`PollEngine`])
//! - [`sampler`], [`transport`], [`indicator`]: The seams a platform
//!   implements ([`PinSampler`], [`Transport`], [`StatusIndicator`])
//!
//! # Flow
//!
//! An outer driver owns the loop and calls [`PollEngine::step`] with a
//! monotonic millisecond clock. Each step samples the pins, integrates any
//! detected motion, flushes a coalesced report when the transmission
//! interval allows, and services at most one inbound command line.
//! Malformed input and transport failures are absorbed; the loop has no
//! fatal outcomes.
//!
//! # Example
//!
//! ```
//! use encoder_core::{transition_delta, PositionAccumulator, QuadratureDecoder};
//!
//! // 00 -> 01 is one clockwise step.
//! let mut decoder = QuadratureDecoder::new(false, false);
//! let mut acc = PositionAccumulator::new();
//! if let Some(delta) = decoder.observe(false, true) {
//!     acc.apply_delta(delta.into());
//! }
//! assert_eq!(acc.position(), 1);
//! assert_eq!(transition_delta(0b00, 0b01), 1);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod accumulator;
pub mod decoder;
pub mod dispatcher;
pub mod engine;
pub mod indicator;
pub mod sampler;
pub mod scheduler;
pub mod transport;

#[cfg(test)]
mod testing;

// Re-export main types at crate root
pub use accumulator::PositionAccumulator;
pub use decoder::{transition_delta, QuadratureDecoder};
pub use dispatcher::handle_command;
pub use engine::PollEngine;
pub use indicator::{NullIndicator, StatusIndicator};
pub use sampler::PinSampler;
pub use scheduler::{TransmissionScheduler, DEFAULT_INTERVAL_MS};
pub use transport::{Transport, TransportError};

// The protocol crate is part of the public API surface (commands and events
// cross the engine boundary); re-export it for single-dependency consumers.
pub use encoder_proto;
