//! Quadrature encoder to USB serial bridge for RP2040.
//!
//! This crate provides the embedded implementation of an encoder bridge
//! that decodes a two-channel quadrature rotary encoder and reports
//! position changes as line-delimited JSON over USB serial.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Polls the encoder pins and decodes quadrature transitions
//! 2. Coalesces motion into at most one report per 50 ms
//! 3. Accepts `reset` / `ping` / `led` command lines on the same port
//!
//! # Hardware Configuration
//!
//! | Function  | GPIO | Description |
//! |-----------|------|-------------|
//! | Encoder A | 0    | Channel A (pull-up, common to GND) |
//! | Encoder B | 1    | Channel B (pull-up, common to GND) |
//! | LED       | 25   | On-board LED (status indicator) |
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with three concurrent tasks:
//!
//! - **USB Task**: Manages the USB device stack
//! - **Reader Task**: Reassembles inbound lines and queues them
//! - **Engine Task**: Runs the poll loop (decode, report, dispatch)
//!
//! All position state lives inside the engine task; the reader task only
//! hands it complete lines through an [`embassy_sync`] channel, preserving
//! the single-writer discipline on the counters without any locking.
//!
//! # Modules
//!
//! - [`sampler`]: GPIO pin sampling ([`GpioSampler`])
//! - [`transport`]: USB CDC-ACM line transport ([`CdcLineTransport`], [`LineAssembler`])
//! - [`indicator`]: On-board LED ([`OnboardLed`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//!
//! # Re-exports
//!
//! This crate re-exports the public items from [`encoder_core`] for
//! convenience, so consumers only need to depend on this crate.

#![no_std]

// Re-export core types for convenience
pub use encoder_core::{
    handle_command, transition_delta, NullIndicator, PinSampler, PollEngine, PositionAccumulator,
    QuadratureDecoder, StatusIndicator, TransmissionScheduler, Transport, TransportError,
    DEFAULT_INTERVAL_MS,
};
pub use encoder_proto::{parse_command, Command, OutboundEvent, ParseError, Serialize};

pub mod indicator;
pub mod sampler;
pub mod transport;

pub use indicator::{OnboardLed, PULSE_DURATION};
pub use sampler::GpioSampler;
pub use transport::{CdcLineTransport, Line, LineAssembler, LineChannel, LINE_QUEUE_DEPTH};

/// Boot announcement, sent once after the startup blink.
///
/// Not part of the steady-state protocol; hosts may use it to confirm the
/// firmware and wiring they are talking to.
pub const READY_LINE: &[u8] =
    b"{\"type\":\"ready\",\"device\":\"rp2040\",\"pins\":{\"a\":0,\"b\":1}}\n";
