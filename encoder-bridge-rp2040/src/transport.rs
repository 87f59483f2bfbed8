//! USB CDC-ACM line transport.
//!
//! The serial endpoint is split across two tasks: a reader task reassembles
//! newline-terminated lines from raw USB packets and queues them, and the
//! poll engine drains that queue through [`CdcLineTransport::poll_line`]
//! without ever waiting. Outbound writes go straight to the CDC sender and
//! fail fast when no host is attached.

use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_usb::class::cdc_acm::Sender;
use embassy_usb::driver::EndpointError;
use encoder_core::{Transport, TransportError};
use encoder_proto::MAX_LINE_LENGTH;
use heapless::Vec;

/// Depth of the complete-line queue between the reader task and the engine.
///
/// Commands are rare and operator-driven; a small queue is plenty, and a
/// full one simply drops the newest line (the sender can re-issue).
pub const LINE_QUEUE_DEPTH: usize = 4;

/// A complete inbound line, terminator stripped.
pub type Line = Vec<u8, MAX_LINE_LENGTH>;

/// Queue carrying complete lines from the reader task to the poll engine.
pub type LineChannel = Channel<CriticalSectionRawMutex, Line, LINE_QUEUE_DEPTH>;

/// Reassembles newline-terminated lines from a raw byte stream.
///
/// A line that outgrows the buffer is discarded up to the next terminator,
/// so one runaway line cannot cascade into parse errors on the ones behind
/// it. Empty lines (including the LF of a CRLF pair) are swallowed here
/// rather than queued.
pub struct LineAssembler {
    line: Line,
    discarding: bool,
}

impl LineAssembler {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            line: Vec::new(),
            discarding: false,
        }
    }

    /// Feed one byte; returns a complete line when a terminator arrives.
    pub fn push(&mut self, byte: u8) -> Option<Line> {
        if byte == b'\n' || byte == b'\r' {
            let discarded = core::mem::replace(&mut self.discarding, false);
            let line = core::mem::take(&mut self.line);
            if discarded || line.is_empty() {
                None
            } else {
                Some(line)
            }
        } else if self.discarding {
            None
        } else if self.line.push(byte).is_err() {
            self.line.clear();
            self.discarding = true;
            None
        } else {
            None
        }
    }
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Engine-side half of the transport.
pub struct CdcLineTransport {
    sender: Sender<'static, Driver<'static, USB>>,
    lines: &'static LineChannel,
}

impl CdcLineTransport {
    #[must_use]
    pub fn new(sender: Sender<'static, Driver<'static, USB>>, lines: &'static LineChannel) -> Self {
        Self { sender, lines }
    }
}

impl Transport for CdcLineTransport {
    async fn send(&mut self, line: &[u8]) -> Result<(), TransportError> {
        if !self.sender.dtr() {
            return Err(TransportError::NotConnected);
        }
        let packet_size = usize::from(self.sender.max_packet_size());
        for chunk in line.chunks(packet_size) {
            self.sender
                .write_packet(chunk)
                .await
                .map_err(endpoint_error)?;
        }
        // A transfer ending on a full packet needs a short packet to flush.
        if line.len() % packet_size == 0 {
            self.sender
                .write_packet(&[])
                .await
                .map_err(endpoint_error)?;
        }
        Ok(())
    }

    async fn poll_line(&mut self, buf: &mut [u8]) -> Option<usize> {
        let line = self.lines.try_receive().ok()?;
        let len = line.len().min(buf.len());
        buf[..len].copy_from_slice(&line[..len]);
        Some(len)
    }
}

fn endpoint_error(err: EndpointError) -> TransportError {
    match err {
        EndpointError::Disabled => TransportError::NotConnected,
        EndpointError::BufferOverflow => TransportError::Io,
    }
}
