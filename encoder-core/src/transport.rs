//! Byte-stream transport trait and error types.

use core::future::Future;

/// Error type for transport operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// No consumer attached (e.g. USB host not connected or port closed).
    NotConnected,
    /// I/O failure on the underlying stream.
    Io,
}

/// Duplex line transport for the bridge.
///
/// The poll loop treats the transport as advisory in both directions:
/// outbound writes are best-effort (a failed write is dropped and the next
/// scheduled report carries freshly accumulated motion), and inbound reads
/// never wait for data.
pub trait Transport {
    /// Best-effort write of one already-framed line.
    ///
    /// Must complete within a bounded time; a disconnected or stalled
    /// consumer is reported as an error rather than blocking the loop.
    fn send(&mut self, line: &[u8]) -> impl Future<Output = Result<(), TransportError>>;

    /// Zero-wait poll for a complete inbound line.
    ///
    /// When a full line has been received, copies it (without the
    /// terminator) into `buf` and returns its length; otherwise returns
    /// `None` immediately. Must never wait for further bytes to arrive.
    fn poll_line(&mut self, buf: &mut [u8]) -> impl Future<Output = Option<usize>>;
}
