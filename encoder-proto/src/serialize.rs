//! Protocol serialization for outbound events.
//!
//! Events are rendered as one compact JSON object per line:
//!
//! ```text
//! {"type":"encoder","delta":<int>,"position":<int>}\n
//! {"type":"pong","position":<int>}\n
//! ```
//!
//! # Example
//!
//! ```
//! use encoder_proto::{OutboundEvent, Serialize};
//!
//! let event = OutboundEvent::EncoderReport { delta: 3, position: 3 };
//! let mut buf = [0u8; 64];
//! let len = event.serialize(&mut buf).unwrap();
//! assert_eq!(&buf[..len], b"{\"type\":\"encoder\",\"delta\":3,\"position\":3}\n");
//! ```

use crate::fmt::write_i32;
use crate::types::OutboundEvent;

/// Maximum size of a serialized event.
///
/// Breakdown for the worst case (encoder report, both values at i32 minimum):
/// `{"type":"encoder","delta":` (26) + `-2147483648` (11) + `,"position":` (12)
/// + `-2147483648` (11) + `}` (1) + `\n` (1) = 62. We use 64 for margin.
pub const MAX_EVENT_SIZE: usize = 64;

/// Error type for serialization operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerializeError {
    /// The output buffer is too small to hold the serialized event.
    BufferTooSmall,
    /// A write operation failed (for I/O adapters).
    WriteError,
}

impl core::fmt::Display for SerializeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
            Self::WriteError => write!(f, "write error"),
        }
    }
}

/// Cursor over the output buffer.
struct LineBuf<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> LineBuf<'a> {
    #[inline]
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    #[inline]
    fn write_i32(&mut self, value: i32) {
        self.pos += write_i32(&mut self.buf[self.pos..], value);
    }

    /// Terminate the line and return the total length.
    #[inline]
    fn finish(mut self) -> usize {
        self.buf[self.pos] = b'\n';
        self.pos + 1
    }
}

/// Extension trait for serializing protocol events.
pub trait Serialize {
    /// Serialize to the provided buffer.
    ///
    /// Returns the number of bytes written on success.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if the buffer is not large
    /// enough.
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError>;

    /// Serialize to a `heapless::Vec`.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if `N` is not large enough.
    #[cfg(feature = "heapless")]
    fn serialize_to_vec<const N: usize>(&self) -> Result<heapless::Vec<u8, N>, SerializeError> {
        let mut vec = heapless::Vec::new();
        vec.resize(N, 0)
            .map_err(|_| SerializeError::BufferTooSmall)?;
        let len = self.serialize(&mut vec)?;
        vec.truncate(len);
        Ok(vec)
    }

    /// Serialize to a `core::fmt::Write` implementation.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::WriteError`] if the write fails.
    fn serialize_fmt<W: core::fmt::Write>(&self, writer: &mut W) -> Result<(), SerializeError>;

    /// Serialize to an `embedded_io::Write` implementation.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::WriteError`] if the write fails.
    #[cfg(feature = "embedded-io")]
    fn serialize_io<W: embedded_io::Write>(&self, writer: &mut W) -> Result<(), SerializeError>;
}

impl Serialize for OutboundEvent {
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        if buf.len() < MAX_EVENT_SIZE {
            return Err(SerializeError::BufferTooSmall);
        }

        let mut lb = LineBuf::new(buf);
        match self {
            Self::EncoderReport { delta, position } => {
                lb.write_bytes(b"{\"type\":\"encoder\",\"delta\":");
                lb.write_i32(*delta);
                lb.write_bytes(b",\"position\":");
                lb.write_i32(*position);
                lb.write_bytes(b"}");
            }
            Self::Pong { position } => {
                lb.write_bytes(b"{\"type\":\"pong\",\"position\":");
                lb.write_i32(*position);
                lb.write_bytes(b"}");
            }
        }

        Ok(lb.finish())
    }

    fn serialize_fmt<W: core::fmt::Write>(&self, writer: &mut W) -> Result<(), SerializeError> {
        let mut buf = [0u8; MAX_EVENT_SIZE];
        let len = self.serialize(&mut buf)?;

        let s = core::str::from_utf8(&buf[..len]).map_err(|_| SerializeError::WriteError)?;
        writer.write_str(s).map_err(|_| SerializeError::WriteError)
    }

    #[cfg(feature = "embedded-io")]
    fn serialize_io<W: embedded_io::Write>(&self, writer: &mut W) -> Result<(), SerializeError> {
        let mut buf = [0u8; MAX_EVENT_SIZE];
        let len = self.serialize(&mut buf)?;
        writer
            .write_all(&buf[..len])
            .map_err(|_| SerializeError::WriteError)
    }
}
