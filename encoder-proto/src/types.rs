//! Protocol message types: inbound commands and outbound events.

/// Inbound control command, decoded from one JSON line.
///
/// The set is closed: anything that does not decode into one of these
/// variants is discarded by the parser and never reaches the dispatch layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Set the position counter to the given value (0 when the field is
    /// omitted on the wire) and clear any unsent delta.
    Reset {
        /// New absolute position.
        position: i32,
    },
    /// Liveness probe; answered immediately with [`OutboundEvent::Pong`].
    Ping,
    /// Drive the status LED directly (false when the field is omitted).
    SetLed {
        /// Desired LED level.
        on: bool,
    },
}

/// Outbound event, serialized as one JSON line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutboundEvent {
    /// Movement accumulated since the last report, plus the absolute position.
    ///
    /// Also sent with `delta: 0` as the immediate acknowledgement of a
    /// [`Command::Reset`].
    EncoderReport {
        /// Net steps since the previous report (positive = clockwise).
        delta: i32,
        /// Absolute position after applying `delta`.
        position: i32,
    },
    /// Reply to [`Command::Ping`].
    Pong {
        /// Current absolute position.
        position: i32,
    },
}
