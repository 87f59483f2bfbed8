//! Command dispatch against the accumulator and status indicator.

use encoder_proto::{Command, OutboundEvent};

use crate::accumulator::PositionAccumulator;
use crate::indicator::StatusIndicator;

/// Apply one decoded command and produce its immediate reply, if any.
///
/// Replies bypass the transmission scheduler: resets and pings are rare,
/// operator-driven events whose acknowledgement should not wait out a rate
/// limit. `Command` is a closed set validated by the parser, so there is no
/// error outcome here.
pub async fn handle_command<I: StatusIndicator>(
    command: Command,
    accumulator: &mut PositionAccumulator,
    indicator: &mut I,
) -> Option<OutboundEvent> {
    match command {
        Command::Reset { position } => {
            accumulator.reset(position);
            indicator.pulse().await;
            Some(OutboundEvent::EncoderReport { delta: 0, position })
        }
        Command::Ping => Some(OutboundEvent::Pong {
            position: accumulator.position(),
        }),
        Command::SetLed { on } => {
            indicator.set(on).await;
            None
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::indicator::NullIndicator;
    use crate::testing::block_on;
    use std::vec::Vec;

    /// Indicator that records every call for inspection.
    struct RecordingIndicator {
        levels: Vec<bool>,
        pulses: usize,
    }

    impl RecordingIndicator {
        fn new() -> Self {
            Self {
                levels: Vec::new(),
                pulses: 0,
            }
        }
    }

    impl StatusIndicator for RecordingIndicator {
        async fn set(&mut self, on: bool) {
            self.levels.push(on);
        }

        async fn pulse(&mut self) {
            self.pulses += 1;
        }
    }

    #[test]
    fn test_reset_replies_immediately_with_zero_delta() {
        let mut acc = PositionAccumulator::new();
        acc.apply_delta(5);
        let mut led = RecordingIndicator::new();

        let reply = block_on(handle_command(
            Command::Reset { position: 100 },
            &mut acc,
            &mut led,
        ));

        assert_eq!(
            reply,
            Some(OutboundEvent::EncoderReport {
                delta: 0,
                position: 100
            })
        );
        assert_eq!(acc.position(), 100);
        assert_eq!(acc.pending(), 0);
        assert_eq!(led.pulses, 1);
    }

    #[test]
    fn test_ping_reports_current_position() {
        let mut acc = PositionAccumulator::new();
        acc.reset(-3);
        let mut led = NullIndicator;

        let reply = block_on(handle_command(Command::Ping, &mut acc, &mut led));
        assert_eq!(reply, Some(OutboundEvent::Pong { position: -3 }));
    }

    #[test]
    fn test_ping_leaves_pending_untouched() {
        let mut acc = PositionAccumulator::new();
        acc.apply_delta(2);
        let mut led = NullIndicator;

        let _ = block_on(handle_command(Command::Ping, &mut acc, &mut led));
        assert_eq!(acc.pending(), 2);
    }

    #[test]
    fn test_set_led_drives_indicator_without_reply() {
        let mut acc = PositionAccumulator::new();
        let mut led = RecordingIndicator::new();

        let on = block_on(handle_command(Command::SetLed { on: true }, &mut acc, &mut led));
        let off = block_on(handle_command(Command::SetLed { on: false }, &mut acc, &mut led));

        assert_eq!(on, None);
        assert_eq!(off, None);
        assert_eq!(led.levels, [true, false]);
    }
}
