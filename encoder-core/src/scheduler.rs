//! Rate-limited transmission of accumulated motion.

use encoder_proto::OutboundEvent;

use crate::accumulator::PositionAccumulator;

/// Default minimum interval between encoder reports (20 Hz).
pub const DEFAULT_INTERVAL_MS: u64 = 50;

/// Coalesces bursts of motion into at most one report per interval.
///
/// Bounding the outbound rate keeps a slow consumer from backing up the
/// transport; command replies (reset acknowledgement, pong) do not go
/// through this scheduler and are sent immediately by the dispatcher.
#[derive(Debug, Clone)]
pub struct TransmissionScheduler {
    interval_ms: u64,
    last_send_ms: u64,
}

impl TransmissionScheduler {
    /// New scheduler with the given minimum interval in milliseconds.
    #[must_use]
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_send_ms: 0,
        }
    }

    /// Offer a transmission opportunity at the given timestamp.
    ///
    /// Returns a report only when motion is pending *and* at least the
    /// configured interval has passed since the previous report; in that
    /// case the accumulator's pending delta is drained atomically and the
    /// send timestamp advances. A zero-delta report is never produced.
    pub fn tick(
        &mut self,
        now_ms: u64,
        accumulator: &mut PositionAccumulator,
    ) -> Option<OutboundEvent> {
        if accumulator.pending() == 0 {
            return None;
        }
        if now_ms.wrapping_sub(self.last_send_ms) < self.interval_ms {
            return None;
        }
        let delta = accumulator.take_pending();
        self.last_send_ms = now_ms;
        Some(OutboundEvent::EncoderReport {
            delta,
            position: accumulator.position(),
        })
    }
}

impl Default for TransmissionScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_event_without_pending_delta() {
        let mut sched = TransmissionScheduler::new(50);
        let mut acc = PositionAccumulator::new();
        // Interval long elapsed, still nothing to say.
        assert_eq!(sched.tick(10_000, &mut acc), None);
    }

    #[test]
    fn test_no_event_before_interval() {
        let mut sched = TransmissionScheduler::new(50);
        let mut acc = PositionAccumulator::new();
        acc.apply_delta(1);
        assert_eq!(sched.tick(10, &mut acc), None);
        // The pending delta is untouched by a declined tick.
        assert_eq!(acc.pending(), 1);
    }

    #[test]
    fn test_event_after_interval_drains_pending() {
        let mut sched = TransmissionScheduler::new(50);
        let mut acc = PositionAccumulator::new();
        acc.apply_delta(1);
        acc.apply_delta(1);
        let event = sched.tick(60, &mut acc).unwrap();
        assert_eq!(
            event,
            OutboundEvent::EncoderReport {
                delta: 2,
                position: 2
            }
        );
        assert_eq!(acc.pending(), 0);
    }

    #[test]
    fn test_coalesces_to_one_event_per_interval() {
        let mut sched = TransmissionScheduler::new(50);
        let mut acc = PositionAccumulator::new();

        acc.apply_delta(3);
        assert!(sched.tick(60, &mut acc).is_some());

        // More motion right after: held back until the next boundary.
        acc.apply_delta(2);
        assert_eq!(sched.tick(61, &mut acc), None);
        assert_eq!(sched.tick(109, &mut acc), None);
        let event = sched.tick(110, &mut acc).unwrap();
        assert_eq!(
            event,
            OutboundEvent::EncoderReport {
                delta: 2,
                position: 5
            }
        );
    }

    #[test]
    fn test_report_carries_absolute_position() {
        let mut sched = TransmissionScheduler::new(50);
        let mut acc = PositionAccumulator::new();
        acc.reset(100);
        acc.apply_delta(-1);
        let event = sched.tick(1_000, &mut acc).unwrap();
        assert_eq!(
            event,
            OutboundEvent::EncoderReport {
                delta: -1,
                position: 99
            }
        );
    }
}
