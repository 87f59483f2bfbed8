//! Position and pending-delta bookkeeping.

/// Absolute position counter plus the delta not yet transmitted.
///
/// The position is only ever mutated through [`apply_delta`] and [`reset`];
/// there is no other mutator. Both counters wrap at the i32 boundaries
/// rather than saturating, matching the native-width behavior of the
/// counter on the wire.
///
/// [`apply_delta`]: PositionAccumulator::apply_delta
/// [`reset`]: PositionAccumulator::reset
#[derive(Debug, Clone, Default)]
pub struct PositionAccumulator {
    position: i32,
    pending: i32,
}

impl PositionAccumulator {
    /// New accumulator at position 0 with nothing pending.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            position: 0,
            pending: 0,
        }
    }

    /// Integrate one decoded step. A zero delta is a no-op.
    pub fn apply_delta(&mut self, delta: i32) {
        if delta != 0 {
            self.position = self.position.wrapping_add(delta);
            self.pending = self.pending.wrapping_add(delta);
        }
    }

    /// Force the position to a new value and drop any unsent delta.
    ///
    /// Pending is cleared because a reset is acknowledged immediately with
    /// its own report; carrying stale motion across it would double-count.
    pub fn reset(&mut self, position: i32) {
        self.position = position;
        self.pending = 0;
    }

    /// Drain the pending delta, leaving it at 0.
    #[must_use]
    pub fn take_pending(&mut self) -> i32 {
        core::mem::take(&mut self.pending)
    }

    /// Current absolute position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> i32 {
        self.position
    }

    /// Delta accumulated since the last drain.
    #[inline]
    #[must_use]
    pub const fn pending(&self) -> i32 {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let acc = PositionAccumulator::new();
        assert_eq!(acc.position(), 0);
        assert_eq!(acc.pending(), 0);
    }

    #[test]
    fn test_apply_delta_tracks_both_counters() {
        let mut acc = PositionAccumulator::new();
        acc.apply_delta(1);
        acc.apply_delta(1);
        acc.apply_delta(-1);
        assert_eq!(acc.position(), 1);
        assert_eq!(acc.pending(), 1);
    }

    #[test]
    fn test_take_pending_drains_but_keeps_position() {
        let mut acc = PositionAccumulator::new();
        acc.apply_delta(3);
        assert_eq!(acc.take_pending(), 3);
        assert_eq!(acc.pending(), 0);
        assert_eq!(acc.position(), 3);
        // A second drain yields nothing.
        assert_eq!(acc.take_pending(), 0);
    }

    #[test]
    fn test_reset_sets_position_and_clears_pending() {
        let mut acc = PositionAccumulator::new();
        acc.apply_delta(7);
        acc.apply_delta(-2);
        acc.reset(42);
        assert_eq!(acc.position(), 42);
        assert_eq!(acc.pending(), 0);
    }

    #[test]
    fn test_pending_independent_of_position_magnitude() {
        let mut acc = PositionAccumulator::new();
        acc.reset(1_000_000);
        acc.apply_delta(1);
        assert_eq!(acc.position(), 1_000_001);
        assert_eq!(acc.pending(), 1);
    }

    #[test]
    fn test_position_wraps_at_native_width() {
        let mut acc = PositionAccumulator::new();
        acc.reset(i32::MAX);
        acc.apply_delta(1);
        assert_eq!(acc.position(), i32::MIN);
    }
}
