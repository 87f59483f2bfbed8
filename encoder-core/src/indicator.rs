//! Status indicator trait and a no-op implementation.

use core::future::Future;

/// Binary status indicator (an LED on hardware).
///
/// Purely presentational: the poll loop drives it on motion and on command
/// handling, but nothing in the core contract depends on it. Implementations
/// must stay within fixed, bounded durations so they cannot stall the loop.
pub trait StatusIndicator {
    /// Set the indicator steady on or off.
    fn set(&mut self, on: bool) -> impl Future<Output = ()>;

    /// One-shot pulse: on, a fixed short hold, then off.
    ///
    /// The off state is restored before the future resolves, regardless of
    /// the level the indicator held before the pulse.
    fn pulse(&mut self) -> impl Future<Output = ()>;
}

/// Indicator that goes nowhere, for tests and headless setups.
pub struct NullIndicator;

impl StatusIndicator for NullIndicator {
    async fn set(&mut self, _on: bool) {}

    async fn pulse(&mut self) {}
}
