//! Pin sampling trait.

/// Source of raw A/B channel levels.
///
/// Implementations read the two encoder pins (GPIO on hardware, a scripted
/// sequence in tests). Sampling is synchronous: a poll-loop iteration must
/// observe both channels at the same instant, and a pin read never waits.
pub trait PinSampler {
    /// Read the current level of the A and B channels.
    fn sample(&mut self) -> (bool, bool);
}
