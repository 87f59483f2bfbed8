//! GPIO sampler for the encoder channels.

use embassy_rp::gpio::Input;
use encoder_core::PinSampler;

/// Reads the A/B channels from two input pins.
///
/// The encoder's common pin goes to ground; the channel pins are pulled up,
/// so an engaged contact reads low. The decoder only cares about transitions
/// between the four states, not about which level means "engaged", so the
/// levels are passed through unmapped.
pub struct GpioSampler {
    pin_a: Input<'static>,
    pin_b: Input<'static>,
}

impl GpioSampler {
    /// Create a sampler from two already-configured input pins.
    #[must_use]
    pub fn new(pin_a: Input<'static>, pin_b: Input<'static>) -> Self {
        Self { pin_a, pin_b }
    }
}

impl PinSampler for GpioSampler {
    fn sample(&mut self) -> (bool, bool) {
        (self.pin_a.is_high(), self.pin_b.is_high())
    }
}
