//! On-board LED status indicator.

use embassy_rp::gpio::{Level, Output};
use embassy_time::{Duration, Timer};
use encoder_core::StatusIndicator;

/// Fixed hold time for one-shot pulses and startup blinks.
pub const PULSE_DURATION: Duration = Duration::from_millis(100);

/// The Pico's on-board LED (GPIO 25, active high).
pub struct OnboardLed {
    output: Output<'static>,
}

impl OnboardLed {
    /// Wrap an already-configured output pin.
    #[must_use]
    pub fn new(output: Output<'static>) -> Self {
        Self { output }
    }

    /// Three on/off blinks announcing boot, before the poll loop starts.
    pub async fn startup_blink(&mut self) {
        for _ in 0..3 {
            self.output.set_high();
            Timer::after(PULSE_DURATION).await;
            self.output.set_low();
            Timer::after(PULSE_DURATION).await;
        }
    }
}

impl StatusIndicator for OnboardLed {
    async fn set(&mut self, on: bool) {
        self.output
            .set_level(if on { Level::High } else { Level::Low });
    }

    async fn pulse(&mut self) {
        self.output.set_high();
        Timer::after(PULSE_DURATION).await;
        self.output.set_low();
    }
}
