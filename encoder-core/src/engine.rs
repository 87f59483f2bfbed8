//! Poll engine: one step samples the encoder, flushes any due report, and
//! services at most one inbound command.

use encoder_proto::{parse_command, OutboundEvent, Serialize, MAX_EVENT_SIZE, MAX_LINE_LENGTH};

use crate::accumulator::PositionAccumulator;
use crate::decoder::QuadratureDecoder;
use crate::dispatcher::handle_command;
use crate::indicator::StatusIndicator;
use crate::sampler::PinSampler;
use crate::scheduler::TransmissionScheduler;
use crate::transport::{Transport, TransportError};

/// The bridge's poll loop body, owning all decoding and reporting state.
///
/// The engine deliberately has no loop of its own: an outer driver calls
/// [`step`] with a monotonic millisecond timestamp — a hardware loop feeding
/// real time, or a test harness feeding a synthetic clock. Nothing in a step
/// blocks beyond the indicator's fixed pulse, and no input, however
/// malformed, terminates the loop.
///
/// [`step`]: PollEngine::step
pub struct PollEngine<S, T, I> {
    sampler: S,
    transport: T,
    indicator: I,
    decoder: QuadratureDecoder,
    accumulator: PositionAccumulator,
    scheduler: TransmissionScheduler,
}

impl<S: PinSampler, T: Transport, I: StatusIndicator> PollEngine<S, T, I> {
    /// Create an engine, seeding the decoder from an initial pin sample.
    pub fn new(mut sampler: S, transport: T, indicator: I, interval_ms: u64) -> Self {
        let (a, b) = sampler.sample();
        Self {
            decoder: QuadratureDecoder::new(a, b),
            accumulator: PositionAccumulator::new(),
            scheduler: TransmissionScheduler::new(interval_ms),
            sampler,
            transport,
            indicator,
        }
    }

    /// Run one iteration of the poll loop at the given timestamp.
    pub async fn step(&mut self, now_ms: u64) {
        // 1. Sample the encoder. Motion lights the indicator, an unchanged
        //    sample clears it; an aliased double step leaves it alone.
        let (a, b) = self.sampler.sample();
        match self.decoder.observe(a, b) {
            Some(delta) if delta != 0 => {
                self.accumulator.apply_delta(i32::from(delta));
                self.indicator.set(true).await;
            }
            Some(_) => {}
            None => self.indicator.set(false).await,
        }

        // 2. Scheduled report. A failed write is dropped without retry; the
        //    next report carries whatever accumulates in the meantime.
        if let Some(event) = self.scheduler.tick(now_ms, &mut self.accumulator) {
            let _ = self.send(event).await;
        }

        // 3. Inbound command, if a complete line is waiting. Lines that do
        //    not parse into a command are discarded without a reply.
        let mut line = [0u8; MAX_LINE_LENGTH];
        if let Some(len) = self.transport.poll_line(&mut line).await {
            if let Ok(command) = parse_command(&line[..len]) {
                if let Some(reply) =
                    handle_command(command, &mut self.accumulator, &mut self.indicator).await
                {
                    let _ = self.send(reply).await;
                }
            }
        }
    }

    async fn send(&mut self, event: OutboundEvent) -> Result<(), TransportError> {
        let mut buf = [0u8; MAX_EVENT_SIZE];
        let len = event
            .serialize(&mut buf)
            .map_err(|_| TransportError::Io)?;
        self.transport.send(&buf[..len]).await
    }

    /// Current absolute position.
    #[must_use]
    pub fn position(&self) -> i32 {
        self.accumulator.position()
    }

    /// Get a reference to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get a mutable reference to the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Decompose the engine into its sampler, transport, and indicator.
    pub fn into_parts(self) -> (S, T, I) {
        (self.sampler, self.transport, self.indicator)
    }
}
