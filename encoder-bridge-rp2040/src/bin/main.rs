#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_time::{Duration, Instant, Timer};
use embassy_usb::class::cdc_acm::{CdcAcmClass, Receiver, State};
use embassy_usb::{Builder, Config as UsbConfig};
use encoder_bridge_rp2040::{
    CdcLineTransport, GpioSampler, LineAssembler, LineChannel, OnboardLed, PollEngine, Transport,
    DEFAULT_INTERVAL_MS, READY_LINE,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// Period between poll-loop iterations.
///
/// A 100 PPR shaft turned briskly by hand produces edges a few hundred
/// microseconds apart at worst; polling at 250 us keeps the decoder inside
/// the single-step window with margin.
const POLL_PERIOD: Duration = Duration::from_micros(250);

/// Queue of complete inbound lines from the reader task.
static LINE_CHANNEL: StaticCell<LineChannel> = StaticCell::new();

/// USB device configuration buffers.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// CDC-ACM class state.
static CDC_STATE: StaticCell<State> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Encoder bridge starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let lines = LINE_CHANNEL.init(LineChannel::new());

    // --- Encoder pins ---
    let pin_a = Input::new(p.PIN_0, Pull::Up);
    let pin_b = Input::new(p.PIN_1, Pull::Up);
    let sampler = GpioSampler::new(pin_a, pin_b);

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(0x1209, 0x0002); // pid.codes test VID/PID
    usb_config.manufacturer = Some("Rust Encoder");
    usb_config.product = Some("Quadrature Encoder Bridge");
    usb_config.serial_number = Some("001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    // Configure the CDC-ACM serial class
    let cdc_state = CDC_STATE.init(State::new());
    let class = CdcAcmClass::new(&mut builder, cdc_state, 64);
    let (sender, receiver) = class.split();

    // Build the USB device
    let usb_device = builder.build();

    // On-board LED: three blinks to announce boot
    let mut led = OnboardLed::new(Output::new(p.PIN_25, Level::Low));
    led.startup_blink().await;

    let transport = CdcLineTransport::new(sender, lines);
    let engine = PollEngine::new(sampler, transport, led, DEFAULT_INTERVAL_MS);

    spawner.spawn(usb_task(usb_device)).unwrap();
    spawner.spawn(reader_task(receiver, lines)).unwrap();
    spawner.spawn(engine_task(engine)).unwrap();

    info!("Encoder bridge initialized, polling GP0/GP1...");
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Reader task - reassembles inbound lines and queues them for the engine.
#[embassy_executor::task]
async fn reader_task(
    mut receiver: Receiver<'static, Driver<'static, USB>>,
    lines: &'static LineChannel,
) {
    let mut packet = [0u8; 64];
    let mut assembler = LineAssembler::new();

    loop {
        receiver.wait_connection().await;
        info!("Host connected");

        loop {
            let n = match receiver.read_packet(&mut packet).await {
                Ok(n) => n,
                // Disconnected; drop any half-assembled line and wait for
                // the next connection.
                Err(_) => break,
            };
            for &byte in &packet[..n] {
                if let Some(line) = assembler.push(byte) {
                    // A full queue drops the newest line; commands are
                    // operator-driven and can simply be re-issued.
                    let _ = lines.try_send(line);
                }
            }
        }

        assembler = LineAssembler::new();
    }
}

/// Engine task - owns all encoder state and runs the poll loop forever.
#[embassy_executor::task]
async fn engine_task(mut engine: PollEngine<GpioSampler, CdcLineTransport, OnboardLed>) {
    // Boot announcement; dropped silently when no host is attached yet.
    let _ = engine.transport_mut().send(READY_LINE).await;

    loop {
        engine.step(Instant::now().as_millis()).await;
        Timer::after(POLL_PERIOD).await;
    }
}
