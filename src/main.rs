//! Serial Relay Firmware — Main Entry Point
//!
//! Reads one ASCII command per burst on UART0 and drives the relay on GPIO2.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                │
//! │                                                      │
//! │   EspUart          PinRelay         LogEventSink     │
//! │   (SerialPort)     (RelayPort)      (EventSink)      │
//! │                                                      │
//! │   ─────────────── Port Trait Boundary ───────────    │
//! │                                                      │
//! │   ┌──────────────────────────────────────────────┐   │
//! │   │        RelayService (pure logic)             │   │
//! │   │  poll · read · decode · drive · echo         │   │
//! │   └──────────────────────────────────────────────┘   │
//! └──────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::{Context, Result};
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, PinDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::uart::{UartDriver, config::Config as UartConfig};
use esp_idf_hal::units::Hertz;
use log::info;

use serial_relay::adapters::log_sink::LogEventSink;
use serial_relay::adapters::relay_pin::PinRelay;
use serial_relay::adapters::uart::EspUart;
use serial_relay::app::service::RelayService;
use serial_relay::config::RelayConfig;
use serial_relay::error::Error;
use serial_relay::pins;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  SerialRelay v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Config (compiled in) ───────────────────────────────
    let config = RelayConfig::default();
    config.validate().map_err(Error::from)?;

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take().map_err(|_| Error::Init("peripherals already taken"))?;
    let gpio = peripherals.pins;

    // GPIO43/44 are pins::UART_TX_GPIO / pins::UART_RX_GPIO. The console
    // lives on USB-Serial-JTAG (sdkconfig.defaults), so UART0 is ours alone.
    let uart_config = UartConfig::default().baudrate(Hertz(config.baud_rate));
    let uart = UartDriver::new(
        peripherals.uart0,
        gpio.gpio43,
        gpio.gpio44,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &uart_config,
    )
    .context("UART0 init failed")?;
    info!(
        "UART0 ready: {} baud, TX=GPIO{} RX=GPIO{}, timeout {} ms",
        config.baud_rate,
        pins::UART_TX_GPIO,
        pins::UART_RX_GPIO,
        config.read_timeout_ms
    );

    // GPIO2 is pins::RELAY_GPIO.
    let relay_pin = PinDriver::output(gpio.gpio2).context("relay GPIO init failed")?;
    info!("Relay on GPIO{} (active_low={})", pins::RELAY_GPIO, config.active_low);

    // ── 4. Adapters + service ─────────────────────────────────
    let mut serial = EspUart::new(uart);
    let mut relay = PinRelay::new(relay_pin, config.active_low);
    let mut log_sink = LogEventSink::new();
    let mut delay = FreeRtos;

    let mut app = RelayService::new(config);
    app.start(&mut relay, &mut log_sink);

    info!("System ready. Entering poll loop.");

    // ── 5. Poll loop (never returns) ──────────────────────────
    app.run(&mut serial, &mut relay, &mut log_sink, &mut delay)
}
