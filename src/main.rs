//! AutoLight firmware: main entry point
//!
//! Hexagonal architecture with a fixed, core-pinned task set.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  AmbientSensor  Potentiometer  ModeButton   StatusPanel        │
//! │  (AmbientLight) (Potentiometer)(Button)     (Indicator)        │
//! │  LogDisplay     LogEventSink   SystemClock  GpioOutput + Ets   │
//! │  (DisplaySink)  (EventSink)    (Clock)      (soft PWM)         │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │  Controller · ModeSwitch · mapping (pure logic)        │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  SharedState: queues · brightness mutex · mode · e-stop latch  │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::{error, info};

use autolight::adapters::display::LogDisplay;
use autolight::adapters::hardware::{ModeButton, StatusPanel};
use autolight::adapters::log_sink::LogEventSink;
use autolight::adapters::time::SystemClock;
use autolight::app::events::AppEvent;
use autolight::app::ports::EventSink;
use autolight::config::SystemConfig;
use autolight::diagnostics::{self, HeapStats};
use autolight::drivers::gpio::GpioOutput;
use autolight::drivers::hw_init;
use autolight::pins;
use autolight::sensors::{AmbientSensor, Potentiometer};
use autolight::shared::SharedState;
use autolight::tasks::{self, SensingPorts};

/// Every cross-task cell, initialised before any task starts.
static SHARED: SharedState = SharedState::new();

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  AutoLight v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate().context("built-in configuration rejected")?;
    info!(
        "Config: {}",
        serde_json::to_string(&config).context("config serialisation")?
    );

    // ── 3. Hardware bring-up ──────────────────────────────────
    if let Err(e) = bring_up_hardware().context("hardware bring-up") {
        // The lamp must not run without its peripherals or the emergency
        // interrupt.  The task watchdog resets the chip after its timeout.
        error!("{:#}; halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    HeapStats::collect().log();

    // ── 4. Spawn the task set ─────────────────────────────────
    let events = LogEventSink::new();

    let pwm = tasks::spawn_pwm(
        &SHARED,
        &config,
        GpioOutput::new(pins::LED_PWM_GPIO),
        esp_idf_hal::delay::Ets,
    )?;
    let control = tasks::spawn_control(&SHARED, &config, StatusPanel::default(), events)?;
    let sensing = tasks::spawn_sensing(
        &SHARED,
        &config,
        SensingPorts {
            ambient: AmbientSensor::new(),
            pot: Potentiometer::new(),
            button: ModeButton::new(),
            clock: SystemClock::new(),
            display: LogDisplay::new(),
        },
        events,
    )?;

    LogEventSink::new().emit(&AppEvent::Started(SHARED.mode.get()));
    info!("System ready.");

    // ── 5. Park ───────────────────────────────────────────────
    // No task returns in normal operation.
    for handle in [sensing, control, pwm] {
        let name = handle.thread().name().unwrap_or("?").to_owned();
        if handle.join().is_err() {
            error!("task '{}' panicked", name);
        }
    }
    Ok(())
}

/// Peripherals, then the panic hook (which drives the status outputs), then
/// the emergency interrupt.
fn bring_up_hardware() -> autolight::error::Result<()> {
    hw_init::init_peripherals()?;
    diagnostics::install_panic_handler(&SHARED.emergency, StatusPanel::default());
    hw_init::init_isr_service(&SHARED.emergency)?;
    Ok(())
}
