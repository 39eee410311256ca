//! Hardware adapters that bridge the real peripherals to the domain port traits.
//!
//! Each task gets its own adapter instance, so no adapter is shared across
//! cores except through [`StatusPanel`], which lives on the application
//! core only.  On non-espidf targets the underlying drivers use cfg-gated
//! simulation stubs.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

use crate::app::model::{PotReading, SensorReading};
use crate::app::ports::{AmbientLightPort, ButtonPort, IndicatorPort, PinLevel, PotentiometerPort};
use crate::app::status::StatusColour;
use crate::drivers::buzzer::Buzzer;
use crate::drivers::status_led::StatusLed;
#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;
use crate::sensors::{AmbientSensor, Potentiometer};

// ── Input ports ───────────────────────────────────────────────

impl AmbientLightPort for AmbientSensor {
    fn read_ambient(&mut self) -> SensorReading {
        self.read()
    }
}

impl PotentiometerPort for Potentiometer {
    fn read_pot(&mut self) -> PotReading {
        self.read()
    }
}

/// Simulated mode-button level.  `true` = pressed (pin LOW).
#[cfg(not(target_os = "espidf"))]
static SIM_MODE_PRESSED: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_mode_pressed(pressed: bool) {
    SIM_MODE_PRESSED.store(pressed, Ordering::Relaxed);
}

/// The polled mode push-button.
#[derive(Default)]
pub struct ModeButton;

impl ModeButton {
    pub fn new() -> Self {
        Self
    }
}

impl ButtonPort for ModeButton {
    #[cfg(target_os = "espidf")]
    fn level(&mut self) -> PinLevel {
        if hw_init::gpio_read(pins::MODE_BUTTON_GPIO) {
            PinLevel::High
        } else {
            PinLevel::Low
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn level(&mut self) -> PinLevel {
        if SIM_MODE_PRESSED.load(Ordering::Relaxed) {
            PinLevel::Low
        } else {
            PinLevel::High
        }
    }
}

// ── Output ports ──────────────────────────────────────────────

/// Status RGB LED plus alarm buzzer behind [`IndicatorPort`].
pub struct StatusPanel {
    led: StatusLed,
    buzzer: Buzzer,
}

impl StatusPanel {
    pub fn new(led: StatusLed, buzzer: Buzzer) -> Self {
        Self { led, buzzer }
    }

    pub fn colour(&self) -> Option<StatusColour> {
        self.led.current_colour()
    }

    pub fn buzzer_on(&self) -> bool {
        self.buzzer.is_on()
    }
}

impl Default for StatusPanel {
    fn default() -> Self {
        Self::new(StatusLed::new(), Buzzer::new())
    }
}

impl IndicatorPort for StatusPanel {
    fn show_colour(&mut self, colour: StatusColour) {
        self.led.set_colour(colour);
    }

    fn set_buzzer(&mut self, on: bool) {
        self.buzzer.set(on);
    }
}
