//! RGB status LED driver.
//!
//! Three plain GPIO outputs drive a common-cathode RGB LED.  Only fully
//! saturated colours are shown, so no PWM channel is spent on it.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the three pins via hw_init.
//! On host/test: the pin writes are no-ops; state is tracked in-memory.

use crate::app::status::StatusColour;
use crate::drivers::gpio::GpioOutput;
use crate::pins;

pub struct StatusLed {
    red: GpioOutput,
    green: GpioOutput,
    blue: GpioOutput,
    current: Option<StatusColour>,
}

impl StatusLed {
    pub fn new() -> Self {
        Self {
            red: GpioOutput::new(pins::STATUS_R_GPIO),
            green: GpioOutput::new(pins::STATUS_G_GPIO),
            blue: GpioOutput::new(pins::STATUS_B_GPIO),
            current: None,
        }
    }

    pub fn set_colour(&mut self, colour: StatusColour) {
        let (r, g, b) = colour.channels();
        self.red.write(r);
        self.green.write(g);
        self.blue.write(b);
        self.current = Some(colour);
    }

    pub fn current_colour(&self) -> Option<StatusColour> {
        self.current
    }
}

impl Default for StatusLed {
    fn default() -> Self {
        Self::new()
    }
}
