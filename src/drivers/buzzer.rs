//! Active buzzer on a single GPIO (HIGH = sounding).

use crate::drivers::gpio::GpioOutput;
use crate::pins;

pub struct Buzzer {
    pin: GpioOutput,
    on: bool,
}

impl Buzzer {
    pub fn new() -> Self {
        Self {
            pin: GpioOutput::new(pins::BUZZER_GPIO),
            on: false,
        }
    }

    pub fn set(&mut self, on: bool) {
        self.pin.write(on);
        self.on = on;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

impl Default for Buzzer {
    fn default() -> Self {
        Self::new()
    }
}
