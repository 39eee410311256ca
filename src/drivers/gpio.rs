//! Push-pull output pin over the raw `gpio_set_level` call.
//!
//! Implements [`embedded_hal::digital::OutputPin`] so drivers that take a
//! generic pin (the soft PWM generator) run unchanged against test mocks.
//! The pin must already be configured as an output by
//! [`hw_init::init_peripherals`](super::hw_init::init_peripherals).

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

use super::hw_init;

#[derive(Debug)]
pub struct GpioOutput {
    gpio: i32,
}

impl GpioOutput {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    /// Drive HIGH when `high`, LOW otherwise.
    pub fn write(&mut self, high: bool) {
        hw_init::gpio_write(self.gpio, high);
    }
}

impl ErrorType for GpioOutput {
    type Error = Infallible;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true);
        Ok(())
    }
}
