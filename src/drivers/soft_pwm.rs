//! Bit-banged PWM for the main LED.
//!
//! One period is `255 * step` µs (1020 µs at the default 4 µs step, just
//! under 1 kHz).  Brightness `b` holds the pin HIGH for `b * step` µs and
//! LOW for the rest of the period.  The level is re-read from the shared
//! cell at the start of every period, so a new brightness takes effect
//! within one period.
//!
//! A zero-length phase is skipped rather than toggled, so brightness 0 is a
//! constant LOW and 255 a constant HIGH with no one-cycle glitch.
//!
//! The generator busy-waits.  It runs in its own lowest-priority thread on
//! the application core; the control and status executor preempts it.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::shared::BrightnessCell;

/// Full-scale brightness.
pub const MAX_LEVEL: u32 = 255;

/// Default step per brightness unit.
pub const DEFAULT_STEP_US: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTiming {
    pub high_us: u32,
    pub low_us: u32,
}

impl PulseTiming {
    pub const fn period_us(&self) -> u32 {
        self.high_us + self.low_us
    }
}

pub const fn pulse_timing(brightness: u8, step_us: u32) -> PulseTiming {
    let b = brightness as u32;
    PulseTiming {
        high_us: b * step_us,
        low_us: (MAX_LEVEL - b) * step_us,
    }
}

pub struct SoftPwm<P, D> {
    pin: P,
    delay: D,
    step_us: u32,
}

impl<P: OutputPin, D: DelayNs> SoftPwm<P, D> {
    pub fn new(pin: P, delay: D, step_us: u32) -> Self {
        Self { pin, delay, step_us }
    }

    /// Emit one full period at `brightness`.
    pub fn emit_period(&mut self, brightness: u8) -> Result<(), P::Error> {
        let timing = pulse_timing(brightness, self.step_us);
        if timing.high_us > 0 {
            self.pin.set_high()?;
            self.delay.delay_us(timing.high_us);
        }
        if timing.low_us > 0 {
            self.pin.set_low()?;
            self.delay.delay_us(timing.low_us);
        }
        Ok(())
    }

    /// Generate pulses forever from the shared brightness.  Returns only
    /// if the pin reports an error.
    pub fn run(&mut self, level: &BrightnessCell) -> Result<Infallible, P::Error> {
        loop {
            self.emit_period(level.get())?;
        }
    }
}
