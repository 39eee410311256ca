//! LDR ambient light module (analog output + comparator output).
//!
//! The module exposes the raw divider voltage on AO and a thresholded
//! digital signal on DO.  DO is pulled LOW by the on-board comparator when
//! the scene is darker than the trim-pot setting.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC2_CH1 via the oneshot API and the DO pin via
//! `gpio_get_level` (both initialised by hw_init).
//! On host/test: reads from static atomics for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

use crate::app::model::SensorReading;
#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(not(target_os = "espidf"))]
static SIM_AMBIENT_ADC: AtomicU16 = AtomicU16::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_AMBIENT_DARK: AtomicBool = AtomicBool::new(false);

/// Inject the next simulated reading.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_ambient(raw: u16, dark: bool) {
    SIM_AMBIENT_ADC.store(raw, Ordering::Relaxed);
    SIM_AMBIENT_DARK.store(dark, Ordering::Relaxed);
}

#[derive(Default)]
pub struct AmbientSensor;

impl AmbientSensor {
    pub fn new() -> Self {
        Self
    }

    pub fn read(&mut self) -> SensorReading {
        SensorReading::new(self.read_adc(), self.read_dark())
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc_read(pins::LDR_ADC_UNIT, pins::LDR_ADC_CHANNEL)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_AMBIENT_ADC.load(Ordering::Relaxed)
    }

    /// Comparator LOW = dark.
    #[cfg(target_os = "espidf")]
    fn read_dark(&self) -> bool {
        !hw_init::gpio_read(pins::LDR_DO_GPIO)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_dark(&self) -> bool {
        SIM_AMBIENT_DARK.load(Ordering::Relaxed)
    }
}
