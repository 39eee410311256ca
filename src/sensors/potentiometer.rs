//! Manual brightness potentiometer (wiper on ADC1_CH1).
//!
//! On host/test the wiper position comes from a static atomic.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

use crate::app::model::PotReading;
#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(not(target_os = "espidf"))]
static SIM_POT_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_pot(raw: u16) {
    SIM_POT_ADC.store(raw, Ordering::Relaxed);
}

#[derive(Default)]
pub struct Potentiometer;

impl Potentiometer {
    pub fn new() -> Self {
        Self
    }

    #[cfg(target_os = "espidf")]
    pub fn read(&mut self) -> PotReading {
        PotReading::new(hw_init::adc_read(pins::POT_ADC_UNIT, pins::POT_ADC_CHANNEL))
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read(&mut self) -> PotReading {
        PotReading::new(SIM_POT_ADC.load(Ordering::Relaxed))
    }
}
