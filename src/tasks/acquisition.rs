//! Sensor and potentiometer acquisition loops.
//!
//! Both sample on a fixed period and offer the reading to their queue
//! without waiting.  A full queue drops the reading.

use core::time::Duration;

use log::trace;

use crate::app::ports::{AmbientLightPort, PotentiometerPort};
use crate::shared::{PotQueue, SensorQueue, SharedState, offer};

/// Take one ambient sample and offer it.  Returns `false` if it was dropped.
pub fn sample_ambient<A: AmbientLightPort>(sensor: &mut A, queue: &SensorQueue) -> bool {
    let reading = sensor.read_ambient();
    let queued = offer(queue, reading);
    if !queued {
        trace!("sensor: queue full, dropped {}", reading.magnitude);
    }
    queued
}

/// Take one potentiometer sample and offer it.  Returns `false` if it was dropped.
pub fn sample_pot<P: PotentiometerPort>(pot: &mut P, queue: &PotQueue) -> bool {
    let reading = pot.read_pot();
    let queued = offer(queue, reading);
    if !queued {
        trace!("input: queue full, dropped {}", reading.position);
    }
    queued
}

pub async fn sensor_task<A: AmbientLightPort>(shared: &SharedState, mut sensor: A, period: Duration) {
    loop {
        sample_ambient(&mut sensor, &shared.sensor_queue);
        async_io_mini::Timer::after(period).await;
    }
}

pub async fn input_task<P: PotentiometerPort>(shared: &SharedState, mut pot: P, period: Duration) {
    loop {
        sample_pot(&mut pot, &shared.pot_queue);
        async_io_mini::Timer::after(period).await;
    }
}
