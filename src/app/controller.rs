//! Brightness controller: the decision core.
//!
//! One [`Controller::cycle`] per control period (40 ms):
//!
//! 1. Emergency latched → force the safe state and stop.  The queues are
//!    not drained, so they fill to capacity and further readings drop.
//! 2. Receive one ambient and one potentiometer reading, each with a short
//!    wait budget.  A timed-out receive keeps the last reading received
//!    from that queue (zero before the first one).
//! 3. Publish the ambient magnitude for the display.
//! 4. Compute the target for the current mode and store it in the shared
//!    brightness cell in one lock window.  The latch is checked again
//!    inside that window, since it may trip during the receive waits; a
//!    tripped latch leaves the cell untouched and the cycle becomes an
//!    alarm cycle.

use core::cell::RefCell;
use core::time::Duration;

use log::{debug, error};

use super::events::AppEvent;
use super::mapping::target_brightness;
use super::model::{PotReading, SensorReading};
use super::ports::{EventSink, IndicatorPort};
use crate::safety::force_safe_state;
use crate::shared::{SharedState, receive_within};

/// What one control cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Emergency latched; alarm outputs forced, brightness untouched.
    Alarm,
    /// Brightness written.
    Updated(u8),
}

pub struct Controller {
    receive_budget: Duration,
    last_sensor: SensorReading,
    last_pot: PotReading,
    /// Set on the first latched cycle so the latch is reported once.
    alarm_reported: bool,
}

impl Controller {
    pub fn new(receive_budget: Duration) -> Self {
        Self {
            receive_budget,
            last_sensor: SensorReading::default(),
            last_pot: PotReading::default(),
            alarm_reported: false,
        }
    }

    /// Run one control cycle.
    ///
    /// The indicator is shared with the status task on the same executor;
    /// it is only borrowed in the emergency branch, which never awaits.
    pub async fn cycle<I, E>(
        &mut self,
        shared: &SharedState,
        indicator: &RefCell<I>,
        events: &mut E,
    ) -> CycleOutcome
    where
        I: IndicatorPort,
        E: EventSink,
    {
        if shared.emergency.is_tripped() {
            self.hold_alarm(shared, &mut *indicator.borrow_mut(), events);
            return CycleOutcome::Alarm;
        }

        let sensor = receive_within(&shared.sensor_queue, self.receive_budget).await;
        let pot = receive_within(&shared.pot_queue, self.receive_budget).await;

        match self.apply(shared, sensor, pot) {
            Some(level) => CycleOutcome::Updated(level),
            None => {
                self.hold_alarm(shared, &mut *indicator.borrow_mut(), events);
                CycleOutcome::Alarm
            }
        }
    }

    /// Fold fresh readings into the held ones and publish a new brightness.
    ///
    /// Returns `None` without touching the brightness if the emergency latch
    /// is set when the lock is taken.
    pub fn apply(
        &mut self,
        shared: &SharedState,
        sensor: Option<SensorReading>,
        pot: Option<PotReading>,
    ) -> Option<u8> {
        if let Some(reading) = sensor {
            self.last_sensor = reading;
        }
        if let Some(reading) = pot {
            self.last_pot = reading;
        }

        shared.set_last_ambient(self.last_sensor.magnitude);

        let (sensor, pot) = (self.last_sensor, self.last_pot);
        let mode = shared.mode.get();
        let level = shared.brightness.publish(|| {
            (!shared.emergency.is_tripped()).then(|| target_brightness(mode, sensor, pot))
        })?;
        debug!(
            "control: mode={} ambient={} dark={} pot={} -> {}",
            mode,
            sensor.magnitude,
            sensor.below_threshold,
            pot.position,
            level
        );
        Some(level)
    }

    fn hold_alarm<I, E>(&mut self, shared: &SharedState, indicator: &mut I, events: &mut E)
    where
        I: IndicatorPort,
        E: EventSink,
    {
        force_safe_state(indicator);
        if !self.alarm_reported {
            self.alarm_reported = true;
            let brightness = shared.brightness.get();
            error!("EMERGENCY STOP latched, brightness frozen at {}", brightness);
            events.emit(&AppEvent::EmergencyLatched { brightness });
        }
    }
}
