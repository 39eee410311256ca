//! System configuration parameters
//!
//! Task periods and timing constants for the AutoLight controller.  The
//! periods are part of the observable behaviour (sampling cadence), so the
//! defaults are the production values.  Settings are not persisted.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Acquisition ---
    /// Ambient light sampling period (milliseconds)
    pub sensor_period_ms: u32,
    /// Potentiometer sampling period (milliseconds)
    pub input_period_ms: u32,

    // --- Mode button ---
    /// Button poll period (milliseconds)
    pub mode_poll_ms: u32,
    /// Level must be stable for longer than this to count (milliseconds)
    pub debounce_ms: u32,
    /// Pause after an accepted press (milliseconds)
    pub mode_cooldown_ms: u32,

    // --- Control ---
    /// Controller cycle period (milliseconds)
    pub control_period_ms: u32,
    /// Wait budget for each queue receive inside a cycle (milliseconds)
    pub receive_budget_ms: u32,

    // --- Outputs ---
    /// Status indicator refresh period (milliseconds)
    pub status_period_ms: u32,
    /// Display refresh period (milliseconds)
    pub display_period_ms: u32,
    /// Soft PWM time per brightness step (microseconds)
    pub pwm_step_us: u32,
    /// Telemetry event interval (milliseconds)
    pub telemetry_interval_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Acquisition
            sensor_period_ms: 200,
            input_period_ms: 200,

            // Mode button
            mode_poll_ms: 20,
            debounce_ms: 50,
            mode_cooldown_ms: 300,

            // Control
            control_period_ms: 40,
            receive_budget_ms: 10,

            // Outputs
            status_period_ms: 150,
            display_period_ms: 200,
            pwm_step_us: 4, // 255 steps × 4 µs = 1020 µs ≈ 980 Hz
            telemetry_interval_ms: 5_000,
        }
    }
}

impl SystemConfig {
    /// Reject configurations the task set cannot run with.
    pub fn validate(&self) -> Result<(), Error> {
        let periods = [
            (self.sensor_period_ms, "sensor_period_ms must be > 0"),
            (self.input_period_ms, "input_period_ms must be > 0"),
            (self.mode_poll_ms, "mode_poll_ms must be > 0"),
            (self.control_period_ms, "control_period_ms must be > 0"),
            (self.status_period_ms, "status_period_ms must be > 0"),
            (self.display_period_ms, "display_period_ms must be > 0"),
            (self.pwm_step_us, "pwm_step_us must be > 0"),
        ];
        if let Some((_, msg)) = periods.iter().find(|(v, _)| *v == 0) {
            return Err(Error::Config(msg));
        }
        if self.receive_budget_ms >= self.control_period_ms {
            return Err(Error::Config(
                "receive_budget_ms must be shorter than control_period_ms",
            ));
        }
        if self.debounce_ms <= self.mode_poll_ms {
            return Err(Error::Config("debounce_ms must exceed mode_poll_ms"));
        }
        if self.telemetry_interval_ms < self.display_period_ms {
            return Err(Error::Config(
                "telemetry_interval_ms must be at least display_period_ms",
            ));
        }
        Ok(())
    }

    pub fn sensor_period(&self) -> Duration {
        ms(self.sensor_period_ms)
    }

    pub fn input_period(&self) -> Duration {
        ms(self.input_period_ms)
    }

    pub fn mode_poll(&self) -> Duration {
        ms(self.mode_poll_ms)
    }

    pub fn mode_cooldown(&self) -> Duration {
        ms(self.mode_cooldown_ms)
    }

    pub fn control_period(&self) -> Duration {
        ms(self.control_period_ms)
    }

    pub fn receive_budget(&self) -> Duration {
        ms(self.receive_budget_ms)
    }

    pub fn status_period(&self) -> Duration {
        ms(self.status_period_ms)
    }

    pub fn display_period(&self) -> Duration {
        ms(self.display_period_ms)
    }

    /// Number of display frames between telemetry events.
    pub fn telemetry_every_frames(&self) -> u32 {
        (self.telemetry_interval_ms / self.display_period_ms.max(1)).max(1)
    }
}

fn ms(value: u32) -> Duration {
    Duration::from_millis(u64::from(value))
}
