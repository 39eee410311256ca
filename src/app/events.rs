//! Outbound application events.
//!
//! Tasks emit these through the [`EventSink`](super::ports::EventSink)
//! port.  Adapters on the other side decide what to do with them; the
//! firmware only logs them.

use super::model::OperatingMode;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The task set is running (carries initial mode).
    Started(OperatingMode),

    /// A debounced press toggled the operating mode.
    ModeChanged {
        from: OperatingMode,
        to: OperatingMode,
    },

    /// The controller observed the emergency latch for the first time.
    /// `brightness` is the value frozen on the LED from now on.
    EmergencyLatched { brightness: u8 },

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryData {
    pub mode: OperatingMode,
    pub brightness: u8,
    pub last_ambient: u16,
    pub emergency: bool,
}
