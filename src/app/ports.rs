//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ tasks / Controller (domain)
//! ```
//!
//! Hardware adapters in [`crate::adapters`] implement these on target; the
//! integration tests implement them with recording mocks.  Every task owns
//! its ports exclusively, except the indicator which the control and status
//! tasks share on the same executor.

use super::display::DisplayFrame;
use super::events::AppEvent;
use super::model::{PotReading, SensorReading};
use super::status::StatusColour;

// ───────────────────────────────────────────────────────────────
// Input ports (hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Ambient light sensor: analog magnitude plus comparator output.
pub trait AmbientLightPort {
    fn read_ambient(&mut self) -> SensorReading;
}

/// Manual brightness potentiometer.
pub trait PotentiometerPort {
    fn read_pot(&mut self) -> PotReading;
}

/// Raw electrical level of a digital input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinLevel {
    High,
    Low,
}

/// Mode push-button (active-low, pulled up).  Returns the raw,
/// undebounced level.
pub trait ButtonPort {
    fn level(&mut self) -> PinLevel;
}

/// Monotonic millisecond clock.  Wraps at `u32::MAX`; consumers use
/// wrapping arithmetic.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Output ports (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Status RGB LED and alarm buzzer.
pub trait IndicatorPort {
    fn show_colour(&mut self, colour: StatusColour);

    fn set_buzzer(&mut self, on: bool);
}

/// External status display.  Receives a fully rendered frame; must not
/// block for longer than one refresh period.
pub trait DisplaySink {
    fn show(&mut self, frame: &DisplayFrame);
}

/// The domain emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
