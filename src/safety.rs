//! Emergency stop latch and the forced safe state.
//!
//! ## Latch lifecycle
//!
//! 1. The emergency input's falling-edge ISR calls [`EmergencyLatch::trip`].
//! 2. Every controller cycle checks [`EmergencyLatch::is_tripped`] before
//!    touching the queues.  Once tripped, the controller forces the safe
//!    state instead of computing brightness.
//! 3. There is no reset.  The latch is fail-closed: only a reboot clears it.
//!
//! The flag is a single-writer, multi-reader monotonic boolean that crosses
//! from interrupt context into task context, so it is an atomic with
//! release/acquire ordering rather than a plain variable.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::app::ports::IndicatorPort;
use crate::app::status::StatusColour;

/// Latched emergency-stop flag.  `false → true` only.
pub struct EmergencyLatch {
    tripped: AtomicBool,
}

impl EmergencyLatch {
    pub const fn new() -> Self {
        Self {
            tripped: AtomicBool::new(false),
        }
    }

    /// Latch the emergency state.  Lock-free; safe to call from
    /// interrupt context.  Repeated calls are no-ops.
    pub fn trip(&self) {
        self.tripped.store(true, Ordering::Release);
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped.load(Ordering::Acquire)
    }
}

impl Default for EmergencyLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Drive the alarm outputs: red status LED and buzzer on.
///
/// Idempotent; the controller calls it every cycle while latched so that
/// nothing else can leave a different colour on the LED.
pub fn force_safe_state(indicator: &mut impl IndicatorPort) {
    indicator.show_colour(StatusColour::Red);
    indicator.set_buzzer(true);
}
