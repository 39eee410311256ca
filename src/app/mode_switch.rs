//! Debounced mode button.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up, polled every 20 ms.  No
//! interrupt: bounce is filtered entirely in software.
//!
//! ## Debounce
//!
//! Two timers: any change of the raw level restarts the "last change"
//! timestamp, and a level is only trusted once it has been unchanged for
//! longer than the debounce window.  A stable LOW is a press.
//!
//! A press toggles once.  The switch then disarms until a stable HIGH
//! (release) is seen, so holding the button never repeats the toggle and
//! releasing it never toggles.

use super::ports::PinLevel;

const DEFAULT_DEBOUNCE_MS: u32 = 50;

#[derive(Debug, Clone)]
pub struct ModeSwitch {
    debounce_ms: u32,
    last_level: PinLevel,
    last_change_ms: u32,
    /// Cleared by an accepted press, set again by a stable release.
    armed: bool,
}

impl ModeSwitch {
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            debounce_ms,
            last_level: PinLevel::High,
            last_change_ms: 0,
            armed: true,
        }
    }

    /// Feed one raw sample.  Returns `true` when the sample completes a
    /// debounced press and the mode should toggle.
    pub fn poll(&mut self, level: PinLevel, now_ms: u32) -> bool {
        if level != self.last_level {
            self.last_change_ms = now_ms;
            self.last_level = level;
        }

        if now_ms.wrapping_sub(self.last_change_ms) <= self.debounce_ms {
            return false;
        }

        match level {
            PinLevel::Low if self.armed => {
                self.armed = false;
                true
            }
            PinLevel::Low => false,
            PinLevel::High => {
                self.armed = true;
                false
            }
        }
    }
}

impl Default for ModeSwitch {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}
