//! Fuzz target: `ModeSwitch::poll`
//!
//! Feeds an arbitrary stream of (level, elapsed) samples and checks that
//! two toggles are always separated by a stable release, and that every
//! toggle follows more than the debounce window of continuous LOW.
//!
//! cargo fuzz run fuzz_mode_switch

#![no_main]

use autolight::app::mode_switch::ModeSwitch;
use autolight::app::ports::PinLevel;
use libfuzzer_sys::fuzz_target;

const DEBOUNCE_MS: u32 = 50;

fuzz_target!(|data: &[u8]| {
    let mut sw = ModeSwitch::new(DEBOUNCE_MS);
    let mut now: u32 = 0;
    let mut low_since: Option<u32> = None;
    let mut high_since: Option<u32> = Some(0);
    let mut released_since_toggle = true;

    for &byte in data {
        // Top bit: level.  Low bits: elapsed ms since the previous sample.
        let low = byte & 0x80 != 0;
        now = now.wrapping_add(u32::from(byte & 0x7f));
        let level = if low { PinLevel::Low } else { PinLevel::High };

        if low {
            low_since.get_or_insert(now);
            high_since = None;
        } else {
            high_since.get_or_insert(now);
            low_since = None;
        }
        if let Some(since) = high_since {
            if now.wrapping_sub(since) > DEBOUNCE_MS {
                released_since_toggle = true;
            }
        }

        if sw.poll(level, now) {
            let held = low_since.map(|s| now.wrapping_sub(s));
            assert!(held.is_some_and(|h| h > DEBOUNCE_MS), "toggle without a debounced press");
            assert!(released_since_toggle, "second toggle without a release");
            released_since_toggle = false;
        }
    }
});
