//! Mode button polling.
//!
//! Polls the raw button level and feeds it to the [`ModeSwitch`] debouncer.
//! An accepted press flips the shared mode, emits `ModeChanged` and sleeps
//! for the cooldown instead of the poll period.

use core::time::Duration;

use crate::app::events::AppEvent;
use crate::app::mode_switch::ModeSwitch;
use crate::app::ports::{ButtonPort, Clock, EventSink};
use crate::shared::SharedState;

#[derive(Debug, Clone, Copy)]
pub struct ModeTiming {
    pub poll: Duration,
    pub debounce_ms: u32,
    pub cooldown: Duration,
}

/// Poll once.  Returns `true` if the mode was toggled.
pub fn poll_mode<B, C, E>(
    shared: &SharedState,
    switch: &mut ModeSwitch,
    button: &mut B,
    clock: &C,
    events: &mut E,
) -> bool
where
    B: ButtonPort,
    C: Clock,
    E: EventSink,
{
    if !switch.poll(button.level(), clock.now_ms()) {
        return false;
    }
    let (from, to) = shared.mode.toggle();
    events.emit(&AppEvent::ModeChanged { from, to });
    true
}

pub async fn mode_task<B, C, E>(
    shared: &SharedState,
    mut button: B,
    clock: C,
    mut events: E,
    timing: ModeTiming,
) where
    B: ButtonPort,
    C: Clock,
    E: EventSink,
{
    let mut switch = ModeSwitch::new(timing.debounce_ms);
    loop {
        let delay = if poll_mode(shared, &mut switch, &mut button, &clock, &mut events) {
            timing.cooldown
        } else {
            timing.poll
        };
        async_io_mini::Timer::after(delay).await;
    }
}
