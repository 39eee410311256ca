//! Integration tests for the individual task loops and their one-shot
//! step functions.

use core::cell::RefCell;
use std::time::{Duration, Instant};

use futures_lite::future;

use crate::mock_hw::{
    ManualClock, MockAmbient, MockButton, MockIndicator, MockPot, RecordingDisplay,
    RecordingEvents,
};
use autolight::app::events::AppEvent;
use autolight::app::mode_switch::ModeSwitch;
use autolight::app::model::{OperatingMode, SensorReading};
use autolight::app::status::StatusColour;
use autolight::shared::{QUEUE_DEPTH, SharedState};
use autolight::tasks::acquisition::{input_task, sample_ambient, sensor_task};
use autolight::tasks::display::DisplayRefresh;
use autolight::adapters::time::SystemClock;
use autolight::app::ports::{ButtonPort, PinLevel};
use autolight::tasks::mode::{ModeTiming, mode_task, poll_mode};
use autolight::tasks::status::{refresh_status, status_task};

/// Drive `fut` for `d`, then drop it.
fn run_for<F: core::future::Future<Output = ()>>(fut: F, d: Duration) {
    future::block_on(future::or(fut, async {
        async_io_mini::Timer::after(d).await;
    }));
}

// ── Acquisition ───────────────────────────────────────────────

#[test]
fn sensor_task_samples_each_period() {
    let shared = SharedState::new();
    let ambient = MockAmbient::default();
    ambient.set(1234, true);

    run_for(
        sensor_task(&shared, ambient, Duration::from_millis(200)),
        Duration::from_millis(700),
    );

    // Samples at ~0, 200, 400, 600 ms.
    let n = shared.sensor_queue.len();
    assert!((3..=5).contains(&n), "got {n} samples");
    assert_eq!(
        shared.sensor_queue.try_receive().ok(),
        Some(SensorReading::new(1234, true))
    );
}

#[test]
fn input_task_never_blocks_on_full_queue() {
    let shared = SharedState::new();
    let pot = MockPot::default();
    pot.set(10);

    run_for(
        input_task(&shared, pot, Duration::from_millis(1)),
        Duration::from_millis(200),
    );

    assert_eq!(shared.pot_queue.len(), QUEUE_DEPTH);
}

#[test]
fn eleven_pushes_keep_first_ten() {
    let shared = SharedState::new();
    let ambient = MockAmbient::default();
    let mut handle = ambient.clone();

    let mut accepted = 0;
    for i in 0..=QUEUE_DEPTH as u16 {
        ambient.set(i, false);
        if sample_ambient(&mut handle, &shared.sensor_queue) {
            accepted += 1;
        }
    }
    assert_eq!(accepted, QUEUE_DEPTH);

    let drained: Vec<u16> = std::iter::from_fn(|| shared.sensor_queue.try_receive().ok())
        .map(|r| r.magnitude)
        .collect();
    assert_eq!(drained, (0..QUEUE_DEPTH as u16).collect::<Vec<_>>());
}

// ── Mode switch ───────────────────────────────────────────────

#[test]
fn press_toggles_once_and_reports_transition() {
    let shared = SharedState::new();
    let mut switch = ModeSwitch::new(50);
    let button = MockButton::default();
    let mut port = button.clone();
    let clock = ManualClock::default();
    let mut events = RecordingEvents::default();

    let mut toggles = 0;
    button.press();
    for t in (100..=600).step_by(20) {
        clock.set(t);
        if poll_mode(&shared, &mut switch, &mut port, &clock, &mut events) {
            toggles += 1;
        }
    }
    assert_eq!(toggles, 1);
    assert_eq!(shared.mode.get(), OperatingMode::Manual);
    assert_eq!(
        events.events(),
        vec![AppEvent::ModeChanged {
            from: OperatingMode::Auto,
            to: OperatingMode::Manual,
        }]
    );
}

#[test]
fn bounce_shorter_than_debounce_is_ignored() {
    let shared = SharedState::new();
    let mut switch = ModeSwitch::new(50);
    let button = MockButton::default();
    let mut port = button.clone();
    let clock = ManualClock::default();
    let mut events = RecordingEvents::default();

    for (i, t) in (100..400).step_by(20).enumerate() {
        if i % 2 == 0 {
            button.press();
        } else {
            button.release();
        }
        clock.set(t);
        assert!(!poll_mode(&shared, &mut switch, &mut port, &clock, &mut events));
    }
    assert_eq!(shared.mode.get(), OperatingMode::Auto);
}

/// Held-down button that records when it was polled and the mode seen.
struct HeldButton<'a> {
    shared: &'a SharedState,
    polls: &'a RefCell<Vec<(Instant, OperatingMode)>>,
}

impl ButtonPort for HeldButton<'_> {
    fn level(&mut self) -> PinLevel {
        self.polls
            .borrow_mut()
            .push((Instant::now(), self.shared.mode.get()));
        PinLevel::Low
    }
}

#[test]
fn accepted_press_pauses_polling_for_cooldown() {
    let shared = SharedState::new();
    let polls = RefCell::new(Vec::new());
    let button = HeldButton { shared: &shared, polls: &polls };
    let events = RecordingEvents::default();
    let timing = ModeTiming {
        poll: Duration::from_millis(20),
        debounce_ms: 50,
        cooldown: Duration::from_millis(300),
    };

    run_for(
        mode_task(&shared, button, SystemClock::new(), events.clone(), timing),
        Duration::from_millis(600),
    );

    assert_eq!(shared.mode.get(), OperatingMode::Manual);
    assert_eq!(events.count(|e| matches!(e, AppEvent::ModeChanged { .. })), 1);

    let polls = polls.into_inner();
    let first_manual = polls
        .iter()
        .position(|&(_, mode)| mode == OperatingMode::Manual)
        .expect("no poll after the toggle");
    assert!(first_manual >= 3, "toggled after {first_manual} polls");

    let gaps: Vec<Duration> = polls.windows(2).map(|w| w[1].0 - w[0].0).collect();
    for gap in &gaps[..first_manual - 1] {
        assert!(*gap < Duration::from_millis(150), "poll gap {gap:?} before toggle");
    }
    let cooldown = gaps[first_manual - 1];
    assert!(cooldown >= Duration::from_millis(290), "cooldown {cooldown:?}");
    assert!(cooldown < Duration::from_millis(500), "cooldown {cooldown:?}");
}

// ── Status ────────────────────────────────────────────────────

#[test]
fn status_follows_mode_until_latched() {
    let shared = SharedState::new();
    let mut ind = MockIndicator::default();

    assert!(refresh_status(&shared, &mut ind));
    assert_eq!(ind.colour(), Some(StatusColour::Green));

    shared.mode.toggle();
    refresh_status(&shared, &mut ind);
    assert_eq!(ind.colour(), Some(StatusColour::Blue));

    shared.emergency.trip();
    assert!(!refresh_status(&shared, &mut ind));
    assert_eq!(ind.colour_writes(), 2);
}

#[test]
fn status_task_refreshes_periodically() {
    let shared = SharedState::new();
    let indicator = MockIndicator::default();
    let cell = RefCell::new(indicator.clone());

    run_for(
        status_task(&shared, &cell, Duration::from_millis(150)),
        Duration::from_millis(400),
    );

    let writes = indicator.colour_writes();
    assert!((2..=4).contains(&writes), "got {writes} writes");
    assert_eq!(indicator.colour(), Some(StatusColour::Green));
}

// ── Display ───────────────────────────────────────────────────

#[test]
fn display_renders_snapshot_and_emits_telemetry() {
    let shared = SharedState::new();
    shared.brightness.publish(|| Some(128));
    shared.set_last_ambient(2048);

    let display = RecordingDisplay::default();
    let mut sink = display.clone();
    let events = RecordingEvents::default();
    let mut ev = events.clone();
    let mut refresh = DisplayRefresh::new(3);

    for _ in 0..6 {
        refresh.refresh(&shared, &mut sink, &mut ev);
    }

    assert_eq!(display.frames().len(), 6);
    assert_eq!(
        display.last_lines(),
        ["Auto Light System", "Mode: AUTO", "Brightness: 128", "LDR (AO): 2048"]
    );
    assert_eq!(events.count(|e| matches!(e, AppEvent::Telemetry(_))), 2);
}

#[test]
fn display_shows_stop_when_latched() {
    let shared = SharedState::new();
    shared.emergency.trip();
    let display = RecordingDisplay::default();
    let mut sink = display.clone();
    let mut refresh = DisplayRefresh::new(100);
    refresh.refresh(&shared, &mut sink, &mut RecordingEvents::default());
    assert_eq!(display.last_lines()[1], "Mode: STOP");
}
