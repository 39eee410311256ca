//! End-to-end tests: the full task set on host threads against mocks.
//!
//! Each test leaks its own `SharedState` so the spawned threads can hold a
//! `'static` reference.  The threads never exit; they die with the test
//! process.

use std::time::Duration;

use crate::mock_hw::{
    MockAmbient, MockButton, MockIndicator, MockPin, MockPot, RecordingDisplay, RecordingEvents,
    SleepDelay, wait_until,
};
use autolight::adapters::time::SystemClock;
use autolight::app::events::AppEvent;
use autolight::app::model::OperatingMode;
use autolight::app::status::StatusColour;
use autolight::config::SystemConfig;
use autolight::shared::{QUEUE_DEPTH, SharedState};
use autolight::tasks::{SensingPorts, spawn_control, spawn_pwm, spawn_sensing};

struct Rig {
    shared: &'static SharedState,
    ambient: MockAmbient,
    pot: MockPot,
    button: MockButton,
    indicator: MockIndicator,
    display: RecordingDisplay,
    events: RecordingEvents,
    pin: MockPin,
}

fn start() -> Rig {
    let shared: &'static SharedState = Box::leak(Box::new(SharedState::new()));
    let cfg = SystemConfig::default();
    let rig = Rig {
        shared,
        ambient: MockAmbient::default(),
        pot: MockPot::default(),
        button: MockButton::default(),
        indicator: MockIndicator::default(),
        display: RecordingDisplay::default(),
        events: RecordingEvents::default(),
        pin: MockPin::default(),
    };

    spawn_pwm(shared, &cfg, rig.pin.clone(), SleepDelay).unwrap();
    spawn_control(shared, &cfg, rig.indicator.clone(), rig.events.clone()).unwrap();
    spawn_sensing(
        shared,
        &cfg,
        SensingPorts {
            ambient: rig.ambient.clone(),
            pot: rig.pot.clone(),
            button: rig.button.clone(),
            clock: SystemClock::new(),
            display: rig.display.clone(),
        },
        rig.events.clone(),
    )
    .unwrap();
    rig
}

const SETTLE: Duration = Duration::from_secs(3);

#[test]
fn auto_mode_tracks_ambient_light() {
    let rig = start();
    rig.ambient.set(4095, false);
    assert!(wait_until(SETTLE, || rig.shared.brightness.get() == 0));

    rig.ambient.set(4095, true);
    assert!(wait_until(SETTLE, || rig.shared.brightness.get() == 255));

    rig.ambient.set(2048, true);
    assert!(wait_until(SETTLE, || rig.shared.brightness.get() == 227));
    assert!(wait_until(SETTLE, || rig.indicator.colour() == Some(StatusColour::Green)));
    assert!(wait_until(SETTLE, || {
        rig.display.last_lines().get(2).map(String::as_str) == Some("Brightness: 227")
    }));
    assert!(wait_until(SETTLE, || rig.pin.rising_edges() > 0));
}

#[test]
fn mode_button_switches_to_pot_control() {
    let rig = start();
    rig.ambient.set(0, true);
    rig.pot.set(4095);
    assert!(wait_until(SETTLE, || rig.shared.brightness.get() == 200));

    rig.button.press();
    assert!(wait_until(SETTLE, || rig.shared.mode.get() == OperatingMode::Manual));
    rig.button.release();

    assert!(wait_until(SETTLE, || rig.shared.brightness.get() == 255));
    assert!(wait_until(SETTLE, || rig.indicator.colour() == Some(StatusColour::Blue)));
    assert_eq!(
        rig.events.count(|e| matches!(e, AppEvent::ModeChanged { .. })),
        1
    );
}

#[test]
fn emergency_latch_freezes_output_and_sounds_alarm() {
    let rig = start();
    rig.ambient.set(2048, true);
    assert!(wait_until(SETTLE, || rig.shared.brightness.get() == 227));

    rig.shared.emergency.trip();
    assert!(wait_until(SETTLE, || rig.indicator.buzzer()));

    // Vary every input; nothing may move the brightness again.
    for step in 0..10u16 {
        rig.ambient.set(step * 400, step % 2 == 1);
        rig.pot.set(4095 - step * 400);
        std::thread::sleep(Duration::from_millis(60));
        assert_eq!(rig.shared.brightness.get(), 227);
    }

    assert_eq!(rig.indicator.colour(), Some(StatusColour::Red));
    assert!(rig.indicator.buzzer());
    assert!(wait_until(SETTLE, || rig.shared.sensor_queue.len() == QUEUE_DEPTH));
    assert!(wait_until(SETTLE, || {
        rig.display.last_lines().get(1).map(String::as_str) == Some("Mode: STOP")
    }));
    assert_eq!(
        rig.events.count(|e| matches!(e, AppEvent::EmergencyLatched { brightness: 227 })),
        1
    );
}
