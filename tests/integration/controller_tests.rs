//! Integration tests for the controller against shared state and mock
//! indicator/event adapters.

use core::cell::RefCell;
use std::time::{Duration, Instant};

use futures_lite::future::block_on;

use crate::mock_hw::{MockIndicator, RecordingEvents};
use autolight::app::controller::{Controller, CycleOutcome};
use autolight::app::events::AppEvent;
use autolight::app::model::{PotReading, SensorReading};
use autolight::app::status::StatusColour;
use autolight::shared::{QUEUE_DEPTH, SharedState, offer};

const BUDGET: Duration = Duration::from_millis(10);

fn cycle(ctl: &mut Controller, shared: &SharedState, ind: &RefCell<MockIndicator>) -> CycleOutcome {
    let mut events = RecordingEvents::default();
    block_on(ctl.cycle(shared, ind, &mut events))
}

#[test]
fn daylight_and_darkness_at_full_scale() {
    let shared = SharedState::new();
    let ind = RefCell::new(MockIndicator::default());
    let mut ctl = Controller::new(BUDGET);

    offer(&shared.sensor_queue, SensorReading::new(4095, false));
    assert_eq!(cycle(&mut ctl, &shared, &ind), CycleOutcome::Updated(0));

    offer(&shared.sensor_queue, SensorReading::new(4095, true));
    assert_eq!(cycle(&mut ctl, &shared, &ind), CycleOutcome::Updated(255));
    assert_eq!(shared.brightness.get(), 255);
}

#[test]
fn empty_queues_hold_last_reading_within_budget() {
    let shared = SharedState::new();
    let ind = RefCell::new(MockIndicator::default());
    let mut ctl = Controller::new(BUDGET);

    offer(&shared.sensor_queue, SensorReading::new(2048, true));
    assert_eq!(cycle(&mut ctl, &shared, &ind), CycleOutcome::Updated(227));

    let start = Instant::now();
    assert_eq!(cycle(&mut ctl, &shared, &ind), CycleOutcome::Updated(227));
    let took = start.elapsed();
    // Two 10 ms receive budgets, generous upper bound for CI jitter.
    assert!(took >= Duration::from_millis(20), "took {took:?}");
    assert!(took < Duration::from_millis(500), "took {took:?}");
}

#[test]
fn latch_freezes_brightness_against_new_input() {
    let shared = SharedState::new();
    let indicator = MockIndicator::default();
    let ind = RefCell::new(indicator.clone());
    let mut ctl = Controller::new(BUDGET);
    let mut events = RecordingEvents::default();

    offer(&shared.sensor_queue, SensorReading::new(2048, true));
    block_on(ctl.cycle(&shared, &ind, &mut events));
    let frozen = shared.brightness.get();
    assert_eq!(frozen, 227);

    shared.emergency.trip();

    for i in 0..10u16 {
        offer(&shared.sensor_queue, SensorReading::new(i * 400, i % 2 == 0));
        offer(&shared.pot_queue, PotReading::new(4095 - i * 400));
        if i == 5 {
            shared.mode.toggle();
        }
        assert_eq!(block_on(ctl.cycle(&shared, &ind, &mut events)), CycleOutcome::Alarm);
        assert_eq!(shared.brightness.get(), frozen);
        assert_eq!(indicator.colour(), Some(StatusColour::Red));
        assert!(indicator.buzzer());
    }

    assert_eq!(shared.sensor_queue.len(), QUEUE_DEPTH);
    assert_eq!(
        events.count(|e| matches!(e, AppEvent::EmergencyLatched { .. })),
        1
    );
}

#[test]
fn manual_mode_follows_pot() {
    let shared = SharedState::new();
    shared.mode.toggle();
    let ind = RefCell::new(MockIndicator::default());
    let mut ctl = Controller::new(BUDGET);

    for (raw, expected) in [(0, 0), (1000, 62), (4095, 255)] {
        offer(&shared.pot_queue, PotReading::new(raw));
        offer(&shared.sensor_queue, SensorReading::new(0, false));
        assert_eq!(cycle(&mut ctl, &shared, &ind), CycleOutcome::Updated(expected));
    }
}

#[test]
fn latch_during_receive_wait_blocks_publish() {
    let shared = SharedState::new();
    let indicator = MockIndicator::default();
    let ind = RefCell::new(indicator.clone());
    let mut ctl = Controller::new(BUDGET);
    let mut events = RecordingEvents::default();

    offer(&shared.sensor_queue, SensorReading::new(2048, true));
    assert_eq!(cycle(&mut ctl, &shared, &ind), CycleOutcome::Updated(227));

    let outcome = std::thread::scope(|s| {
        s.spawn(|| {
            std::thread::sleep(Duration::from_millis(3));
            shared.emergency.trip();
            offer(&shared.sensor_queue, SensorReading::new(0, false));
        });
        block_on(ctl.cycle(&shared, &ind, &mut events))
    });

    assert!(shared.emergency.is_tripped());
    assert_eq!(outcome, CycleOutcome::Alarm);
    assert_eq!(shared.brightness.get(), 227);
    assert_eq!(indicator.colour(), Some(StatusColour::Red));
    assert!(indicator.buzzer());
    assert_eq!(
        events.count(|e| matches!(e, AppEvent::EmergencyLatched { brightness: 227 })),
        1
    );
}
