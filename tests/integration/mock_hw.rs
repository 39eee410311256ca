//! Mock hardware adapters for integration tests.
//!
//! Every mock is a cheap handle over `Arc` state, so a test keeps one
//! clone to drive inputs or inspect outputs while the other clone is moved
//! into a task thread.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use autolight::app::display::DisplayFrame;
use autolight::app::events::AppEvent;
use autolight::app::model::{PotReading, SensorReading};
use autolight::app::ports::{
    AmbientLightPort, ButtonPort, Clock, DisplaySink, EventSink, IndicatorPort, PinLevel,
    PotentiometerPort,
};
use autolight::app::status::StatusColour;
use core::convert::Infallible;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

// ── Inputs ────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockAmbient(Arc<Mutex<SensorReading>>);

#[allow(dead_code)]
impl MockAmbient {
    pub fn set(&self, magnitude: u16, dark: bool) {
        *self.0.lock().unwrap() = SensorReading::new(magnitude, dark);
    }
}

impl AmbientLightPort for MockAmbient {
    fn read_ambient(&mut self) -> SensorReading {
        *self.0.lock().unwrap()
    }
}

#[derive(Clone, Default)]
pub struct MockPot(Arc<Mutex<PotReading>>);

#[allow(dead_code)]
impl MockPot {
    pub fn set(&self, position: u16) {
        *self.0.lock().unwrap() = PotReading::new(position);
    }
}

impl PotentiometerPort for MockPot {
    fn read_pot(&mut self) -> PotReading {
        *self.0.lock().unwrap()
    }
}

/// Mode button; `pressed` drives the pin LOW.
#[derive(Clone, Default)]
pub struct MockButton(Arc<AtomicBool>);

#[allow(dead_code)]
impl MockButton {
    pub fn press(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn release(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

impl ButtonPort for MockButton {
    fn level(&mut self) -> PinLevel {
        if self.0.load(Ordering::Relaxed) {
            PinLevel::Low
        } else {
            PinLevel::High
        }
    }
}

/// Manually advanced millisecond clock.
#[derive(Clone, Default)]
pub struct ManualClock(Arc<AtomicU32>);

#[allow(dead_code)]
impl ManualClock {
    pub fn set(&self, ms: u32) {
        self.0.store(ms, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }
}

// ── Outputs ───────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct IndicatorState {
    pub colour: Option<StatusColour>,
    pub buzzer: bool,
    pub colour_writes: usize,
}

#[derive(Clone, Default)]
pub struct MockIndicator(Arc<Mutex<IndicatorState>>);

#[allow(dead_code)]
impl MockIndicator {
    pub fn colour(&self) -> Option<StatusColour> {
        self.0.lock().unwrap().colour
    }

    pub fn buzzer(&self) -> bool {
        self.0.lock().unwrap().buzzer
    }

    pub fn colour_writes(&self) -> usize {
        self.0.lock().unwrap().colour_writes
    }
}

impl IndicatorPort for MockIndicator {
    fn show_colour(&mut self, colour: StatusColour) {
        let mut s = self.0.lock().unwrap();
        s.colour = Some(colour);
        s.colour_writes += 1;
    }

    fn set_buzzer(&mut self, on: bool) {
        self.0.lock().unwrap().buzzer = on;
    }
}

#[derive(Clone, Default)]
pub struct RecordingEvents(Arc<Mutex<Vec<AppEvent>>>);

#[allow(dead_code)]
impl RecordingEvents {
    pub fn events(&self) -> Vec<AppEvent> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.0.lock().unwrap().iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingEvents {
    fn emit(&mut self, event: &AppEvent) {
        self.0.lock().unwrap().push(event.clone());
    }
}

#[derive(Clone, Default)]
pub struct RecordingDisplay(Arc<Mutex<Vec<DisplayFrame>>>);

#[allow(dead_code)]
impl RecordingDisplay {
    pub fn frames(&self) -> Vec<DisplayFrame> {
        self.0.lock().unwrap().clone()
    }

    pub fn last_lines(&self) -> Vec<String> {
        self.0
            .lock()
            .unwrap()
            .last()
            .map(|f| f.lines().iter().map(|l| l.to_string()).collect())
            .unwrap_or_default()
    }
}

impl DisplaySink for RecordingDisplay {
    fn show(&mut self, frame: &DisplayFrame) {
        self.0.lock().unwrap().push(frame.clone());
    }
}

/// LED output pin that counts rising edges.
#[derive(Clone, Default)]
pub struct MockPin {
    high: Arc<AtomicBool>,
    rising_edges: Arc<AtomicU32>,
}

#[allow(dead_code)]
impl MockPin {
    pub fn rising_edges(&self) -> u32 {
        self.rising_edges.load(Ordering::Relaxed)
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high.store(false, Ordering::Relaxed);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        if !self.high.swap(true, Ordering::Relaxed) {
            self.rising_edges.fetch_add(1, Ordering::Relaxed);
        }
        Ok(())
    }
}

/// Real sleeping delay so the PWM thread does not spin a host core.
#[derive(Clone, Copy, Default)]
pub struct SleepDelay;

impl DelayNs for SleepDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}

// ── Helpers ───────────────────────────────────────────────────

/// Poll `cond` every 10 ms until it holds or `timeout` passes.
#[allow(dead_code)]
pub fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    cond()
}
