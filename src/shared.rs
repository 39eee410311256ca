//! State shared between the tasks.
//!
//! One [`SharedState`] is created before any task starts and handed to each
//! task by reference.  Everything in it lives for the whole process.
//!
//! ```text
//! ┌──────────────┐ SensorReading ┌──────────────┐ brightness ┌─────────────┐
//! │ SensorSource │──────────────▶│              │───────────▶│  PwmDriver  │
//! └──────────────┘  (10, drop)   │  Controller  │  (mutex)   └─────────────┘
//! ┌──────────────┐  PotReading   │              │            ┌─────────────┐
//! │ InputSource  │──────────────▶│              │───────────▶│   Display   │
//! └──────────────┘  (10, drop)   └──────────────┘            └─────────────┘
//!                                   ▲       ▲
//!                       EmergencyLatch     mode ◀── ModeSwitch
//! ```
//!
//! | Cell           | Writer        | Readers                     | Sync          |
//! |----------------|---------------|-----------------------------|---------------|
//! | sensor_queue   | SensorSource  | Controller                  | channel       |
//! | pot_queue      | InputSource   | Controller                  | channel       |
//! | brightness     | Controller    | PwmDriver, Display          | blocking mutex|
//! | mode           | ModeSwitch    | Controller, Status, Display | atomic        |
//! | emergency      | ISR           | Controller, Status, Display | atomic        |
//! | last_ambient   | Controller    | Display                     | atomic        |

use core::cell::Cell;
use core::sync::atomic::{AtomicU8, AtomicU16, Ordering};
use core::time::Duration;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::app::display::DisplaySnapshot;
use crate::app::model::{OperatingMode, PotReading, SensorReading};
use crate::safety::EmergencyLatch;

/// Capacity of each sensor queue.
pub const QUEUE_DEPTH: usize = 10;

/// Ambient readings: SensorSource → Controller.
pub type SensorQueue = Channel<CriticalSectionRawMutex, SensorReading, QUEUE_DEPTH>;

/// Potentiometer readings: InputSource → Controller.
pub type PotQueue = Channel<CriticalSectionRawMutex, PotReading, QUEUE_DEPTH>;

// ───────────────────────────────────────────────────────────────
// Brightness cell
// ───────────────────────────────────────────────────────────────

/// The LED brightness, 0 – 255.
///
/// Guarded by a critical-section mutex held only for the copy in or out,
/// never across a queue wait or pulse generation.
pub struct BrightnessCell {
    level: Mutex<CriticalSectionRawMutex, Cell<u8>>,
}

impl BrightnessCell {
    pub const fn new() -> Self {
        Self {
            level: Mutex::new(Cell::new(0)),
        }
    }

    pub fn get(&self) -> u8 {
        self.level.lock(Cell::get)
    }

    /// Compute and store a new level inside one lock window.  When
    /// `compute` yields `None` the cell is left untouched.
    pub fn publish(&self, compute: impl FnOnce() -> Option<u8>) -> Option<u8> {
        self.level.lock(|cell| {
            let value = compute()?;
            cell.set(value);
            Some(value)
        })
    }
}

impl Default for BrightnessCell {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────────────────────────────
// Mode cell
// ───────────────────────────────────────────────────────────────

/// Current operating mode.  ModeSwitch is the only writer.
pub struct ModeCell {
    raw: AtomicU8,
}

impl ModeCell {
    pub const fn new(initial: OperatingMode) -> Self {
        Self {
            raw: AtomicU8::new(initial as u8),
        }
    }

    pub fn get(&self) -> OperatingMode {
        OperatingMode::from_u8(self.raw.load(Ordering::Acquire))
    }

    /// Flip the mode.  Returns `(from, to)`.
    pub fn toggle(&self) -> (OperatingMode, OperatingMode) {
        let from = OperatingMode::from_u8(self.raw.fetch_xor(1, Ordering::AcqRel));
        (from, from.toggled())
    }
}

// ───────────────────────────────────────────────────────────────
// SharedState
// ───────────────────────────────────────────────────────────────

pub struct SharedState {
    pub sensor_queue: SensorQueue,
    pub pot_queue: PotQueue,
    pub brightness: BrightnessCell,
    pub mode: ModeCell,
    pub emergency: EmergencyLatch,
    /// Last ambient magnitude seen by the controller, for display only.
    /// Relaxed: brief staleness is fine.
    last_ambient: AtomicU16,
}

impl SharedState {
    /// Everything at its power-on value: empty queues, brightness 0,
    /// AUTO mode, latch clear.
    pub const fn new() -> Self {
        Self {
            sensor_queue: Channel::new(),
            pot_queue: Channel::new(),
            brightness: BrightnessCell::new(),
            mode: ModeCell::new(OperatingMode::Auto),
            emergency: EmergencyLatch::new(),
            last_ambient: AtomicU16::new(0),
        }
    }

    pub fn last_ambient(&self) -> u16 {
        self.last_ambient.load(Ordering::Relaxed)
    }

    pub fn set_last_ambient(&self, magnitude: u16) {
        self.last_ambient.store(magnitude, Ordering::Relaxed);
    }

    /// Read-only view for the display.
    pub fn snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            mode: self.mode.get(),
            brightness: self.brightness.get(),
            last_ambient: self.last_ambient(),
            emergency: self.emergency.is_tripped(),
        }
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────────────────────────────
// Queue helpers
// ───────────────────────────────────────────────────────────────

/// Non-blocking push.  A full queue drops `item` and returns `false`;
/// only the freshest data matters to the controller, so there is no retry.
pub fn offer<T, const N: usize>(queue: &Channel<CriticalSectionRawMutex, T, N>, item: T) -> bool {
    queue.try_send(item).is_ok()
}

/// Receive one item, waiting at most `budget`.  `None` on timeout.
pub async fn receive_within<T, const N: usize>(
    queue: &Channel<CriticalSectionRawMutex, T, N>,
    budget: Duration,
) -> Option<T> {
    futures_lite::future::or(async { Some(queue.receive().await) }, async {
        async_io_mini::Timer::after(budget).await;
        None
    })
    .await
}
