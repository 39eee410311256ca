//! Panic handling and runtime diagnostics.
//!
//! A custom panic hook drives the outputs into the emergency safe state
//! before the default abort path resets the chip, so a software fault never
//! leaves the lamp under stale control.  Heap statistics are logged at boot.

use std::any::Any;
use std::sync::Mutex;

use crate::app::ports::IndicatorPort;
use crate::safety::{EmergencyLatch, force_safe_state};

// ───────────────────────────────────────────────────────────────
// Custom panic handler: forces the safe state
// ───────────────────────────────────────────────────────────────

/// Best-effort message from a panic payload.
pub fn panic_reason(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic"
    }
}

/// Install a panic hook that trips `latch` and forces red + buzzer on
/// `indicator`.
///
/// Must be called once during init, before any task is spawned.  The hook
/// owns its own indicator handle; it writes the same pins as the control
/// thread's, which is fine because both only ever force the same state
/// after the latch is set.
pub fn install_panic_handler<I>(latch: &'static EmergencyLatch, indicator: I)
where
    I: IndicatorPort + Send + 'static,
{
    let indicator = Mutex::new(indicator);
    std::panic::set_hook(Box::new(move |info| {
        latch.trip();

        // A panic inside the indicator itself leaves the lock held or
        // poisoned; skip the write rather than deadlock.
        match indicator.try_lock() {
            Ok(mut ind) => force_safe_state(&mut *ind),
            Err(_) => log::error!("Panic handler: indicator unavailable"),
        }

        let location = info
            .location()
            .map_or_else(|| "?".into(), |l| format!("{}:{}", l.file(), l.line()));
        log::error!("PANIC at {}: {}", location, panic_reason(info.payload()));
    }));
}

// ───────────────────────────────────────────────────────────────
// Heap statistics
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapStats {
    pub free: u32,
    pub min_free: u32,
}

impl HeapStats {
    #[cfg(target_os = "espidf")]
    pub fn collect() -> Self {
        // SAFETY: both calls only read allocator counters.
        unsafe {
            Self {
                free: esp_idf_svc::sys::esp_get_free_heap_size(),
                min_free: esp_idf_svc::sys::esp_get_minimum_free_heap_size(),
            }
        }
    }

    /// Simulation: a fixed 300 KB heap.
    #[cfg(not(target_os = "espidf"))]
    pub fn collect() -> Self {
        Self {
            free: 307_200,
            min_free: 307_200,
        }
    }

    pub fn log(&self) {
        log::info!("heap: free={} min_free={}", self.free, self.min_free);
    }
}
