//! Runtime symbol providers for third-party crates.
//!
//! `embassy-sync`'s `CriticalSectionRawMutex` (the sensor queues and the
//! brightness cell) calls into `critical-section` 1.x, which expects the
//! application to supply the acquire/release symbols.  On target they are
//! backed by one process-wide mutex, re-entrant per thread.  Host tests use
//! the `critical-section/std` implementation instead.
//!
//! `async-io-mini` timers (every task period, the mode cooldown and the
//! controller's receive budget) sleep through the `embassy-time-driver`
//! hooks `_embassy_time_now` and `_embassy_time_schedule_wake`.  Both are
//! provided here for target and host, ticking at the driver's default
//! 1 MHz.

use core::task::Waker;
use core::time::Duration;

#[cfg(target_os = "espidf")]
use core::cell::RefCell;
#[cfg(target_os = "espidf")]
use std::sync::{Mutex, MutexGuard, PoisonError};

#[cfg(target_os = "espidf")]
static CRITICAL_SECTION_MUTEX: Mutex<()> = Mutex::new(());

/// Nesting depth and the held guard of the current thread.
#[cfg(target_os = "espidf")]
struct Held {
    depth: u8,
    guard: Option<MutexGuard<'static, ()>>,
}

#[cfg(target_os = "espidf")]
thread_local! {
    static HELD: RefCell<Held> = const { RefCell::new(Held { depth: 0, guard: None }) };
}

#[cfg(target_os = "espidf")]
#[unsafe(no_mangle)]
pub extern "C" fn _critical_section_1_0_acquire() -> u8 {
    HELD.with_borrow_mut(|held| {
        if held.depth == 0 {
            // The guarded value is `()`, so a poisoned lock is still usable.
            held.guard = Some(
                CRITICAL_SECTION_MUTEX
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner),
            );
        }
        held.depth = held.depth.saturating_add(1);
        held.depth
    })
}

#[cfg(target_os = "espidf")]
#[unsafe(no_mangle)]
pub extern "C" fn _critical_section_1_0_release(_token: u8) {
    HELD.with_borrow_mut(|held| {
        if held.depth == 0 {
            return;
        }
        held.depth -= 1;
        if held.depth == 0 {
            held.guard = None;
        }
    });
}

/// Microseconds since boot.
#[cfg(target_os = "espidf")]
#[unsafe(no_mangle)]
pub fn _embassy_time_now() -> u64 {
    // SAFETY: esp_timer is started by the IDF before app_main.
    unsafe { esp_idf_svc::sys::esp_timer_get_time() as u64 }
}

/// Microseconds since the first clock read in this process.
#[cfg(not(target_os = "espidf"))]
#[unsafe(no_mangle)]
pub fn _embassy_time_now() -> u64 {
    static EPOCH: std::sync::OnceLock<std::time::Instant> = std::sync::OnceLock::new();
    let elapsed = EPOCH.get_or_init(std::time::Instant::now).elapsed();
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

/// Wake `waker` once the clock reaches `at`.
///
/// Each registration gets a short-lived sleeper thread.  A spurious or late
/// wake is harmless: the timer re-registers when polled before its deadline.
#[unsafe(no_mangle)]
pub fn _embassy_time_schedule_wake(at: u64, waker: &Waker) {
    let waker = waker.clone();
    std::thread::spawn(move || {
        let now = _embassy_time_now();
        if at > now {
            std::thread::sleep(Duration::from_micros(at - now));
        }
        waker.wake();
    });
}
