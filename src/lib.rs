//! AutoLight firmware library.
//!
//! Exposes the domain, task and driver modules for integration testing.
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module; host builds get simulation stubs.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod safety;
pub mod shared;
pub mod tasks;

pub mod error;
pub mod pins;

pub mod adapters;
pub mod drivers;
pub mod sensors;

mod esp_link_shims;
