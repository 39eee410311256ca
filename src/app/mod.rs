//! Application core: pure domain logic, zero I/O.
//!
//! Brightness laws, the controller cycle, the mode-button debouncer,
//! status colours and display rendering.  All interaction with hardware
//! happens through **port traits** defined in [`ports`], keeping this
//! layer fully testable without real peripherals.

pub mod controller;
pub mod display;
pub mod events;
pub mod mapping;
pub mod mode_switch;
pub mod model;
pub mod ports;
pub mod status;
