//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC in production).

use log::{error, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | mode={} | brightness={} | ldr={} | estop={}",
                    t.mode,
                    t.brightness,
                    t.last_ambient,
                    if t.emergency { "LATCHED" } else { "clear" },
                );
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE | {} -> {}", from, to);
            }
            AppEvent::EmergencyLatched { brightness } => {
                error!("ESTOP | latched, LED frozen at {}", brightness);
            }
            AppEvent::Started(mode) => {
                info!("START | initial_mode={}", mode);
            }
        }
    }
}
