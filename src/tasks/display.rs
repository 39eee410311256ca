//! Display refresh and periodic telemetry.

use core::time::Duration;

use crate::app::display::DisplayFrame;
use crate::app::events::{AppEvent, TelemetryData};
use crate::app::ports::{DisplaySink, EventSink};
use crate::shared::SharedState;

/// Render the current state into `display`, and every `telemetry_every`
/// frames also emit a telemetry event.
pub struct DisplayRefresh {
    telemetry_every: u32,
    frame_count: u32,
}

impl DisplayRefresh {
    pub fn new(telemetry_every: u32) -> Self {
        Self {
            telemetry_every: telemetry_every.max(1),
            frame_count: 0,
        }
    }

    pub fn refresh<D: DisplaySink, E: EventSink>(
        &mut self,
        shared: &SharedState,
        display: &mut D,
        events: &mut E,
    ) {
        let snap = shared.snapshot();
        display.show(&DisplayFrame::render(&snap));

        self.frame_count = self.frame_count.wrapping_add(1);
        if self.frame_count % self.telemetry_every == 0 {
            events.emit(&AppEvent::Telemetry(TelemetryData {
                mode: snap.mode,
                brightness: snap.brightness,
                last_ambient: snap.last_ambient,
                emergency: snap.emergency,
            }));
        }
    }
}

pub async fn display_task<D, E>(
    shared: &SharedState,
    mut display: D,
    mut events: E,
    period: Duration,
    telemetry_every: u32,
) where
    D: DisplaySink,
    E: EventSink,
{
    let mut refresh = DisplayRefresh::new(telemetry_every);
    loop {
        refresh.refresh(shared, &mut display, &mut events);
        async_io_mini::Timer::after(period).await;
    }
}
