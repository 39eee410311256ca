//! Display sink that writes each frame to the log.
//!
//! Stands in for a panel driver: the frame is already rendered, so a real
//! panel adapter only has to draw [`DisplayFrame::lines`].  Identical
//! consecutive frames are not re-logged.

use log::{debug, info};

use crate::app::display::DisplayFrame;
use crate::app::ports::DisplaySink;

#[derive(Default)]
pub struct LogDisplay {
    last: Option<DisplayFrame>,
    frames_shown: u32,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplaySink for LogDisplay {
    fn show(&mut self, frame: &DisplayFrame) {
        if self.last.as_ref() == Some(frame) {
            return;
        }
        self.frames_shown = self.frames_shown.wrapping_add(1);
        debug!("LCD | frame {}", self.frames_shown);
        for line in frame.lines() {
            info!("LCD | {}", line);
        }
        self.last = Some(frame.clone());
    }
}
