//! Status display frame.
//!
//! The display task copies a [`DisplaySnapshot`] out of the shared state,
//! renders it into a fixed-size text frame and hands the frame to the
//! [`DisplaySink`](super::ports::DisplaySink).  Rendering is pure, so the
//! sink only has to draw lines.
//!
//! Frame layout (21 columns, the width of a 128 px panel at 6 px/char):
//!
//! ```text
//! Auto Light System
//! Mode: AUTO
//! Brightness: 227
//! LDR (AO): 2048
//! ```

use core::fmt::Write;

use heapless::{String, Vec};

use super::model::OperatingMode;

pub const LINE_WIDTH: usize = 21;
pub const FRAME_LINES: usize = 4;

pub const TITLE: &str = "Auto Light System";

pub type Line = String<LINE_WIDTH>;

/// Values the display is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySnapshot {
    pub mode: OperatingMode,
    pub brightness: u8,
    pub last_ambient: u16,
    pub emergency: bool,
}

/// One rendered screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayFrame {
    lines: Vec<Line, FRAME_LINES>,
}

impl DisplayFrame {
    pub fn render(snap: &DisplaySnapshot) -> Self {
        let mut frame = Self::default();
        frame.push_line(format_args!("{TITLE}"));
        if snap.emergency {
            frame.push_line(format_args!("Mode: STOP"));
        } else {
            frame.push_line(format_args!("Mode: {}", snap.mode));
        }
        frame.push_line(format_args!("Brightness: {}", snap.brightness));
        frame.push_line(format_args!("LDR (AO): {}", snap.last_ambient));
        frame
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    fn push_line(&mut self, args: core::fmt::Arguments<'_>) {
        let mut line = Line::new();
        // Overlong text is cut at the panel edge.
        let _ = line.write_fmt(args);
        let _ = self.lines.push(line);
    }
}
