//! Fuzz target: `DisplayFrame::render`
//!
//! Any snapshot must render to exactly four lines that fit the panel.
//!
//! cargo fuzz run fuzz_display_frame

#![no_main]

use autolight::app::display::{DisplayFrame, DisplaySnapshot, FRAME_LINES, LINE_WIDTH};
use autolight::app::model::OperatingMode;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: [u8; 5]| {
    let snap = DisplaySnapshot {
        mode: OperatingMode::from_u8(data[0]),
        brightness: data[1],
        last_ambient: u16::from_le_bytes([data[2], data[3]]),
        emergency: data[4] & 1 != 0,
    };
    let frame = DisplayFrame::render(&snap);
    assert_eq!(frame.lines().len(), FRAME_LINES);
    assert!(frame.lines().iter().all(|l| !l.is_empty() && l.len() <= LINE_WIDTH));
});
