//! Piecewise-linear brightness laws.
//!
//! | Mode   | Comparator | Input domain | Output range |
//! |--------|------------|--------------|--------------|
//! | AUTO   | dark       | 0 – 4095     | 200 → 255    |
//! | AUTO   | bright     | 0 – 4095     | 255 → 0      |
//! | MANUAL | —          | 0 – 4095     | 0 → 255      |
//!
//! In darkness the LED never drops below 200.  In daylight the law is
//! inverted: more ambient light, less LED output.

use super::model::{ADC_MAX, OperatingMode, PotReading, SensorReading};

/// Lowest brightness used while the comparator reports darkness.
pub const DARK_FLOOR: u8 = 200;

/// Linear interpolation with the input clamped to `[in_lo, in_hi]`.
///
/// `out_lo` may exceed `out_hi` for an inverted mapping.  Integer division
/// truncates toward zero.
pub fn map_range(input: i32, in_lo: i32, in_hi: i32, out_lo: i32, out_hi: i32) -> i32 {
    if in_hi == in_lo {
        return out_lo;
    }
    let (lo, hi) = if in_lo < in_hi { (in_lo, in_hi) } else { (in_hi, in_lo) };
    let x = input.clamp(lo, hi);
    out_lo + (x - in_lo) * (out_hi - out_lo) / (in_hi - in_lo)
}

/// AUTO brightness for an ambient reading.
pub fn auto_brightness(reading: SensorReading) -> u8 {
    let (lo, hi) = if reading.below_threshold {
        (i32::from(DARK_FLOOR), 255)
    } else {
        (255, 0)
    };
    to_level(map_range(i32::from(reading.magnitude), 0, i32::from(ADC_MAX), lo, hi))
}

/// MANUAL brightness for a potentiometer position.
pub fn manual_brightness(reading: PotReading) -> u8 {
    to_level(map_range(i32::from(reading.position), 0, i32::from(ADC_MAX), 0, 255))
}

/// Brightness for the given mode, from whichever input the mode selects.
pub fn target_brightness(mode: OperatingMode, sensor: SensorReading, pot: PotReading) -> u8 {
    match mode {
        OperatingMode::Auto => auto_brightness(sensor),
        OperatingMode::Manual => manual_brightness(pot),
    }
}

fn to_level(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}
