//! GPIO / peripheral pin assignments for the AutoLight controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Ambient light sensor (LDR module with comparator)
// ---------------------------------------------------------------------------

/// LDR analog output.  GPIO 12 on ESP32-S3 is ADC2 channel 1.
pub const LDR_AO_GPIO: i32 = 12;
/// LDR comparator output.  LOW = darker than the trim-pot threshold.
pub const LDR_DO_GPIO: i32 = 41;

// ---------------------------------------------------------------------------
// Manual brightness potentiometer
// ---------------------------------------------------------------------------

/// Potentiometer wiper.  GPIO 2 on ESP32-S3 is ADC1 channel 1.
pub const POT_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Push-buttons (active-low, internal pull-up)
// ---------------------------------------------------------------------------

/// Emergency stop input, falling-edge interrupt.
pub const EMERGENCY_GPIO: i32 = 3;
/// AUTO / MANUAL mode toggle, polled and debounced in software.
pub const MODE_BUTTON_GPIO: i32 = 11;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Main LED, bit-banged software PWM.
pub const LED_PWM_GPIO: i32 = 4;

/// Status RGB LED (common cathode, HIGH = on).
pub const STATUS_R_GPIO: i32 = 7;
pub const STATUS_G_GPIO: i32 = 8;
pub const STATUS_B_GPIO: i32 = 9;

/// Active buzzer (HIGH = sounding).
pub const BUZZER_GPIO: i32 = 10;

// ---------------------------------------------------------------------------
// ADC channel mapping
// ---------------------------------------------------------------------------

/// ADC unit/channel pairs for the analog inputs above.
pub const LDR_ADC_UNIT: u32 = 2;
pub const LDR_ADC_CHANNEL: u32 = 1;
pub const POT_ADC_UNIT: u32 = 1;
pub const POT_ADC_CHANNEL: u32 = 1;

// ---------------------------------------------------------------------------
// Display bus (reserved)
// ---------------------------------------------------------------------------

/// I2C lines of the SSD1306 panel header.  The log display does not drive
/// them; they must stay free for a panel adapter.
pub const DISPLAY_SDA_GPIO: i32 = 5;
pub const DISPLAY_SCL_GPIO: i32 = 6;
