//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements                          | Connects to          |
//! |-------------|-------------------------------------|----------------------|
//! | `hardware`  | AmbientLightPort, PotentiometerPort | ESP32 ADC, GPIO      |
//! |             | ButtonPort, IndicatorPort           | ESP32 GPIO           |
//! | `display`   | DisplaySink                         | Serial log output    |
//! | `log_sink`  | EventSink                           | Serial log output    |
//! | `time`      | Clock                               | ESP32 system timer   |

pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod time;
