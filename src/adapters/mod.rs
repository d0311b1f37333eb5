//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter       | Implements   | Connects to                       |
//! |---------------|--------------|-----------------------------------|
//! | `board`       | OutputPin    | ESP32 GPIO (`PinDriver`)          |
//! | `console`     | ConsolePort  | stdin/stdout (UART on ESP-IDF)    |
//! | `time`        | Clock        | `esp_timer` / `std::time::Instant`|
//! | `virtual_led` | OutputPin    | log output (host runs)            |

#[cfg(target_os = "espidf")]
pub mod board;
pub mod console;
pub mod time;
pub mod virtual_led;
