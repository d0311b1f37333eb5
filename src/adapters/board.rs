//! ESP-IDF board bring-up for the indicator outputs.
//!
//! Hands out one `PinDriver` per indicator GPIO.  Each is an
//! `embedded_hal` output pin, so the rest of the crate sees it only
//! through [`IndicatorPins`](crate::drivers::indicator::IndicatorPins).

use esp_idf_svc::hal::gpio::{AnyOutputPin, Output, PinDriver};
use esp_idf_svc::sys::EspError;
use log::info;

use crate::pins;

pub type BoardPin = PinDriver<'static, AnyOutputPin, Output>;

fn output(gpio: i32) -> Result<BoardPin, EspError> {
    // SAFETY: called once per indicator GPIO from `main()` at boot; no
    // other driver in the firmware claims these pins.
    let pin = unsafe { AnyOutputPin::new(gpio) };
    let driver = PinDriver::output(pin)?;
    info!("board: GPIO {} configured as indicator output", gpio);
    Ok(driver)
}

/// Claim the green and red indicator GPIOs.  Call once.
pub fn take_indicator_pins() -> Result<(BoardPin, BoardPin), EspError> {
    Ok((output(pins::GREEN_LED_GPIO)?, output(pins::RED_LED_GPIO)?))
}
