//! Host stand-in for an indicator LED.
//!
//! Without a board the binary drives these instead of GPIOs; every level
//! change is logged so the blink pattern can be followed on the console.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};
use log::info;

pub struct LogLed {
    name: &'static str,
    high: bool,
}

impl LogLed {
    pub fn new(name: &'static str) -> Self {
        Self { name, high: false }
    }

    fn set(&mut self, high: bool) {
        if self.high != high {
            info!("LED {}: {}", self.name, if high { "ON" } else { "off" });
        }
        self.high = high;
    }
}

impl ErrorType for LogLed {
    type Error = Infallible;
}

impl OutputPin for LogLed {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.set(true);
        Ok(())
    }
}

impl StatefulOutputPin for LogLed {
    fn is_set_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.high)
    }
}
