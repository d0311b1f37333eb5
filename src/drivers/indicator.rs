//! Two-colour indicator output driver.
//!
//! Maps the logical [`Led`]/[`Level`] pair onto any two
//! `embedded_hal::digital::OutputPin`s.  A task that owns only one colour
//! is given a driver with the other side unwired; writing the missing side
//! is an error rather than a silent no-op.

use core::convert::Infallible;

use embedded_hal::digital::{Error as _, ErrorType, OutputPin, PinState};
use log::warn;

use crate::app::ports::{Led, Level, OutputError, OutputPort};

/// Placeholder pin type for an unwired side.
pub struct Unwired;

impl ErrorType for Unwired {
    type Error = Infallible;
}

impl OutputPin for Unwired {
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

pub struct IndicatorPins<G, R> {
    green: Option<G>,
    red: Option<R>,
    /// LED cathode on the GPIO: ON drives the pin low.
    active_low: bool,
}

impl<G: OutputPin, R: OutputPin> IndicatorPins<G, R> {
    pub fn new(green: G, red: R) -> Self {
        Self {
            green: Some(green),
            red: Some(red),
            active_low: false,
        }
    }

    pub fn active_low(mut self, active_low: bool) -> Self {
        self.active_low = active_low;
        self
    }

    fn pin_state(&self, level: Level) -> PinState {
        PinState::from((level == Level::On) != self.active_low)
    }
}

impl<G: OutputPin> IndicatorPins<G, Unwired> {
    /// Driver for a task that owns only the green output.
    pub fn green_only(green: G) -> Self {
        Self {
            green: Some(green),
            red: None,
            active_low: false,
        }
    }
}

impl<R: OutputPin> IndicatorPins<Unwired, R> {
    /// Driver for a task that owns only the red output.
    pub fn red_only(red: R) -> Self {
        Self {
            green: None,
            red: Some(red),
            active_low: false,
        }
    }
}

fn drive<P: OutputPin>(pin: Option<&mut P>, led: Led, state: PinState) -> Result<(), OutputError> {
    let pin = pin.ok_or(OutputError::NotWired(led))?;
    pin.set_state(state).map_err(|e| {
        warn!("{} GPIO write failed: {:?}", led.name(), e.kind());
        OutputError::Gpio(led)
    })
}

impl<G: OutputPin, R: OutputPin> OutputPort for IndicatorPins<G, R> {
    fn write_output(&mut self, led: Led, level: Level) -> Result<(), OutputError> {
        let state = self.pin_state(level);
        match led {
            Led::Green => drive(self.green.as_mut(), led, state),
            Led::Red => drive(self.red.as_mut(), led, state),
        }
    }
}
