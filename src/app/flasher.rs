//! Error-flasher task: flashes red while the indicator is in `Error`.

use log::debug;

use super::ports::{Led, OutputPort};
use crate::error::Result;
use crate::fsm::flasher::{FlashMachine, FlashState};
use crate::ipc::SignalFlag;

pub struct ErrorFlasher<O> {
    outputs: O,
    machine: FlashMachine,
}

impl<O: OutputPort> ErrorFlasher<O> {
    /// Boot flashing, red lit.
    pub fn new(mut outputs: O, machine: FlashMachine) -> Result<Self> {
        outputs.write_output(Led::Red, machine.initial_red())?;
        Ok(Self { outputs, machine })
    }

    pub fn state(&self) -> FlashState {
        self.machine.state()
    }

    /// Wait on `flag` and apply each outcome; each step sets the next
    /// wait.  Only returns on an output failure.
    pub async fn run(&mut self, flag: &SignalFlag) -> Result<()> {
        let mut wait = self.machine.initial_wait();
        loop {
            let outcome = flag.wait(wait).await;
            let step = self.machine.apply(outcome);
            wait = step.wait;
            if let Some(level) = step.red {
                debug!("FLASH: red {:?}", level);
                self.outputs.write_output(Led::Red, level)?;
            }
        }
    }

    pub fn into_outputs(self) -> O {
        self.outputs
    }
}
