//! Indicator controller tasks.
//!
//! Each task owns its state machine and the outputs that machine drives,
//! and suspends only inside [`ControlChannel::receive`].  Both return
//! `Ok(())` once the channel has been closed and drained.

use log::{debug, info};

use super::ports::{Clock, Led, Level, OutputPort};
use crate::error::Result;
use crate::events::{RateCommand, StateCommand};
use crate::fsm::rate::{RateIndex, RateMachine};
use crate::fsm::state::{IndicatorState, StateMachine};
use crate::ipc::{ControlChannel, Received, SignalFlag, WaitTimeout};

// ───────────────────────────────────────────────────────────────
// Rate mode
// ───────────────────────────────────────────────────────────────

/// Alternates green and red, with the dwell time adjusted by
/// `faster` / `slower`.
pub struct RateIndicator<O, K> {
    outputs: O,
    clock: K,
    machine: RateMachine,
}

impl<O: OutputPort, K: Clock> RateIndicator<O, K> {
    /// Drive both outputs dark and arm the first swap.
    pub fn new(mut outputs: O, clock: K, index: RateIndex) -> Result<Self> {
        outputs.write_output(Led::Green, Level::Off)?;
        outputs.write_output(Led::Red, Level::Off)?;
        let machine = RateMachine::new(index, clock.now());
        info!(
            "RATE: start at index {} ({} ms dwell)",
            index.get(),
            index.dwell().as_millis()
        );
        Ok(Self {
            outputs,
            clock,
            machine,
        })
    }

    pub fn machine(&self) -> &RateMachine {
        &self.machine
    }

    /// Handle one channel result.  Returns `false` once the channel is closed.
    pub fn handle(&mut self, received: Received<RateCommand>) -> Result<bool> {
        match received {
            Received::Event(cmd) => {
                self.machine.on_command(cmd, self.clock.now());
            }
            Received::TimedOut => {
                let swap = self.machine.on_timeout(self.clock.now());
                self.outputs.write_output(swap.on, Level::On)?;
                self.outputs.write_output(swap.off, Level::Off)?;
            }
            Received::Closed => {
                info!("RATE: control channel closed");
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub async fn run(&mut self, channel: &ControlChannel<RateCommand>) -> Result<()> {
        loop {
            let wait = self.machine.remaining(self.clock.now());
            let received = channel.receive(WaitTimeout::After(wait)).await;
            if !self.handle(received)? {
                return Ok(());
            }
        }
    }

    pub fn into_outputs(self) -> O {
        self.outputs
    }
}

// ───────────────────────────────────────────────────────────────
// State mode
// ───────────────────────────────────────────────────────────────

/// Green on/off controller with an `Error` state.  Escalation into and
/// recovery out of `Error` assert `flag` for the error flasher.
pub struct StateIndicator<'a, O> {
    outputs: O,
    flag: &'a SignalFlag,
    machine: StateMachine,
}

impl<'a, O: OutputPort> StateIndicator<'a, O> {
    /// Boot in `Error` with green dark.  The flasher starts out flashing,
    /// so no assertion is needed here.
    pub fn new(mut outputs: O, flag: &'a SignalFlag) -> Result<Self> {
        outputs.write_output(Led::Green, Level::Off)?;
        info!("STATE: start in Error");
        Ok(Self {
            outputs,
            flag,
            machine: StateMachine::new(),
        })
    }

    pub fn state(&self) -> IndicatorState {
        self.machine.state()
    }

    /// Apply one command.  The flag is asserted before green is written.
    pub fn handle(&mut self, cmd: StateCommand) -> Result<()> {
        let step = self.machine.apply(cmd);
        if step.signal {
            self.flag.signal();
            debug!("STATE: flag asserted ({} pending)", self.flag.pending());
        }
        if let Some(level) = step.green {
            self.outputs.write_output(Led::Green, level)?;
        }
        Ok(())
    }

    pub async fn run(&mut self, channel: &ControlChannel<StateCommand>) -> Result<()> {
        loop {
            match channel.receive(WaitTimeout::Forever).await {
                Received::Event(cmd) => self.handle(cmd)?,
                Received::Closed => {
                    info!("STATE: control channel closed");
                    return Ok(());
                }
                // Forever never times out.
                Received::TimedOut => {}
            }
        }
    }

    pub fn into_outputs(self) -> O {
        self.outputs
    }
}
