//! Error-flasher machine.
//!
//! | State    | Wait result | Red | Next     | Next wait    |
//! |----------|-------------|-----|----------|--------------|
//! | FlashOn  | TimedOut    | OFF | FlashOff | flash period |
//! | FlashOn  | Signaled    | OFF | Idle     | forever      |
//! | FlashOff | TimedOut    | ON  | FlashOn  | flash period |
//! | FlashOff | Signaled    | —   | Idle     | forever      |
//! | Idle     | Signaled    | ON  | FlashOn  | flash period |
//!
//! A signal while flashing always stands the flasher down; only a signal
//! while idle restarts the cycle, at `FlashOn`.

use core::time::Duration;

use log::info;

use crate::app::ports::Level;
use crate::ipc::{WaitOutcome, WaitTimeout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashState {
    FlashOn,
    FlashOff,
    Idle,
}

/// Effects of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashStep {
    pub next: FlashState,
    /// Red output write, if any.
    pub red: Option<Level>,
    pub wait: WaitTimeout,
}

/// Pure transition table.
pub fn step(state: FlashState, outcome: WaitOutcome, period: Duration) -> FlashStep {
    use FlashState::{FlashOff, FlashOn, Idle};
    use WaitOutcome::{Signaled, TimedOut};

    let flashing = WaitTimeout::After(period);
    match (state, outcome) {
        (FlashOn, TimedOut) => FlashStep {
            next: FlashOff,
            red: Some(Level::Off),
            wait: flashing,
        },
        (FlashOn, Signaled) => FlashStep {
            next: Idle,
            red: Some(Level::Off),
            wait: WaitTimeout::Forever,
        },
        (FlashOff, TimedOut) => FlashStep {
            next: FlashOn,
            red: Some(Level::On),
            wait: flashing,
        },
        (FlashOff, Signaled) => FlashStep {
            next: Idle,
            red: None,
            wait: WaitTimeout::Forever,
        },
        (Idle, Signaled) => FlashStep {
            next: FlashOn,
            red: Some(Level::On),
            wait: flashing,
        },
        // Idle waits forever, so a timeout cannot arrive; stay put.
        (Idle, TimedOut) => FlashStep {
            next: Idle,
            red: None,
            wait: WaitTimeout::Forever,
        },
    }
}

#[derive(Debug, Clone)]
pub struct FlashMachine {
    state: FlashState,
    period: Duration,
}

impl FlashMachine {
    /// Boot state: flashing, red on.
    pub fn new(period: Duration) -> Self {
        Self {
            state: FlashState::FlashOn,
            period,
        }
    }

    pub fn state(&self) -> FlashState {
        self.state
    }

    /// Red level to drive at boot.
    pub fn initial_red(&self) -> Level {
        Level::On
    }

    /// Timeout for the first wait after boot; every later wait comes from
    /// [`FlashStep::wait`].
    pub fn initial_wait(&self) -> WaitTimeout {
        WaitTimeout::After(self.period)
    }

    pub fn apply(&mut self, outcome: WaitOutcome) -> FlashStep {
        let step = step(self.state, outcome, self.period);
        if outcome == WaitOutcome::Signaled {
            match step.next {
                FlashState::Idle => info!("FLASH: error cleared, red idle"),
                _ => info!("FLASH: error raised, red flashing"),
            }
        }
        self.state = step.next;
        step
    }
}
