//! State-mode indicator machine.
//!
//! ```text
//!            off                      on
//!  GREEN_ON ─────▶ GREEN_OFF ──────────────▶ GREEN_ON
//!     │               │
//!  on/reset      off/reset        (each edge into ERROR signals the flasher)
//!     ▼               ▼
//!   ERROR ◀───────────┘
//!     │  on/off: ignored
//!     └──reset──▶ GREEN_ON        (signals the flasher to stand down)
//! ```
//!
//! The machine boots in `Error`.  The table is a single `match` over
//! `(state, command)`; the controller task applies the resulting [`Step`].

use log::{info, warn};

use crate::app::ports::Level;
use crate::events::StateCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    GreenOn,
    GreenOff,
    Error,
}

/// Effects of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub next: IndicatorState,
    /// Green output write, if any.
    pub green: Option<Level>,
    /// Whether to assert the signal flag.
    pub signal: bool,
}

/// Pure transition table.
pub fn step(state: IndicatorState, cmd: StateCommand) -> Step {
    use IndicatorState::{Error, GreenOff, GreenOn};
    use StateCommand::{Off, On, Reset};

    match (state, cmd) {
        (GreenOn, Off) => Step {
            next: GreenOff,
            green: Some(Level::Off),
            signal: false,
        },
        (GreenOn, On | Reset) => Step {
            next: Error,
            green: Some(Level::Off),
            signal: true,
        },
        (GreenOff, On) => Step {
            next: GreenOn,
            green: Some(Level::On),
            signal: false,
        },
        (GreenOff, Off | Reset) => Step {
            next: Error,
            green: None,
            signal: true,
        },
        (Error, Reset) => Step {
            next: GreenOn,
            green: Some(Level::On),
            signal: true,
        },
        (Error, On | Off) => Step {
            next: Error,
            green: None,
            signal: false,
        },
    }
}

/// Current state plus transition logging.
#[derive(Debug, Clone)]
pub struct StateMachine {
    state: IndicatorState,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// Boot state: `Error`, green dark, flasher running.
    pub fn new() -> Self {
        Self {
            state: IndicatorState::Error,
        }
    }

    pub fn state(&self) -> IndicatorState {
        self.state
    }

    /// Run `cmd` through the table and move to the next state.
    pub fn apply(&mut self, cmd: StateCommand) -> Step {
        let prev = self.state;
        let step = step(prev, cmd);
        self.state = step.next;

        match (prev, step.next) {
            (IndicatorState::Error, IndicatorState::Error) => {
                info!("STATE: {:?} ignored while in Error", cmd);
            }
            (_, IndicatorState::Error) => {
                warn!("STATE: {:?} illegal in {:?} -> Error", cmd, prev);
            }
            (from, to) => info!("STATE: {:?} -> {:?} ({:?})", from, to, cmd),
        }
        step
    }
}
