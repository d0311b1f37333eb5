//! Rate-mode blink machine.
//!
//! Green and red alternate with equal dwell times taken from
//! [`DWELL_TABLE_MS`].  `faster` / `slower` move through the table with
//! wraparound, and take effect inside the interval that is already
//! running:
//!
//! ```text
//!  interval_start           now            interval_start + new_dwell
//!        │◀──── elapsed ─────▶│◀──── remaining ────▶│
//!        ├────────────────────┼─────────────────────┤  swap here
//!
//!  elapsed >= new_dwell  ─▶  swap on the next scheduling opportunity
//! ```
//!
//! Only an expired deadline swaps colours; commands move the deadline and
//! nothing else, so reconfiguration can neither skip nor double a swap.
//! Time is passed in explicitly so the arithmetic runs against a fake
//! clock in tests.

use core::time::Duration;

use log::{debug, info};

use crate::app::ports::{Instant, Led};
use crate::config::{DWELL_TABLE_MS, MIN_TIMEOUT};
use crate::events::RateCommand;

/// Position in [`DWELL_TABLE_MS`]; always in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RateIndex(usize);

impl RateIndex {
    /// Number of selectable dwell times.
    pub const LEVELS: usize = DWELL_TABLE_MS.len();

    /// `None` if `index` is outside the table.
    pub const fn new(index: usize) -> Option<Self> {
        if index < Self::LEVELS {
            Some(Self(index))
        } else {
            None
        }
    }

    pub const fn get(self) -> usize {
        self.0
    }

    /// Next shorter dwell; the shortest wraps to the longest.
    pub const fn faster(self) -> Self {
        Self((self.0 + Self::LEVELS - 1) % Self::LEVELS)
    }

    /// Next longer dwell; the longest wraps to the shortest.
    pub const fn slower(self) -> Self {
        Self((self.0 + 1) % Self::LEVELS)
    }

    pub const fn adjust(self, cmd: RateCommand) -> Self {
        match cmd {
            RateCommand::Faster => self.faster(),
            RateCommand::Slower => self.slower(),
        }
    }

    pub fn dwell(self) -> Duration {
        Duration::from_millis(u64::from(DWELL_TABLE_MS[self.0]))
    }
}

/// Which colour a swap lights.  Primary is green, secondary is red.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkPhase {
    PrimaryOn,
    SecondaryOn,
}

impl BlinkPhase {
    pub fn other(self) -> Self {
        match self {
            Self::PrimaryOn => Self::SecondaryOn,
            Self::SecondaryOn => Self::PrimaryOn,
        }
    }

    /// The output lit in this phase.
    pub fn led(self) -> Led {
        match self {
            Self::PrimaryOn => Led::Green,
            Self::SecondaryOn => Led::Red,
        }
    }
}

/// Output writes for one colour swap: light `on` first, then dark `off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swap {
    pub on: Led,
    pub off: Led,
}

/// Dwell-time bookkeeping for the rate-mode controller.
#[derive(Debug, Clone)]
pub struct RateMachine {
    index: RateIndex,
    /// Phase the next swap lights.
    phase: BlinkPhase,
    /// Phase currently shown; `None` until the first swap.
    lit: Option<BlinkPhase>,
    interval_start: Instant,
    deadline: Instant,
}

impl RateMachine {
    /// Start at `index` with both outputs dark.  The first swap is due
    /// [`MIN_TIMEOUT`] after `now`, so green lights on boot.
    pub fn new(index: RateIndex, now: Instant) -> Self {
        Self {
            index,
            phase: BlinkPhase::PrimaryOn,
            lit: None,
            interval_start: now,
            deadline: now.saturating_add(MIN_TIMEOUT),
        }
    }

    /// Apply a speed command that arrived before the deadline and return
    /// the recomputed deadline.
    pub fn on_command(&mut self, cmd: RateCommand, now: Instant) -> Instant {
        self.index = self.index.adjust(cmd);
        let dwell = self.index.dwell();
        let elapsed = now.saturating_duration_since(self.interval_start);

        self.deadline = if elapsed < dwell {
            self.interval_start.saturating_add(dwell)
        } else {
            now.saturating_add(MIN_TIMEOUT)
        };

        info!(
            "RATE: {:?} -> index {} ({} ms), {} ms elapsed, swap in {} ms",
            cmd,
            self.index.get(),
            dwell.as_millis(),
            elapsed.as_millis(),
            self.remaining(now).as_millis()
        );
        self.deadline
    }

    /// The deadline expired: swap colours and start a fresh interval.
    pub fn on_timeout(&mut self, now: Instant) -> Swap {
        let lit = self.phase;
        self.phase = lit.other();
        self.lit = Some(lit);
        self.interval_start = now;
        self.deadline = now.saturating_add(self.index.dwell());

        debug!("RATE: {} on for {} ms", lit.led().name(), self.index.dwell().as_millis());
        Swap {
            on: lit.led(),
            off: lit.other().led(),
        }
    }

    /// Time left before the next swap, zero once the deadline has passed.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }

    pub fn index(&self) -> RateIndex {
        self.index
    }

    /// Phase the next swap lights.
    pub fn phase(&self) -> BlinkPhase {
        self.phase
    }

    /// Phase currently shown, `None` before the first swap.
    pub fn lit(&self) -> Option<BlinkPhase> {
        self.lit
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn interval_start(&self) -> Instant {
        self.interval_start
    }
}
