//! Port traits — the boundary between the controllers and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ controllers (domain)
//! ```
//!
//! Driven adapters (indicator pins, console, clock) implement these traits.
//! The controllers consume them via generics, so the state machines never
//! touch hardware directly and every task can run against mocks.

use core::fmt;
use core::time::Duration;

use crate::config::LINE_CAPACITY;

// ───────────────────────────────────────────────────────────────
// Indicator outputs
// ───────────────────────────────────────────────────────────────

/// The two logical outputs of the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Led {
    Green,
    Red,
}

impl Led {
    pub fn name(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Red => "red",
        }
    }
}

/// Drive level of a single output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    On,
    Off,
}

impl From<bool> for Level {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

/// Write-side port: the controllers call this to set an output.
pub trait OutputPort {
    fn write_output(&mut self, led: Led, level: Level) -> Result<(), OutputError>;
}

impl<T: OutputPort + ?Sized> OutputPort for &mut T {
    fn write_output(&mut self, led: Led, level: Level) -> Result<(), OutputError> {
        (**self).write_output(led, level)
    }
}

// ───────────────────────────────────────────────────────────────
// Console
// ───────────────────────────────────────────────────────────────

/// One bounded console line.
pub type Line = heapless::String<LINE_CAPACITY>;

/// A line as read from the console.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputLine {
    /// At most [`LINE_CAPACITY`] bytes, without the terminator.
    pub text: Line,
    /// Characters past [`LINE_CAPACITY`] were dropped; the line can never
    /// match a keyword.
    pub truncated: bool,
}

impl InputLine {
    /// A line that fit in full.
    pub fn complete(text: Line) -> Self {
        Self {
            text,
            truncated: false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Line termination for [`ConsolePort::write_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnd {
    /// Terminate with `\r\n`.
    CrLf,
    /// Leave the cursor after the text (prompts).
    None,
}

/// Operator console: blocking line input, unbuffered text output.
pub trait ConsolePort {
    /// Block until one line is available.  Characters beyond
    /// [`LINE_CAPACITY`] are discarded and the line is marked truncated.
    /// `Ok(None)` means end of input.
    fn read_line(&mut self) -> Result<Option<InputLine>, ConsoleError>;

    /// Write `text` followed by `end`.
    fn write_line(&mut self, text: &str, end: LineEnd) -> Result<(), ConsoleError>;
}

// ───────────────────────────────────────────────────────────────
// Clock
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Instant(u64);

impl Instant {
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Time elapsed since `earlier`, zero if `earlier` is in the future.
    pub fn saturating_duration_since(self, earlier: Instant) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }

    pub fn saturating_add(self, d: Duration) -> Instant {
        let ms = u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(ms))
    }
}

/// Monotonic tick source.
pub trait Clock {
    fn now(&self) -> Instant;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`OutputPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputError {
    /// The task's port has no pin for this output.
    NotWired(Led),
    /// The GPIO write failed.
    Gpio(Led),
}

/// Errors from [`ConsolePort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// Underlying read or write failed.
    Io,
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotWired(led) => write!(f, "{} output not wired", led.name()),
            Self::Gpio(led) => write!(f, "{} GPIO write failed", led.name()),
        }
    }
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "I/O error"),
        }
    }
}
