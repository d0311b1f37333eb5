//! Unified error types for the indicator controller.
//!
//! A single `Error` enum that every task can convert into, so the entry
//! point handles task failures uniformly.  All variants are `Copy` so they
//! can cross the task boundary by value without allocation.
//!
//! Operator typos and out-of-sequence commands are **not** errors: the
//! dispatcher rejects the former and the state-mode controller models the
//! latter as its `Error` state.  What remains here are the invariant
//! violations that end a task.

use core::fmt;

use crate::app::ports::{ConsoleError, OutputError};

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fatal condition in the controller funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The control channel rejected an operation.
    Channel(ChannelError),
    /// An indicator output could not be driven.
    Output(OutputError),
    /// The operator console failed.
    Console(ConsoleError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Channel(e) => write!(f, "channel: {e}"),
            Self::Output(e) => write!(f, "output: {e}"),
            Self::Console(e) => write!(f, "console: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Channel errors
// ---------------------------------------------------------------------------

/// Failures of [`ControlChannel`](crate::ipc::ControlChannel) publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    /// Every slot is occupied.  Under the single-producer discipline this
    /// never happens, so callers treat it as a hard fault.
    Full,
    /// The channel has been shut down permanently.
    Closed,
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "control channel full"),
            Self::Closed => write!(f, "control channel closed"),
        }
    }
}

impl From<ChannelError> for Error {
    fn from(e: ChannelError) -> Self {
        Self::Channel(e)
    }
}

impl From<OutputError> for Error {
    fn from(e: OutputError) -> Self {
        Self::Output(e)
    }
}

impl From<ConsoleError> for Error {
    fn from(e: ConsoleError) -> Self {
        Self::Console(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
