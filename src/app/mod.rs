//! Application core: the three controller tasks and the ports they use.
//!
//! ```text
//!  dispatcher ──ControlChannel──▶ indicator ──SignalFlag──▶ flasher
//! ```
//!
//! The tasks hold no hardware; outputs, console and clock arrive through
//! the traits in [`ports`], so everything here runs against mocks.

pub mod dispatcher;
pub mod flasher;
pub mod indicator;
pub mod ports;
