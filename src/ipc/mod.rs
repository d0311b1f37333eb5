//! Inter-task communication primitives.
//!
//! The only objects shared between tasks:
//!
//! ```text
//! Dispatcher ──ControlChannel──▶ Indicator controller ──SignalFlag──▶ Error flasher
//! ```
//!
//! Both are `const`-constructible, `Sync`, and safe to use from a dispatcher
//! thread and executor tasks at the same time.

pub mod control_channel;
pub mod signal_flag;
pub mod timeout;

pub use control_channel::{ControlChannel, Received};
pub use signal_flag::{SignalFlag, WaitOutcome};
pub use timeout::WaitTimeout;
