//! Pure indicator state machines.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  rate     RateMachine   (PrimaryOn ⇄ SecondaryOn, deadlines)  │
//! │  state    StateMachine  (GreenOn / GreenOff / Error)          │
//! │  flasher  FlashMachine  (FlashOn ⇄ FlashOff, Idle)            │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each machine is a tagged union matched against its input and returns
//! the output writes to perform; none of them touches a port, a channel
//! or a clock.  The async tasks in [`crate::app`] feed them events,
//! timestamps and wait outcomes, and apply what comes back.

pub mod flasher;
pub mod rate;
pub mod state;
