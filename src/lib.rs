//! TwinLED indicator controller library.
//!
//! Exposes the controllers, state machines and IPC primitives for
//! integration testing.  ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod fsm;
pub mod ipc;
pub mod pins;

pub mod adapters;
pub mod drivers;
