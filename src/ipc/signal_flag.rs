//! Signal flag: indicator controller → error flasher.
//!
//! A payload-free, edge-latching notification.  Each [`SignalFlag::signal`]
//! is counted, and each [`SignalFlag::wait`] that returns
//! [`WaitOutcome::Signaled`] consumes exactly one count, so an assertion
//! made while the flasher is busy toggling the LED is observed on its next
//! wait instead of being lost, and two quick assertions are never merged
//! into one.
//!
//! The wake-up itself rides on an `embassy-sync` [`Signal`]; the counter is
//! the source of truth and the signal only says "look again".

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use futures_lite::future;

use super::timeout::{Expiry, WaitTimeout};

/// Result of [`SignalFlag::wait`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// One assertion was consumed.
    Signaled,
    /// The timeout elapsed with no assertion pending.
    TimedOut,
}

/// Latched binary signal with timed wait.  One asserting task, one waiter.
pub struct SignalFlag {
    pending: AtomicU32,
    wake: Signal<CriticalSectionRawMutex, ()>,
}

impl Default for SignalFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalFlag {
    pub const fn new() -> Self {
        Self {
            pending: AtomicU32::new(0),
            wake: Signal::new(),
        }
    }

    /// Assert the flag.  Never blocks; the count saturates.
    pub fn signal(&self) {
        let _ = self
            .pending
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                Some(n.saturating_add(1))
            });
        self.wake.signal(());
    }

    /// Consume one pending assertion without waiting.
    pub fn try_take(&self) -> bool {
        self.pending
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .is_ok()
    }

    /// Assertions not yet consumed by a waiter.
    pub fn pending(&self) -> u32 {
        self.pending.load(Ordering::Acquire)
    }

    /// Wait for an assertion, at most `timeout`.
    ///
    /// An assertion that arrived before the call returns immediately.
    pub async fn wait(&self, timeout: WaitTimeout) -> WaitOutcome {
        let expiry = Expiry::start(timeout);
        loop {
            if self.try_take() {
                return WaitOutcome::Signaled;
            }
            let woken = future::or(
                async {
                    self.wake.wait().await;
                    true
                },
                async {
                    expiry.elapsed().await;
                    false
                },
            )
            .await;
            if !woken {
                // Anything that raced the timer stays latched for the next wait.
                return WaitOutcome::TimedOut;
            }
        }
    }
}
