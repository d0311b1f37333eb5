//! Control channel: command dispatcher → indicator controller.
//!
//! Wraps an `embassy-sync` bounded channel so the dispatcher thread and
//! the controller task can share it from a `static` without heap
//! allocation.  On top of the raw queue it adds timed receive and a
//! permanent shutdown.
//!
//! ```text
//! ┌──────────────┐  try_publish   ┌───────────┐  receive(timeout)  ┌──────────────┐
//! │  Dispatcher  │───────────────▶│ [ E ; 2 ] │───────────────────▶│  Controller  │
//! │  (thread)    │     close      └───────────┘  Event/TimedOut/   │  (async)     │
//! └──────────────┘                                Closed           └──────────────┘
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use futures_lite::future;

use super::timeout::{WaitTimeout, with_timeout};
use crate::config::CONTROL_DEPTH;
use crate::error::ChannelError;

/// Result of [`ControlChannel::receive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Received<E> {
    /// The next event, in publication order.
    Event(E),
    /// The timeout elapsed with nothing queued.
    TimedOut,
    /// The channel was shut down and every queued event has been delivered.
    Closed,
}

/// Bounded FIFO of control events with one producer and one consumer.
pub struct ControlChannel<E> {
    queue: Channel<CriticalSectionRawMutex, E, CONTROL_DEPTH>,
    closed: AtomicBool,
    shutdown: Signal<CriticalSectionRawMutex, ()>,
}

impl<E> Default for ControlChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> ControlChannel<E> {
    pub const fn new() -> Self {
        Self {
            queue: Channel::new(),
            closed: AtomicBool::new(false),
            shutdown: Signal::new(),
        }
    }

    /// Queue `event`, suspending until a slot is free.
    ///
    /// A publisher already waiting for space is not woken by [`close`];
    /// only the producer closes the channel, so it never races itself.
    ///
    /// [`close`]: Self::close
    pub async fn publish(&self, event: E) -> Result<(), ChannelError> {
        if self.is_closed() {
            return Err(ChannelError::Closed);
        }
        self.queue.send(event).await;
        Ok(())
    }

    /// Queue `event` without suspending.
    pub fn try_publish(&self, event: E) -> Result<(), ChannelError> {
        if self.is_closed() {
            return Err(ChannelError::Closed);
        }
        self.queue.try_send(event).map_err(|_| ChannelError::Full)
    }

    /// Take the next event, waiting at most `timeout`.
    ///
    /// Events published before [`close`](Self::close) are still delivered;
    /// `Closed` is reported only once the queue is empty.
    pub async fn receive(&self, timeout: WaitTimeout) -> Received<E> {
        if let Ok(event) = self.queue.try_receive() {
            return Received::Event(event);
        }
        if self.is_closed() {
            return Received::Closed;
        }

        let next = future::or(async { Received::Event(self.queue.receive().await) }, async {
            self.shutdown.wait().await;
            Received::Closed
        });
        with_timeout(timeout, next).await.unwrap_or(Received::TimedOut)
    }

    /// Shut the channel down permanently and wake a waiting receiver.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.shutdown.signal(());
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Number of queued events.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
