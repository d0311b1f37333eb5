//! Suspension-point timeouts.
//!
//! Every wait in the system names its bound explicitly: a finite
//! [`WaitTimeout::After`] or the [`WaitTimeout::Forever`] sentinel.  The
//! bound is converted once into an absolute [`Expiry`], so a wait that is
//! woken and re-armed never stretches past the original deadline.

use core::future::Future;
use core::time::Duration;
use std::time::Instant;

use futures_lite::future;

/// Upper bound on a single suspension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitTimeout {
    /// Give up after this long.
    After(Duration),
    /// Wait until woken, however long that takes.
    Forever,
}

impl From<Duration> for WaitTimeout {
    fn from(d: Duration) -> Self {
        Self::After(d)
    }
}

/// Absolute expiry of a [`WaitTimeout`], fixed when the wait begins.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Expiry(Option<Instant>);

impl Expiry {
    pub(crate) fn start(timeout: WaitTimeout) -> Self {
        match timeout {
            WaitTimeout::After(d) => Self(Instant::now().checked_add(d)),
            WaitTimeout::Forever => Self(None),
        }
    }

    /// Resolves once the expiry has passed; never resolves for `Forever`.
    pub(crate) async fn elapsed(&self) {
        let Some(at) = self.0 else {
            return future::pending().await;
        };
        loop {
            let now = Instant::now();
            if now >= at {
                return;
            }
            async_io_mini::Timer::after(at - now).await;
        }
    }
}

/// Run `fut` until it completes or `timeout` elapses.
///
/// `fut` is polled first on every wake, so a result that is ready at the
/// same moment as the timer wins.
pub(crate) async fn with_timeout<T>(
    timeout: WaitTimeout,
    fut: impl Future<Output = T>,
) -> Option<T> {
    let expiry = Expiry::start(timeout);
    future::or(async { Some(fut.await) }, async {
        expiry.elapsed().await;
        None
    })
    .await
}
