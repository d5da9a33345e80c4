// ABOUTME: Countdown wait group used as the dinner's completion barrier.
// ABOUTME: Armed with the number of philosophers; each one checks out exactly once.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

/// A countdown barrier.
///
/// The owner arms it with [`WaitGroup::add`], every participant calls
/// [`WaitGroup::done`] once, and [`WaitGroup::wait`] resolves when the count
/// reaches zero. A participant that never checks out keeps `wait` pending
/// forever.
#[derive(Debug, Default)]
pub struct WaitGroup {
    remaining: AtomicUsize,
    zero: Notify,
}

impl WaitGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect `n` more calls to [`WaitGroup::done`].
    pub fn add(&self, n: usize) {
        self.remaining.fetch_add(n, Ordering::SeqCst);
    }

    /// Check out one participant.
    pub fn done(&self) {
        match self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        {
            Ok(1) => self.zero.notify_waiters(),
            Ok(_) => {}
            Err(_) => tracing::warn!("wait group checked out more times than it was armed"),
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::SeqCst)
    }

    /// Wait until every participant has checked out.
    pub async fn wait(&self) {
        loop {
            let notified = self.zero.notified();
            tokio::pin!(notified);
            // Register before reading the count so a concurrent `done` can't slip past.
            notified.as_mut().enable();

            if self.remaining() == 0 {
                return;
            }
            notified.await;
        }
    }
}
