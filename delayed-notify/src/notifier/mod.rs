//! Background thread that drains a queue when signalled.
//!
//! The [`Notifier`] owns one OS thread that loops on
//! [`NotifierSignal::wait`]:
//!
//! ```text
//!            notify()                 period elapsed
//!   ┌──────────────────────┐      ┌───────────────────┐
//!   ▼                      │      ▼                   │
//! ┌──────┐  Ready   ┌──────┴──┐  Timeout  ┌──────────┴┐
//! │ wait ├─────────►│ process │  ◄────────┤ wait again│
//! └──┬───┘          └─────────┘           └───────────┘
//!    │ Shutdown
//!    ▼
//! ┌──────────────────────┐
//! │ final process, exit  │
//! └──────────────────────┘
//! ```
//!
//! Producers register on the queue and then call [`Notifier::notify`] (or
//! `notify` on a cloned [`NotifierSignal`]) so the thread drains promptly.
//! A timeout alone does not drain.
//!
//! # Configuration
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use delayed_notify::{DelayedNotificationQueue, Notifier, NotifierConfig};
//!
//! let queue: Arc<DelayedNotificationQueue<Arc<u32>>> = Arc::new(DelayedNotificationQueue::new());
//! let notifier = Notifier::spawn(
//!     Arc::clone(&queue),
//!     NotifierConfig::new(Duration::from_millis(50)).with_thread_name("progress"),
//! )?;
//!
//! queue.register_fn(|value| assert_eq!(*value, 7), Arc::new(7));
//! notifier.notify();
//! notifier.shutdown()?;
//! assert!(queue.is_empty());
//! # Ok::<(), delayed_notify::NotifierError>(())
//! ```

mod config;
mod error;
mod signal;

pub use config::NotifierConfig;
pub use error::{NotifierError, NotifierResult};
pub use signal::{NotifierSignal, WaitState};

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::callback::SharedHandle;
use crate::queue::DelayedNotificationQueue;

/// Handle to a running notifier thread.
///
/// Dropping it requests shutdown and joins the thread.
#[derive(Debug)]
pub struct Notifier {
    name: String,
    signal: Arc<NotifierSignal>,
    thread: Option<JoinHandle<()>>,
}

impl Notifier {
    /// Start a thread that drains `queue` whenever it is notified.
    pub fn spawn<D: SharedHandle>(
        queue: Arc<DelayedNotificationQueue<D>>,
        config: NotifierConfig,
    ) -> NotifierResult<Self> {
        let signal = Arc::new(NotifierSignal::new());
        let thread_signal = Arc::clone(&signal);
        let period = config.period;

        let thread = thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || run_notifier(&queue, &thread_signal, period))
            .map_err(|source| NotifierError::Spawn {
                name: config.thread_name.clone(),
                source,
            })?;

        Ok(Self {
            name: config.thread_name,
            signal,
            thread: Some(thread),
        })
    }

    /// Wake the thread so it drains the queue.
    pub fn notify(&self) {
        self.signal.notify();
    }

    /// Signal shared with the thread, for producers that outlive this handle's borrow.
    pub fn signal(&self) -> Arc<NotifierSignal> {
        Arc::clone(&self.signal)
    }

    /// Whether the thread is still running.
    pub fn is_running(&self) -> bool {
        self.thread
            .as_ref()
            .is_some_and(|thread| !thread.is_finished())
    }

    /// Request shutdown, wait for the final drain, and join the thread.
    pub fn shutdown(mut self) -> NotifierResult<()> {
        self.stop()
    }

    fn stop(&mut self) -> NotifierResult<()> {
        self.signal.shutdown();
        match self.thread.take() {
            Some(thread) => thread.join().map_err(|_| NotifierError::ThreadPanicked {
                name: self.name.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        if let Err(error) = self.stop() {
            tracing::warn!(%error, "notifier stopped abnormally");
        }
    }
}

fn run_notifier<D: SharedHandle>(
    queue: &DelayedNotificationQueue<D>,
    signal: &NotifierSignal,
    period: Duration,
) {
    tracing::debug!(period_ms = period.as_millis() as u64, "starting notifier thread");

    loop {
        match signal.wait(period) {
            WaitState::Ready => {
                queue.process();
            }
            WaitState::Timeout => continue,
            WaitState::Shutdown => {
                let flushed = queue.process();
                tracing::debug!(flushed, "notifier thread shutting down");
                return;
            }
        }
    }
}
