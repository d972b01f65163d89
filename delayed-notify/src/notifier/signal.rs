//! Wake-up signal shared between producers and the notifier thread.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Outcome of one [`NotifierSignal::wait`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitState {
    /// Work was signalled; the ready flag has been consumed.
    Ready,
    /// The period elapsed with nothing signalled.
    Timeout,
    /// Shutdown was requested.
    Shutdown,
}

#[derive(Debug, Default)]
struct SignalState {
    ready: bool,
    shutdown: bool,
}

/// Ready/shutdown flags plus a condvar to wait on them.
///
/// Several `notify` calls before a wait collapse into one `Ready`.
#[derive(Debug, Default)]
pub struct NotifierSignal {
    state: Mutex<SignalState>,
    condvar: Condvar,
}

impl NotifierSignal {
    /// Create a signal with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark work as ready and wake the waiter.
    pub fn notify(&self) {
        self.lock_state().ready = true;
        self.condvar.notify_all();
    }

    /// Request shutdown and wake the waiter. Sticky.
    pub fn shutdown(&self) {
        self.lock_state().shutdown = true;
        self.condvar.notify_all();
    }

    /// Whether shutdown has been requested.
    pub fn is_shutdown(&self) -> bool {
        self.lock_state().shutdown
    }

    /// Block until notified, shut down, or `period` elapses.
    ///
    /// Shutdown wins over a pending ready flag.
    pub fn wait(&self, period: Duration) -> WaitState {
        let guard = self.lock_state();
        let (mut state, _) = self
            .condvar
            .wait_timeout_while(guard, period, |state| !state.ready && !state.shutdown)
            .unwrap_or_else(PoisonError::into_inner);

        if state.shutdown {
            WaitState::Shutdown
        } else if state.ready {
            state.ready = false;
            WaitState::Ready
        } else {
            WaitState::Timeout
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SignalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
