//! DelayedNotificationQueue: thread-safe deferred callback dispatch.
//!
//! Producers call [`register`](DelayedNotificationQueue::register) from any
//! thread when an operation completes. The progress loop periodically calls
//! [`process`](DelayedNotificationQueue::process), which takes the whole
//! pending set in one swap and invokes each callback with the lock released.
//!
//! # Locking
//!
//! The mutex guards the pending `Vec` and nothing else. It is held for a push
//! or a `mem::take`, never while a callback runs, so a callback may register
//! more work on the same queue without blocking. Such work is picked up by
//! the next drain.
//!
//! # Failure
//!
//! A panicking callback is not caught. The panic unwinds out of `process`
//! and the bindings left in that drain are dropped without running.

use std::fmt;
use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::callback::{CallbackBinding, NotificationCallback, SharedHandle};
use crate::diagnostics::{DiagnosticsSink, TracingSink};
use crate::request::NotificationRecord;

/// Queue whose data handles are notification records for requests of type `R`.
pub type RequestQueue<R> = DelayedNotificationQueue<Arc<NotificationRecord<R>>>;

/// Append-until-drained collection of callback bindings.
///
/// Share it between producers and the consumer through an `Arc`; the queue
/// itself is deliberately not `Clone`.
///
/// Bindings still pending when the queue is dropped are released without
/// their callbacks running. The diagnostics sink is told how many.
pub struct DelayedNotificationQueue<D: SharedHandle> {
    /// Pending bindings in registration order.
    pending: Mutex<Vec<CallbackBinding<D>>>,

    /// Mirror of `pending.len()`, updated under the lock.
    ///
    /// Lets `process` skip the lock when nothing is pending.
    pending_len: AtomicUsize,

    /// Where registration and dispatch events go.
    sink: Arc<dyn DiagnosticsSink>,
}

impl<D: SharedHandle> Default for DelayedNotificationQueue<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: SharedHandle> DelayedNotificationQueue<D> {
    /// Create an empty queue reporting to [`TracingSink`].
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    /// Create an empty queue reporting to `sink`.
    pub fn with_sink(sink: Arc<dyn DiagnosticsSink>) -> Self {
        Self {
            pending: Mutex::new(Vec::new()),
            pending_len: AtomicUsize::new(0),
            sink,
        }
    }

    /// Queue `callback` to be invoked with `data` on a later drain.
    ///
    /// `None` registers a no-op binding. Never blocks for longer than another
    /// thread's push or swap.
    pub fn register(&self, callback: Option<NotificationCallback<D>>, data: D) {
        let binding = CallbackBinding::new(callback, data);
        let callback_id = binding.callback_id();
        let data_id = binding.data_id();

        {
            let mut pending = self.lock_pending();
            pending.push(binding);
            self.pending_len.store(pending.len(), Ordering::Release);
        }

        self.sink.registered(callback_id, data_id);
    }

    /// Convenience wrapper around [`register`](Self::register) for closures.
    pub fn register_fn<F>(&self, callback: F, data: D)
    where
        F: Fn(D) + Send + Sync + 'static,
    {
        self.register(Some(Arc::new(callback)), data);
    }

    /// Drain the pending set and invoke every binding in registration order.
    ///
    /// Returns how many bindings this call took. Registrations that race
    /// with the swap land either in this drain or in the next one.
    pub fn process(&self) -> usize {
        if self.pending_len.load(Ordering::Acquire) == 0 {
            return 0;
        }

        let to_process = {
            let mut pending = self.lock_pending();
            self.pending_len.store(0, Ordering::Release);
            mem::take(&mut *pending)
        };

        // A concurrent drain may have won the swap.
        if to_process.is_empty() {
            return 0;
        }

        let count = to_process.len();
        self.sink.draining(count);

        for binding in to_process {
            self.sink.dispatching(binding.callback_id(), binding.data_id());

            let (callback, data) = binding.into_parts();
            if let Some(callback) = callback {
                callback(data);
            }
        }

        count
    }

    /// Number of bindings waiting for a drain.
    pub fn len(&self) -> usize {
        self.lock_pending().len()
    }

    /// Whether nothing is waiting for a drain.
    pub fn is_empty(&self) -> bool {
        self.lock_pending().is_empty()
    }

    fn lock_pending(&self) -> MutexGuard<'_, Vec<CallbackBinding<D>>> {
        // No user code runs under this lock, so a poisoned guard still holds
        // a consistent Vec.
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<D: SharedHandle> Drop for DelayedNotificationQueue<D> {
    fn drop(&mut self) {
        let leaked = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        if leaked > 0 {
            self.sink.pending_dropped(leaked);
        }
    }
}

impl<D: SharedHandle> fmt::Debug for DelayedNotificationQueue<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelayedNotificationQueue")
            .field("pending", &self.pending_len.load(Ordering::Acquire))
            .finish()
    }
}
