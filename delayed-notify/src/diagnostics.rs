//! Diagnostics hooks for queue activity.
//!
//! The queue reports what it does through a [`DiagnosticsSink`] it owns,
//! instead of calling a global logger. [`TracingSink`] is the default and
//! forwards everything to `tracing`; [`NoopSink`] discards events. Tests can
//! plug in their own sink to observe registrations and dispatches.

use crate::callback::HandleId;

/// Receives queue events. Every method defaults to doing nothing.
///
/// Called outside the queue lock, possibly from several threads at once.
pub trait DiagnosticsSink: Send + Sync {
    /// A binding was appended to the pending set.
    fn registered(&self, callback: Option<HandleId>, data: HandleId) {
        let _ = (callback, data);
    }

    /// A drain took `count` bindings out of the pending set.
    fn draining(&self, count: usize) {
        let _ = count;
    }

    /// A drained binding is about to be invoked.
    fn dispatching(&self, callback: Option<HandleId>, data: HandleId) {
        let _ = (callback, data);
    }

    /// The queue was dropped with `count` bindings that never ran.
    fn pending_dropped(&self, count: usize) {
        let _ = count;
    }
}

/// Forwards queue events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn registered(&self, callback: Option<HandleId>, data: HandleId) {
        tracing::trace!(callback = ?callback, data = %data, "registered delayed notification");
    }

    fn draining(&self, count: usize) {
        tracing::debug!(count, "submitting delayed notifications");
    }

    fn dispatching(&self, callback: Option<HandleId>, data: HandleId) {
        tracing::trace!(callback = ?callback, data = %data, "submitting delayed notification");
    }

    fn pending_dropped(&self, count: usize) {
        tracing::warn!(
            count,
            "delayed notification queue dropped with pending callbacks"
        );
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticsSink for NoopSink {}
