//! # Delayed Notify
//!
//! Deferred completion notifications for networking progress loops.
//!
//! Completion of an asynchronous send or receive can be observed on a
//! different thread than the one that issued it. Instead of running user
//! callbacks from inside the progress loop, completion handlers register a
//! `(callback, data)` pair with a [`DelayedNotificationQueue`]. A controlled
//! point of the progress cycle later calls [`DelayedNotificationQueue::process`],
//! which swaps the pending set out under the lock and runs every callback
//! with the lock released.
//!
//! ```text
//! ┌─────────────────────┐  register()   ┌──────────────────────────┐
//! │ completion handlers ├──────────────►│ DelayedNotificationQueue │
//! │ (any thread)        │               │  Mutex<Vec<Binding>>     │
//! └─────────────────────┘               └────────────┬─────────────┘
//!                                                    │ process(): swap, unlock,
//!                                                    ▼ then invoke in FIFO order
//!                                       ┌──────────────────────────┐
//!                                       │ progress loop / Notifier │
//!                                       └──────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use delayed_notify::{
//!     BufferAddress, EndpointHandle, NotificationRecord, RequestQueue, WorkerHandle,
//! };
//!
//! struct Request;
//!
//! let queue: RequestQueue<Request> = RequestQueue::new();
//! let payload = [0u8; 16];
//! let record = Arc::new(NotificationRecord::new(
//!     WorkerHandle::new(1),
//!     EndpointHandle::new(7),
//!     Arc::new(Request),
//!     true,
//!     BufferAddress::of(&payload),
//!     payload.len(),
//! ));
//!
//! queue.register_fn(|record| assert!(record.is_send()), record);
//! assert_eq!(queue.process(), 1);
//! assert!(queue.is_empty());
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]

// =============================================================================
// Modules
// =============================================================================

/// Callback bindings and shared handle identities.
pub mod callback;

/// Injected diagnostics hooks for queue activity.
pub mod diagnostics;

/// Background thread that drains a queue on demand.
pub mod notifier;

/// The deferred notification queue.
pub mod queue;

/// Immutable snapshots of in-flight communication requests.
pub mod request;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use callback::{CallbackBinding, HandleId, NotificationCallback, SharedHandle};
pub use diagnostics::{DiagnosticsSink, NoopSink, TracingSink};
pub use notifier::{
    Notifier, NotifierConfig, NotifierError, NotifierResult, NotifierSignal, WaitState,
};
pub use queue::{DelayedNotificationQueue, RequestQueue};
pub use request::{BufferAddress, Direction, EndpointHandle, NotificationRecord, Tag, WorkerHandle};
