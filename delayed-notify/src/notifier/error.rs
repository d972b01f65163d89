//! Error types for notifier operations.

use std::io;
use thiserror::Error;

/// Errors that can occur while running a notifier thread.
#[derive(Error, Debug)]
pub enum NotifierError {
    /// The OS refused to start the thread.
    #[error("failed to spawn notifier thread {name}: {source}")]
    Spawn {
        /// Configured thread name.
        name: String,
        /// Underlying spawn failure.
        #[source]
        source: io::Error,
    },

    /// A callback panicked on the notifier thread.
    #[error("notifier thread {name} panicked")]
    ThreadPanicked {
        /// Configured thread name.
        name: String,
    },
}

/// Result type for notifier operations.
pub type NotifierResult<T> = Result<T, NotifierError>;
