//! Configuration for the notifier thread.

use std::time::Duration;

/// Configuration for a [`Notifier`](super::Notifier).
#[derive(Clone, Debug)]
pub struct NotifierConfig {
    /// How long one wait lasts before reporting a timeout and waiting again.
    pub period: Duration,

    /// Name given to the spawned OS thread.
    pub thread_name: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
            thread_name: "delayed-notifier".to_string(),
        }
    }
}

impl NotifierConfig {
    /// Create a configuration with the given wait period.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            ..Self::default()
        }
    }

    /// Override the wait period.
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Override the thread name.
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }
}
