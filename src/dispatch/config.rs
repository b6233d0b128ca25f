//! Dispatcher configuration.

use serde::{Deserialize, Serialize};

/// Default number of applied transitions kept for diagnostics.
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// Configuration for [`StateMachine`](crate::dispatch::StateMachine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Applied transitions retained in the history ring. Zero disables it.
    pub history_capacity: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl DispatcherConfig {
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}
