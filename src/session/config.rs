//! Session client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing and identification settings for a
/// [`SessionClient`](crate::session::SessionClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Wait between entering `Running` and calling `connect`.
    pub connect_delay: Duration,
    /// Wait between entering `Connected` and sending the identity frame.
    pub identify_delay: Duration,
    /// Value of the `type` field in the identity frame.
    pub client_type: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            connect_delay: Duration::from_millis(100),
            identify_delay: Duration::from_millis(50),
            client_type: "unity".to_string(),
        }
    }
}

impl SessionConfig {
    pub fn with_connect_delay(mut self, delay: Duration) -> Self {
        self.connect_delay = delay;
        self
    }

    pub fn with_identify_delay(mut self, delay: Duration) -> Self {
        self.identify_delay = delay;
        self
    }

    pub fn with_client_type(mut self, client_type: impl Into<String>) -> Self {
        self.client_type = client_type.into();
        self
    }
}
