//! Tokio-backed delay.

use crate::session::collaborators::{Delay, DelayedAction};
use crate::session::error::SessionError;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::trace;

/// [`Delay`] that spawns a sleeping task on a tokio runtime.
///
/// Each scheduled action runs exactly once, on a runtime worker, after its
/// duration elapses. Dropping the `TokioDelay` does not cancel anything
/// already scheduled.
#[derive(Debug, Clone)]
pub struct TokioDelay {
    runtime: Handle,
}

impl TokioDelay {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Use the runtime of the calling context.
    pub fn try_current() -> Result<Self, SessionError> {
        Ok(Self::new(Handle::try_current()?))
    }
}

impl Delay for TokioDelay {
    fn schedule(&self, after: Duration, action: DelayedAction) {
        self.runtime.spawn(async move {
            trace!(?after, "Delay task started, sleeping");
            tokio::time::sleep(after).await;
            trace!(?after, "Delay elapsed, running action");
            action();
        });
    }
}
