//! Producer handle for requesting transitions from any thread.

use crate::core::State;
use crate::dispatch::queue::TransitionQueue;
use std::sync::Arc;
use tracing::debug;

/// Cloneable handle that requests transitions on a shared queue.
///
/// Handlers, transport callbacks and timer continuations capture a clone of
/// this by value. Requests never wait for the transition to take effect.
pub struct Transitioner<S: State> {
    queue: Arc<TransitionQueue<S>>,
}

impl<S: State> Transitioner<S> {
    pub(crate) fn new(queue: Arc<TransitionQueue<S>>) -> Self {
        Self { queue }
    }

    pub(crate) fn queue(&self) -> &TransitionQueue<S> {
        &self.queue
    }

    /// Request a transition to `state`.
    ///
    /// The logged `from` is whatever was current when the request was
    /// queued. Other requests ahead of this one may change the current state
    /// before it is applied, so `from` is not a guaranteed predecessor.
    pub fn transition(&self, state: S) {
        let from = self.queue.enqueue(state);
        debug!(from = from.name(), to = state.name(), "Queued transition");
    }

    /// Snapshot of the current state; see [`TransitionQueue::current_state`].
    pub fn current_state(&self) -> S {
        self.queue.current_state()
    }

    /// Number of requests waiting for the next tick.
    pub fn pending(&self) -> usize {
        self.queue.pending()
    }
}

impl<S: State> Clone for Transitioner<S> {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
        }
    }
}

impl<S: State> std::fmt::Debug for Transitioner<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transitioner")
            .field("queue", &self.queue)
            .finish()
    }
}
