//! Lock-guarded transition queue.

use crate::core::State;
use parking_lot::Mutex;
use std::collections::VecDeque;

struct Inner<S> {
    current: S,
    pending: VecDeque<S>,
}

/// FIFO of requested states plus the current-state field.
///
/// Every mutation happens under one lock. The current state is the most
/// recently *dequeued* entry, not the most recently requested one: a request
/// changes nothing observable until the driver drains it.
///
/// The queue is unbounded and applies no backpressure.
pub struct TransitionQueue<S: State> {
    inner: Mutex<Inner<S>>,
}

impl<S: State> TransitionQueue<S> {
    pub fn new(initial: S) -> Self {
        Self {
            inner: Mutex::new(Inner {
                current: initial,
                pending: VecDeque::new(),
            }),
        }
    }

    /// Append `state`, returning the current state observed under the lock.
    ///
    /// Safe to call from any thread, including from inside a handler that
    /// is being run by [`drain_all`](Self::drain_all). The returned state is
    /// a snapshot only; other entries may be applied before this one.
    pub fn enqueue(&self, state: S) -> S {
        let mut inner = self.inner.lock();
        inner.pending.push_back(state);
        inner.current
    }

    /// Dequeue and visit entries until the queue is observed empty.
    ///
    /// Each iteration pops the front entry and makes it current under the
    /// lock, then calls `visit(previous, state)` with the lock released, so
    /// the visitor may enqueue without deadlocking. Entries enqueued during
    /// the drain are visited before this returns. The current state is
    /// updated before the visitor runs.
    ///
    /// An `Err` from the visitor stops the drain; the failing entry has
    /// already been consumed and later entries stay queued. Returns the
    /// number of entries visited.
    ///
    /// Only the driver context may call this, and never concurrently with
    /// itself.
    pub fn drain_all<E, F>(&self, mut visit: F) -> Result<usize, E>
    where
        F: FnMut(S, S) -> Result<(), E>,
    {
        let mut visited = 0;
        while let Some((previous, state)) = self.pop() {
            visited += 1;
            visit(previous, state)?;
        }
        Ok(visited)
    }

    fn pop(&self) -> Option<(S, S)> {
        let mut inner = self.inner.lock();
        let state = inner.pending.pop_front()?;
        let previous = std::mem::replace(&mut inner.current, state);
        Some((previous, state))
    }

    /// Snapshot of the current state.
    ///
    /// Eventually consistent: while a drain is in progress this may already
    /// name a state whose handler has not finished (or started).
    pub fn current_state(&self) -> S {
        self.inner.lock().current
    }

    /// Number of requests not yet dequeued.
    pub fn pending(&self) -> usize {
        self.inner.lock().pending.len()
    }
}

impl<S: State> std::fmt::Debug for TransitionQueue<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("TransitionQueue")
            .field("current", &inner.current)
            .field("pending", &inner.pending)
            .finish()
    }
}
