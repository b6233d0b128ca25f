//! State machine that dispatches queued transitions on tick.

use crate::core::{DispatchHistory, Lifecycle, State};
use crate::dispatch::config::DispatcherConfig;
use crate::dispatch::error::{DuplicateHandlerError, HandlerError, TickError};
use crate::dispatch::handle::Transitioner;
use crate::dispatch::queue::TransitionQueue;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Callback run on the driver context when its state is dequeued.
pub type Handler = Box<dyn FnMut() -> Result<(), HandlerError> + Send>;

/// Queued state machine.
///
/// Producers request transitions through [`transition`](Self::transition)
/// or a [`Transitioner`] handle from any thread. The owner drives the
/// machine by calling [`tick`](Self::tick), which applies every pending
/// request in order and runs the matching handlers on the calling thread.
///
/// Handlers are registered with `&mut self`, so the table cannot change
/// while a tick is running. The dispatcher does not validate which state
/// may follow which, and treats no state as terminal.
pub struct StateMachine<S: State> {
    handle: Transitioner<S>,
    handlers: HashMap<S, Handler>,
    history: DispatchHistory<S>,
}

impl<S: State> StateMachine<S> {
    /// Create a machine whose current state is `initial`.
    pub fn new(initial: S) -> Self {
        Self::with_config(initial, DispatcherConfig::default())
    }

    pub fn with_config(initial: S, config: DispatcherConfig) -> Self {
        Self {
            handle: Transitioner::new(Arc::new(TransitionQueue::new(initial))),
            handlers: HashMap::new(),
            history: DispatchHistory::with_capacity(config.history_capacity),
        }
    }

    /// Register a handler for `state`.
    ///
    /// Fails if `state` already has one; the first registration is kept.
    /// The closure owns everything it captures.
    pub fn add_handler<F>(
        &mut self,
        state: S,
        mut handler: F,
    ) -> Result<(), DuplicateHandlerError>
    where
        F: FnMut() + Send + 'static,
    {
        self.add_fallible_handler(state, move || {
            handler();
            Ok(())
        })
    }

    /// Register a handler that may fail.
    ///
    /// An error aborts the running tick and is returned from it as a
    /// [`TickError`].
    pub fn add_fallible_handler<F>(
        &mut self,
        state: S,
        handler: F,
    ) -> Result<(), DuplicateHandlerError>
    where
        F: FnMut() -> Result<(), HandlerError> + Send + 'static,
    {
        match self.handlers.entry(state) {
            Entry::Occupied(_) => Err(DuplicateHandlerError {
                state: state.name().to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(Box::new(handler));
                Ok(())
            }
        }
    }

    pub fn has_handler(&self, state: S) -> bool {
        self.handlers.contains_key(&state)
    }

    /// Request a transition to `state`. Never waits for it to be applied.
    pub fn transition(&self, state: S) {
        self.handle.transition(state);
    }

    /// Handle for requesting transitions from other threads or handlers.
    pub fn transitioner(&self) -> Transitioner<S> {
        self.handle.clone()
    }

    /// Snapshot of the current state.
    pub fn current_state(&self) -> S {
        self.handle.current_state()
    }

    /// Number of requests waiting for the next tick.
    pub fn pending(&self) -> usize {
        self.handle.pending()
    }

    pub fn history(&self) -> &DispatchHistory<S> {
        &self.history
    }

    /// Apply every pending transition, running handlers on this thread.
    ///
    /// For each dequeued state the current state is updated first, then its
    /// handler (if any) runs. Transitions requested by handlers during this
    /// call are applied before it returns. A state without a handler is
    /// applied silently.
    ///
    /// Returns the number of transitions applied. If a handler fails the
    /// drain stops there and the error is returned; requests still queued
    /// are left for the next tick. A panicking handler unwinds through this
    /// call with the same effect on the queue.
    pub fn tick(&mut self) -> Result<usize, TickError> {
        let handlers = &mut self.handlers;
        let history = &mut self.history;

        self.handle.queue().drain_all(|from, state| {
            history.record(from, state);
            debug!(from = from.name(), state = state.name(), "Transitioned");

            let Some(handler) = handlers.get_mut(&state) else {
                return Ok(());
            };
            handler().map_err(|source| {
                warn!(state = state.name(), error = %source, "Handler failed");
                TickError {
                    state: state.name().to_string(),
                    source,
                }
            })
        })
    }
}

impl<S: Lifecycle> StateMachine<S> {
    /// Start the lifecycle by requesting the running state.
    pub fn run(&self) {
        self.transition(S::running());
    }
}

impl<S: Lifecycle> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::initial())
    }
}

impl<S: State> std::fmt::Debug for StateMachine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("handle", &self.handle)
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("history", &self.history.len())
            .finish()
    }
}
