//! Errors raised by handler registration and dispatch.

use std::error::Error as StdError;
use thiserror::Error;

/// A handler was already registered for this state.
///
/// The earlier registration stays active.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Handler already registered for state '{state}'")]
pub struct DuplicateHandlerError {
    pub state: String,
}

/// Failure reported by a fallible handler.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct HandlerError(Box<dyn StdError + Send + Sync>);

impl HandlerError {
    /// Wrap any error type.
    pub fn new<E>(error: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Self(error.into())
    }

    /// Build an error from a message.
    pub fn msg(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self(message.into())
    }

    /// Borrow the wrapped error.
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.0.as_ref()
    }
}

/// A handler failed while `tick()` was draining.
///
/// The drain stopped at `state`; anything still queued stays queued for the
/// next tick.
#[derive(Debug, Error)]
#[error("Handler for state '{state}' failed: {source}")]
pub struct TickError {
    pub state: String,
    pub source: HandlerError,
}
