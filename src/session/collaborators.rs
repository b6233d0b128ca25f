//! Capability contracts the session client needs from its environment.
//!
//! None of these are implemented by the dispatcher itself. Callbacks passed
//! to them may fire on any thread; the session wiring only ever turns them
//! into transition requests or log records.

use std::sync::Arc;
use std::time::Duration;

/// Connection lifecycle events reported by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The connection is open.
    Opened,
    /// A text frame arrived.
    Message(String),
    /// The connection closed.
    Closed { reason: String },
}

/// Receiver for transport events.
pub type EventSink = Arc<dyn Fn(TransportEvent) + Send + Sync>;

/// Completion callback for [`Transport::send`]; receives whether the send
/// succeeded.
pub type SendCallback = Box<dyn FnOnce(bool) + Send>;

/// Deferred action run by a [`Delay`].
pub type DelayedAction = Box<dyn FnOnce() + Send>;

/// Message transport such as a websocket client.
pub trait Transport: Send + Sync + 'static {
    /// Register the receiver for lifecycle events.
    fn subscribe(&self, sink: EventSink);

    /// Start connecting. Completion is reported as [`TransportEvent::Opened`].
    fn connect(&self);

    /// Send a text frame, reporting the outcome to `on_complete`.
    fn send(&self, payload: String, on_complete: SendCallback);

    fn is_connected(&self) -> bool;
}

/// Runs an action once after a delay without blocking the caller.
pub trait Delay: Send + Sync + 'static {
    fn schedule(&self, after: Duration, action: DelayedAction);
}

/// Stable identifier of the running instance.
pub trait IdentitySource: Send + Sync + 'static {
    fn identity(&self) -> String;
}
