//! Session client built on the dispatcher.
//!
//! Wires a [`StateMachine`](crate::dispatch::StateMachine) of
//! [`SessionState`] to three collaborators:
//!
//! - **Transport**: connect, send, and lifecycle events
//! - **Delay**: deferred, non-blocking continuations
//! - **IdentitySource**: the identifier sent after connecting
//!
//! The client connects shortly after starting, identifies itself once the
//! connection opens and finishes when the transport closes.

mod client;
mod collaborators;
mod config;
mod delay;
mod error;
mod identity;
mod state;

pub use client::SessionClient;
pub use collaborators::{
    Delay, DelayedAction, EventSink, IdentitySource, SendCallback, Transport, TransportEvent,
};
pub use config::SessionConfig;
pub use delay::TokioDelay;
pub use error::SessionError;
pub use identity::{identity_frame, InstanceIdentity};
pub use state::SessionState;
