//! Queued transition dispatch.
//!
//! This module is the concurrent part of the crate:
//! - `TransitionQueue`: one lock around the pending FIFO and current state
//! - `Transitioner`: cloneable producer handle, usable from any thread
//! - `StateMachine`: handler table plus the driver-only `tick()`
//!
//! # Threading contract
//!
//! Any number of threads may request transitions at any time, including
//! while a tick is running. Exactly one owner calls `tick()`, and handlers
//! run there one at a time with the queue lock released. Handlers should
//! not block; long waits belong to a delay collaborator that requests the
//! next transition when it fires.

mod config;
mod error;
mod handle;
mod machine;
mod queue;

pub use config::{DispatcherConfig, DEFAULT_HISTORY_CAPACITY};
pub use error::{DuplicateHandlerError, HandlerError, TickError};
pub use handle::Transitioner;
pub use machine::{Handler, StateMachine};
pub use queue::TransitionQueue;
