//! Tickfsm: a queued state machine dispatcher
//!
//! Producers on any thread request transitions; a single driver context
//! applies them in request order and runs the handler registered for each
//! state. Detecting an event (a socket callback on an I/O thread, a timer
//! firing) is decoupled from acting on it (business logic on one "main loop"
//! tick).
//!
//! # Core Concepts
//!
//! - **State**: Closed set of symbolic values via the `State` trait
//! - **TransitionQueue**: Lock-guarded FIFO plus the current-state field
//! - **StateMachine**: Handler table and the `tick()` entry point
//! - **Transitioner**: Cloneable producer handle usable from any thread
//!
//! # Example
//!
//! ```rust
//! use tickfsm::dispatch::StateMachine;
//! use tickfsm::state_enum;
//!
//! state_enum! {
//!     enum Phase {
//!         Idle,
//!         Working,
//!         Finished,
//!     }
//!     lifecycle: Idle => Working
//! }
//!
//! let mut machine = StateMachine::<Phase>::default();
//! let handle = machine.transitioner();
//! machine
//!     .add_handler(Phase::Working, move || handle.transition(Phase::Finished))
//!     .unwrap();
//!
//! machine.run();
//! assert_eq!(machine.current_state(), Phase::Idle);
//!
//! machine.tick().unwrap();
//! assert_eq!(machine.current_state(), Phase::Finished);
//! ```

pub mod core;
pub mod dispatch;
pub mod driver;
pub mod session;

// Re-export commonly used types
pub use crate::core::{AppliedTransition, DispatchHistory, Lifecycle, State};
pub use dispatch::{
    DispatcherConfig, DuplicateHandlerError, HandlerError, StateMachine, TickError,
    TransitionQueue, Transitioner,
};
