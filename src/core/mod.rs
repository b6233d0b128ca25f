//! Core state types.
//!
//! This module contains the value types the dispatcher moves around:
//! - State definitions via the `State` and `Lifecycle` traits
//! - The `state_enum!` declaration macro
//! - Bounded history of applied transitions
//!
//! Nothing in this module locks or spawns; concurrency lives in `dispatch`.

mod history;
mod macros;
mod state;

pub use history::{AppliedTransition, DispatchHistory};
pub use state::{Lifecycle, State};
