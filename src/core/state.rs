//! Core State trait for dispatcher states.
//!
//! States are small value types. The dispatcher copies them into its queue,
//! compares them for handler lookup and names them in log records.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// States represent immutable values describing a phase of a session's
/// lifecycle. The dispatcher places no constraints on which state may follow
/// which: any state may be requested from any other.
///
/// # Required Traits
///
/// - `Copy`: States are moved through the queue by value
/// - `Eq` + `Hash`: States key the handler table
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States appear in the serializable history
/// - `Send` + `Sync`: States cross from producer threads to the driver
///
/// # Example
///
/// ```rust
/// use tickfsm::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum LinkState {
///     Down,
///     Up,
/// }
///
/// impl State for LinkState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Down => "Down",
///             Self::Up => "Up",
///         }
///     }
/// }
///
/// assert_eq!(LinkState::Up.name(), "Up");
/// ```
pub trait State:
    Copy + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

/// States that know where a session begins.
///
/// `initial` is the state a fresh machine reports before anything has been
/// dispatched. `running` is the state requested by `StateMachine::run`.
/// Neither is treated specially by the dispatcher beyond that.
pub trait Lifecycle: State {
    /// State a new machine starts in.
    fn initial() -> Self;

    /// State requested when the lifecycle is started.
    fn running() -> Self;
}
