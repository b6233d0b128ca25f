//! Applied-transition history.
//!
//! Keeps a bounded record of the transitions the driver has applied, oldest
//! first. Only the driver context writes it, so it needs no locking.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single applied transition.
///
/// `from` is the state that was current when the entry was dequeued, which
/// is the true predecessor (unlike the enqueue-time snapshot in the logs).
///
/// # Example
///
/// ```rust
/// use tickfsm::core::{AppliedTransition, State};
/// use serde::{Deserialize, Serialize};
/// use chrono::Utc;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Link {
///     Down,
///     Up,
/// }
///
/// impl State for Link {
///     fn name(&self) -> &str {
///         match self {
///             Self::Down => "Down",
///             Self::Up => "Up",
///         }
///     }
/// }
///
/// let applied = AppliedTransition {
///     sequence: 0,
///     from: Link::Down,
///     to: Link::Up,
///     applied_at: Utc::now(),
/// };
/// assert_eq!(applied.to, Link::Up);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct AppliedTransition<S: State> {
    /// Position of this transition among all applied transitions
    pub sequence: u64,
    /// The state that was current before this transition
    pub from: S,
    /// The state this transition made current
    pub to: S,
    /// When the driver dequeued the transition
    pub applied_at: DateTime<Utc>,
}

/// Bounded, ordered history of applied transitions.
///
/// Once `capacity` entries are held, recording a new one evicts the oldest.
/// A capacity of zero keeps only the running count.
///
/// # Example
///
/// ```rust
/// use tickfsm::core::{DispatchHistory, State};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Step { A, B, C }
///
/// impl State for Step {
///     fn name(&self) -> &str {
///         match self {
///             Self::A => "A",
///             Self::B => "B",
///             Self::C => "C",
///         }
///     }
/// }
///
/// let mut history = DispatchHistory::with_capacity(8);
/// history.record(Step::A, Step::B);
/// history.record(Step::B, Step::C);
///
/// assert_eq!(history.path(), vec![Step::A, Step::B, Step::C]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct DispatchHistory<S: State> {
    capacity: usize,
    recorded: u64,
    transitions: VecDeque<AppliedTransition<S>>,
}

impl<S: State> DispatchHistory<S> {
    /// Create an empty history holding at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            recorded: 0,
            transitions: VecDeque::with_capacity(capacity),
        }
    }

    /// Record a transition, returning its sequence number.
    pub fn record(&mut self, from: S, to: S) -> u64 {
        let sequence = self.recorded;
        self.recorded += 1;

        if self.capacity == 0 {
            return sequence;
        }
        if self.transitions.len() == self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(AppliedTransition {
            sequence,
            from,
            to,
            applied_at: Utc::now(),
        });
        sequence
    }

    /// Get the path of states traversed by the retained entries.
    ///
    /// Returns the `from` of the oldest retained entry followed by the `to`
    /// of every retained entry.
    pub fn path(&self) -> Vec<S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Time between the oldest and newest retained entries.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.applied_at
            .signed_duration_since(first.applied_at)
            .to_std()
            .ok()
    }

    /// Retained transitions, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &AppliedTransition<S>> {
        self.transitions.iter()
    }

    /// Most recently applied transition, if retained.
    pub fn last(&self) -> Option<&AppliedTransition<S>> {
        self.transitions.back()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Total transitions ever recorded, including evicted ones.
    pub fn total_recorded(&self) -> u64 {
        self.recorded
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
