//! Fixed-interval tick driver.
//!
//! Hosts with their own frame loop call `StateMachine::tick` themselves.
//! `Ticker` covers the common case of a tokio task that ticks on a fixed
//! period until the machine reaches a state of interest.

use crate::core::State;
use crate::dispatch::{StateMachine, TickError};
use std::time::Duration;
use thiserror::Error;
use tokio::time::MissedTickBehavior;
use tracing::trace;

/// Returned by [`Ticker::new`] for a zero period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Tick period must be non-zero")]
pub struct ZeroPeriodError;

/// Drives a [`StateMachine`] on a fixed period.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    period: Duration,
}

impl Ticker {
    /// Create a driver ticking every `period`.
    ///
    /// A zero period is rejected up front, since the underlying tokio
    /// interval would panic on it.
    pub fn new(period: Duration) -> Result<Self, ZeroPeriodError> {
        if period.is_zero() {
            return Err(ZeroPeriodError);
        }
        Ok(Self { period })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Tick until `done` holds for the current state after a tick.
    ///
    /// Returns the total number of transitions applied. A handler failure
    /// stops the driver and is returned as is; the caller decides whether
    /// to keep driving.
    pub async fn drive_until<S, F>(
        &self,
        machine: &mut StateMachine<S>,
        mut done: F,
    ) -> Result<usize, TickError>
    where
        S: State,
        F: FnMut(S) -> bool,
    {
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut applied = 0;
        loop {
            interval.tick().await;
            applied += machine.tick()?;
            let current = machine.current_state();
            if done(current) {
                trace!(state = current.name(), applied, "Driver finished");
                return Ok(applied);
            }
        }
    }
}
