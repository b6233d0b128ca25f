//! Session client errors.

use crate::dispatch::DuplicateHandlerError;
use thiserror::Error;

/// Errors that can occur while wiring or using a session client.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session handlers already registered: {0}")]
    Registration(#[from] DuplicateHandlerError),

    #[error("Transport not connected or client not identified")]
    NotReady,

    #[error("No tokio runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}
