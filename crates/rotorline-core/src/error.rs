//! Session-level errors.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors that end a session run.
///
/// Per-line problems (malformed packets, wire noise) are ordinary
/// outcomes handled inside the loop; only transport loss surfaces here.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// The transport was not usable when the session started.
    #[error("transport not usable at session start")]
    TransportUnavailable,

    /// The transport became permanently unusable mid-session.
    #[error("transport lost: {0}")]
    Transport(#[from] TransportError),
}
