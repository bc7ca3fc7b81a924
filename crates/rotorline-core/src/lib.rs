//! Decoder core for the PRT-7 rotor-cipher line protocol
//!
//! Pure decoding state plus the session loop that drives it. The cipher
//! wheel, message accumulator, and session state machine do no I/O; the
//! transport trait is the only seam to the outside, so the whole decode
//! path runs deterministically against in-memory streams in tests.
//!
//! # Components
//!
//! - [`CipherWheel`]: rotating substitution cipher (offset arithmetic)
//! - [`DecodedMessage`]: ordered append-only plaintext accumulator
//! - [`Session`]: per-line state machine (dispatch, termination)
//! - [`SessionDriver`]: loop pumping a transport into a session
//! - [`LineTransport`]: line delivery contract, with
//!   [`IoLineTransport`] adapting any [`std::io::Read`] source

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod driver;
mod error;
mod message;
mod session;
mod transport;
mod wheel;

pub use driver::{DEFAULT_MAX_LINE_LEN, DriverConfig, SessionDriver};
pub use error::SessionError;
pub use message::DecodedMessage;
pub use session::{
    DEFAULT_MIN_COMMANDS, LineOutcome, Progress, Session, SessionConfig, SessionReport,
    SessionState,
};
pub use transport::{IoLineTransport, LineTransport, TransportError};
pub use wheel::CipherWheel;
