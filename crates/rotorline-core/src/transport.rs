//! Line delivery from the device.
//!
//! The session loop consumes lines through [`LineTransport`] and never
//! sees bytes, timeouts, or file descriptors. [`IoLineTransport`] adapts
//! any [`Read`] source (a configured serial device node, stdin, a capture
//! file, an in-memory cursor in tests) into that contract, one byte at a
//! time, the way the device actually transmits.

use std::io::{self, Read};

use thiserror::Error;

/// Transport failure.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The byte stream ended; no further lines will ever arrive.
    #[error("end of stream")]
    Closed,
}

/// One-line-at-a-time delivery contract.
///
/// `next_line` has three outcomes:
///
/// - `Ok(Some(line))`: one line, terminator and all `\r` bytes removed;
///   may be a partial line if the read failed mid-transmission.
/// - `Ok(None)`: no complete line within the transport's own waiting
///   policy; the caller just tries again.
/// - `Err(_)`: the transport is permanently unusable; the session loop
///   stops.
pub trait LineTransport {
    /// Whether the transport can still deliver lines.
    fn is_usable(&self) -> bool;

    /// Wait for the next line, capped at `max_len` bytes including the
    /// terminator slot.
    ///
    /// # Errors
    ///
    /// Returns an error only when the transport is permanently unusable.
    fn next_line(&mut self, max_len: usize) -> Result<Option<String>, TransportError>;
}

/// Byte-to-line accumulator over any reader.
///
/// Reads one byte at a time and assembles lines under these rules:
///
/// - `\r` is dropped wherever it appears;
/// - `\n` completes the line only if at least one character has
///   accumulated; runs of blank lines are absorbed silently;
/// - a line reaching `max_len - 1` characters is returned complete, and
///   the overflow bytes start the next line;
/// - a timed-out read with nothing accumulated yields `Ok(None)`; with a
///   partial line it keeps waiting for the rest;
/// - a failed read with a partial line yields that partial line as a
///   success, and with nothing accumulated yields `Ok(None)` so the
///   caller retries;
/// - end of stream flushes any partial line, then reports
///   [`TransportError::Closed`] and turns unusable.
///
/// Bytes are taken as Latin-1: the protocol is ASCII and the device has
/// no notion of multi-byte characters.
#[derive(Debug)]
pub struct IoLineTransport<R> {
    reader: R,
    usable: bool,
}

impl<R: Read> IoLineTransport<R> {
    /// Wrap an already-opened reader.
    pub fn new(reader: R) -> Self {
        Self { reader, usable: true }
    }
}

impl<R: Read> LineTransport for IoLineTransport<R> {
    fn is_usable(&self) -> bool {
        self.usable
    }

    fn next_line(&mut self, max_len: usize) -> Result<Option<String>, TransportError> {
        if !self.usable {
            return Err(TransportError::Closed);
        }

        // One slot is reserved for the terminator, and a cap below one
        // character could never make progress.
        let cap = max_len.saturating_sub(1).max(1);

        let mut line = String::new();
        let mut captured = 0usize;
        let mut byte = [0u8; 1];

        while captured < cap {
            match self.reader.read(&mut byte) {
                Ok(0) => {
                    self.usable = false;
                    if line.is_empty() {
                        return Err(TransportError::Closed);
                    }
                    return Ok(Some(line));
                },
                Ok(_) => match byte[0] {
                    b'\r' => {},
                    b'\n' => {
                        if !line.is_empty() {
                            return Ok(Some(line));
                        }
                        // Blank line: absorb and keep reading.
                    },
                    other => {
                        line.push(char::from(other));
                        captured += 1;
                    },
                },
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {},
                Err(e)
                    if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) =>
                {
                    if line.is_empty() {
                        return Ok(None);
                    }
                    // The sender paused mid-line; wait for the rest.
                },
                Err(_) => {
                    if line.is_empty() {
                        return Ok(None);
                    }
                    // A partial line is still a line; the failure itself
                    // is not escalated.
                    return Ok(Some(line));
                },
            }
        }

        Ok(Some(line))
    }
}
