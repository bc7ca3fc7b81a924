//! Fuzz target for the byte transport and the full decode loop
//!
//! Drive raw bytes through line capture, parsing and dispatch end to end
//! (HIGH priority)
//!
//! # Strategy
//!
//! - Arbitrary byte streams: embedded `\r` and `\n`, NULs, invalid UTF-8,
//!   lines far past the capture limit, and streams that end mid-line
//! - Capture limit fuzzed across 0..=255 to hit the degenerate caps
//! - Termination threshold fuzzed across 1..=8
//!
//! # Invariants
//!
//! - The loop MUST return: either a report or a closed-transport error,
//!   never a hang or a panic
//! - A report implies the threshold was met and the session terminated
//! - The only reachable failure on an in-memory stream is `Closed`
//! - Wheel offset stays below 26 whatever bytes arrived

#![no_main]

use std::io::Cursor;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rotorline_core::{
    DriverConfig, IoLineTransport, Session, SessionConfig, SessionDriver, SessionError,
    SessionState, TransportError,
};

#[derive(Debug, Arbitrary)]
struct StreamInput {
    min_commands: u8,
    max_line_len: u8,
    bytes: Vec<u8>,
}

fuzz_target!(|input: StreamInput| {
    let threshold = usize::from(input.min_commands % 8) + 1;

    let transport = IoLineTransport::new(Cursor::new(input.bytes));
    let session = Session::new(SessionConfig { min_commands: threshold });
    let config = DriverConfig { max_line_len: usize::from(input.max_line_len) };
    let mut driver = SessionDriver::new(transport, session, config);

    match driver.run() {
        Ok(report) => {
            assert!(report.commands_dispatched >= threshold);
            assert_eq!(report.message.chars().count(), report.message_len.saturating_mul(3));
            assert_eq!(driver.session().state(), SessionState::Terminated);
        },
        Err(error) => {
            assert!(matches!(error, SessionError::Transport(TransportError::Closed)));
        },
    }

    assert!(driver.session().wheel_offset() < 26);
});
