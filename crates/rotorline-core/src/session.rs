//! Decoding session state machine.
//!
//! Owns the cipher wheel and the message under assembly, consumes one
//! trimmed line at a time, and decides when the transmission is over.
//! Pure: no I/O, no logging. The driver feeds it lines and acts on the
//! outcomes, which keeps every protocol decision unit-testable without a
//! transport.
//!
//! # State Machine
//!
//! ```text
//! ┌─────────┐  termination signal, >= min_commands dispatched  ┌────────────┐
//! │ Running │─────────────────────────────────────────────────>│ Terminated │
//! └─────────┘                                                  └────────────┘
//!      │ ↑
//!      └─┘ dispatch / malformed / noise
//! ```
//!
//! A command line is always dispatched first and counted, then the raw
//! line is checked for the termination signal. The signal line itself
//! counts toward the minimum, so a run of seven commands followed by a
//! negative rotation terminates.

use rotorline_proto::{Command, ParseError, has_command_tag, is_termination};

use crate::{message::DecodedMessage, wheel::CipherWheel};

/// Commands that must be dispatched before a termination signal is honored.
///
/// Shorter transmissions are assumed to be noise or an incomplete replay;
/// early signals are dispatched like any rotation and otherwise ignored.
pub const DEFAULT_MIN_COMMANDS: usize = 8;

/// Session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Consuming lines.
    Running,
    /// Termination signal honored; terminal state.
    Terminated,
}

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Minimum dispatched commands before termination is honored.
    pub min_commands: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { min_commands: DEFAULT_MIN_COMMANDS }
    }
}

/// What one dispatched command did.
///
/// Returned to the caller inside [`LineOutcome`]; the driver mirrors it
/// into the log so an operator can watch the message assemble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// A load command appended a decoded character.
    Loaded {
        /// Ciphered character as it arrived on the wire.
        raw: char,
        /// Character after the wheel decoded it.
        plaintext: char,
        /// Bracket-rendered message including the new character.
        message: String,
    },
    /// A rotation command advanced the wheel.
    Rotated {
        /// Signed rotation amount as scanned from the line.
        delta: i32,
    },
}

/// Result of feeding one raw line to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// A command was dispatched; the session keeps running.
    Dispatched(Progress),
    /// A command was dispatched and the session is now terminated.
    Terminated(Progress),
    /// Blank line, noise, or input after termination; nothing changed.
    Ignored,
    /// A line that looked like a command failed to parse.
    Malformed(ParseError),
}

/// Final accounting for a completed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    /// Total commands dispatched, rotations included.
    pub commands_dispatched: usize,
    /// Characters in the decoded message.
    pub message_len: usize,
    /// Bracket-rendered decoded message.
    pub message: String,
}

/// Decoding session.
///
/// Wheel and message are created fresh at construction and mutated only
/// through [`handle_line`](Self::handle_line); there is no way to reach
/// them mutably from outside.
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    config: SessionConfig,
    wheel: CipherWheel,
    message: DecodedMessage,
    commands_dispatched: usize,
}

impl Session {
    /// Create a running session with a fresh wheel and empty message.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            state: SessionState::Running,
            config,
            wheel: CipherWheel::new(),
            message: DecodedMessage::new(),
            commands_dispatched: 0,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Commands dispatched so far, rotations included.
    #[must_use]
    pub fn commands_dispatched(&self) -> usize {
        self.commands_dispatched
    }

    /// Current wheel offset, for diagnostics.
    #[must_use]
    pub fn wheel_offset(&self) -> u8 {
        self.wheel.offset()
    }

    /// Consume one raw line from the transport.
    ///
    /// The line is trimmed here; blank lines and anything arriving after
    /// termination are ignored. Parse failures are reported as
    /// [`LineOutcome::Malformed`] only when the line opens with a known
    /// command tag, otherwise they are dropped as wire noise.
    ///
    /// A parsed command is dispatched and counted before the termination
    /// check, so the terminating rotation is applied like any other.
    pub fn handle_line(&mut self, raw: &str) -> LineOutcome {
        if self.state == SessionState::Terminated {
            return LineOutcome::Ignored;
        }

        let line = raw.trim();
        if line.is_empty() {
            return LineOutcome::Ignored;
        }

        match Command::parse(line) {
            Ok(command) => {
                let progress = self.dispatch(command);
                self.commands_dispatched += 1;

                if is_termination(line) && self.commands_dispatched >= self.config.min_commands {
                    self.state = SessionState::Terminated;
                    LineOutcome::Terminated(progress)
                } else {
                    LineOutcome::Dispatched(progress)
                }
            },
            Err(reason) if has_command_tag(line) => LineOutcome::Malformed(reason),
            Err(_) => LineOutcome::Ignored,
        }
    }

    /// Apply one command to the wheel or the message.
    fn dispatch(&mut self, command: Command) -> Progress {
        match command {
            Command::Load(raw) => {
                let plaintext = self.wheel.decode(raw);
                self.message.append(plaintext);
                Progress::Loaded { raw, plaintext, message: self.message.render() }
            },
            Command::Rotate(delta) => {
                self.wheel.rotate(delta);
                Progress::Rotated { delta }
            },
        }
    }

    /// Final accounting: dispatched count, message length, rendered message.
    #[must_use]
    pub fn report(&self) -> SessionReport {
        SessionReport {
            commands_dispatched: self.commands_dispatched,
            message_len: self.message.len(),
            message: self.message.render(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(SessionConfig::default())
    }

    #[test]
    fn load_decodes_and_accumulates() {
        let mut session = session();

        let outcome = session.handle_line("L,H");
        assert_eq!(
            outcome,
            LineOutcome::Dispatched(Progress::Loaded {
                raw: 'H',
                plaintext: 'H',
                message: "[H]".to_string(),
            })
        );
        assert_eq!(session.commands_dispatched(), 1);
    }

    #[test]
    fn rotation_shifts_subsequent_loads() {
        let mut session = session();

        session.handle_line("M,3");
        let outcome = session.handle_line("L,A");

        assert_eq!(
            outcome,
            LineOutcome::Dispatched(Progress::Loaded {
                raw: 'A',
                plaintext: 'D',
                message: "[D]".to_string(),
            })
        );
        assert_eq!(session.wheel_offset(), 3);
    }

    #[test]
    fn lines_are_trimmed_before_parsing() {
        let mut session = session();
        let outcome = session.handle_line("  L,K \t");
        assert!(matches!(outcome, LineOutcome::Dispatched(Progress::Loaded { raw: 'K', .. })));
    }

    #[test]
    fn blank_lines_are_ignored() {
        let mut session = session();
        assert_eq!(session.handle_line(""), LineOutcome::Ignored);
        assert_eq!(session.handle_line("   \t  "), LineOutcome::Ignored);
        assert_eq!(session.commands_dispatched(), 0);
    }

    #[test]
    fn tagged_garbage_is_malformed() {
        let mut session = session();
        assert_eq!(
            session.handle_line("L"),
            LineOutcome::Malformed(ParseError::LineTooShort { length: 1 })
        );
        assert_eq!(session.handle_line("M,"), LineOutcome::Malformed(ParseError::EmptyPayload));
        assert_eq!(
            session.handle_line("L12"),
            LineOutcome::Malformed(ParseError::MissingSeparator)
        );
        assert_eq!(session.commands_dispatched(), 0);
    }

    #[test]
    fn untagged_garbage_is_noise() {
        let mut session = session();
        assert_eq!(session.handle_line("X,1"), LineOutcome::Ignored);
        assert_eq!(session.handle_line("##garbage##"), LineOutcome::Ignored);
        assert_eq!(session.commands_dispatched(), 0);
    }

    #[test]
    fn early_termination_signal_is_dispatched_but_not_honored() {
        let mut session = session();

        let outcome = session.handle_line("M,-2");

        // The rotation still applies and counts; only the signal is ignored.
        assert_eq!(outcome, LineOutcome::Dispatched(Progress::Rotated { delta: -2 }));
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.wheel_offset(), 24);
    }

    #[test]
    fn termination_honored_at_threshold() {
        let mut session = session();

        // Seven commands, then the signal line is the eighth.
        for _ in 0..7 {
            session.handle_line("L,A");
        }
        let outcome = session.handle_line("M,-1");

        assert_eq!(outcome, LineOutcome::Terminated(Progress::Rotated { delta: -1 }));
        assert_eq!(session.state(), SessionState::Terminated);
        assert_eq!(session.commands_dispatched(), 8);
    }

    #[test]
    fn positive_rotation_never_terminates() {
        let mut session = session();
        for _ in 0..20 {
            assert!(matches!(session.handle_line("M,5"), LineOutcome::Dispatched(_)));
        }
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn malformed_and_blank_lines_do_not_count_toward_threshold() {
        let mut session = Session::new(SessionConfig { min_commands: 2 });

        session.handle_line("L");
        session.handle_line("");
        session.handle_line("noise");
        let outcome = session.handle_line("M,-1");

        // Only one command dispatched so far, signal not honored yet.
        assert_eq!(outcome, LineOutcome::Dispatched(Progress::Rotated { delta: -1 }));
        assert_eq!(session.state(), SessionState::Running);

        let outcome = session.handle_line("m, -4");
        assert_eq!(outcome, LineOutcome::Terminated(Progress::Rotated { delta: 0 }));
    }

    #[test]
    fn input_after_termination_is_ignored() {
        let mut session = Session::new(SessionConfig { min_commands: 1 });
        assert!(matches!(session.handle_line("M,-1"), LineOutcome::Terminated(_)));

        let offset_at_termination = session.wheel_offset();
        assert_eq!(session.handle_line("L,A"), LineOutcome::Ignored);
        assert_eq!(session.handle_line("M,9"), LineOutcome::Ignored);

        assert_eq!(session.commands_dispatched(), 1);
        assert_eq!(session.wheel_offset(), offset_at_termination);
        assert_eq!(session.report().message_len, 0);
    }

    #[test]
    fn report_counts_only_loads_in_message() {
        let mut session = session();
        session.handle_line("L,H");
        session.handle_line("M,3");
        session.handle_line("L,L");

        let report = session.report();
        assert_eq!(report.commands_dispatched, 3);
        assert_eq!(report.message_len, 2);
        assert_eq!(report.message, "[H][O]");
    }

    #[test]
    fn decode_flow_end_to_end() {
        let mut session = session();

        session.handle_line("M,3");
        assert_eq!(session.wheel_offset(), 3);
        session.handle_line("L,A");
        session.handle_line("L,B");
        assert_eq!(session.report().message, "[D][E]");

        // Early signal: dispatched (offset drops to 2) but not honored.
        assert!(matches!(session.handle_line("M,-1"), LineOutcome::Dispatched(_)));
        assert_eq!(session.wheel_offset(), 2);

        session.handle_line("L,C");
        assert_eq!(session.report().message, "[D][E][E]");
        session.handle_line("M,1");
        session.handle_line("L,A");

        // Eighth dispatched command carries the signal and is honored.
        let outcome = session.handle_line("M,-1");
        assert_eq!(outcome, LineOutcome::Terminated(Progress::Rotated { delta: -1 }));

        let report = session.report();
        assert_eq!(report.commands_dispatched, 8);
        assert_eq!(report.message_len, 4);
        assert_eq!(report.message, "[D][E][E][D]");
    }
}
