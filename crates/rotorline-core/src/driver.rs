//! Session loop driver.
//!
//! Pumps lines out of a transport and into the session until the
//! termination signal is honored or the transport is lost, mirroring
//! each dispatched command into the log so an operator can watch the
//! message assemble. All protocol decisions stay in [`Session`]; the
//! driver only moves lines and logs outcomes.

use crate::{
    error::SessionError,
    session::{LineOutcome, Progress, Session, SessionReport},
    transport::LineTransport,
};

/// Read buffer size per line, terminator slot included.
pub const DEFAULT_MAX_LINE_LEN: usize = 128;

/// Driver configuration.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Longest line accepted from the transport.
    pub max_line_len: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self { max_line_len: DEFAULT_MAX_LINE_LEN }
    }
}

/// Owns a transport and a session and runs the decode loop.
#[derive(Debug)]
pub struct SessionDriver<T> {
    transport: T,
    session: Session,
    config: DriverConfig,
}

impl<T: LineTransport> SessionDriver<T> {
    /// Pair a transport with a session.
    pub fn new(transport: T, session: Session, config: DriverConfig) -> Self {
        Self { transport, session, config }
    }

    /// The driven session, for inspection after a run.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the decode loop to completion.
    ///
    /// Blocks on the transport between lines. Malformed packets and
    /// noise are logged and skipped; nothing per-line is fatal.
    ///
    /// # Errors
    ///
    /// - [`SessionError::TransportUnavailable`] if the transport is not
    ///   usable before the first read; the session never starts.
    /// - [`SessionError::Transport`] if the transport is lost before the
    ///   termination signal is honored.
    pub fn run(&mut self) -> Result<SessionReport, SessionError> {
        if !self.transport.is_usable() {
            return Err(SessionError::TransportUnavailable);
        }

        loop {
            let line = match self.transport.next_line(self.config.max_line_len) {
                Ok(Some(line)) => line,
                Ok(None) => continue,
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        commands = self.session.commands_dispatched(),
                        "Transport lost before termination signal"
                    );
                    return Err(e.into());
                },
            };

            match self.session.handle_line(&line) {
                LineOutcome::Dispatched(progress) => log_progress(&progress),
                LineOutcome::Terminated(progress) => {
                    log_progress(&progress);
                    let report = self.session.report();
                    tracing::info!(
                        commands = report.commands_dispatched,
                        "Termination signal detected, transmission complete"
                    );
                    return Ok(report);
                },
                LineOutcome::Malformed(reason) => {
                    tracing::warn!(line = %line, %reason, "Malformed packet dropped");
                },
                LineOutcome::Ignored => {},
            }
        }
    }
}

fn log_progress(progress: &Progress) {
    match progress {
        Progress::Loaded { raw, plaintext, message } => {
            tracing::info!(
                raw = %raw,
                plaintext = %plaintext,
                message = %message,
                "Character decoded"
            );
        },
        Progress::Rotated { delta } => {
            tracing::info!(delta, "Wheel rotated");
        },
    }
}
