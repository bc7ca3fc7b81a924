//! Raw-line predicates that run outside the parser.
//!
//! These inspect a line without constructing a [`Command`]. The session
//! loop uses them for decisions the parser cannot make: whether a reject
//! deserves an operator-visible report, and whether a dispatched rotation
//! doubles as the end-of-run signal.

use crate::{Command, Tag};

/// Whether the line opens with a recognized command tag.
///
/// A malformed line is only worth reporting when it plausibly was meant
/// as a command; lines starting with anything else (noise, prompts
/// echoed back by the device) are dropped without comment.
#[must_use]
pub fn has_command_tag(line: &str) -> bool {
    line.chars().next().and_then(Tag::from_char).is_some()
}

/// Whether the line is the end-of-run signal.
///
/// A termination line is a rotation line whose payload, after any run of
/// spaces and tabs, starts with `-`. The check is independent of what
/// the rotation scans to: `M, -3` scans to a rotation of zero (the
/// scanner takes no whitespace) yet still terminates, and `M,-x` scans
/// to zero and terminates too. The session dispatches the rotation
/// first, then acts on this signal.
#[must_use]
pub fn is_termination(line: &str) -> bool {
    let Some(first) = line.chars().next() else {
        return false;
    };
    if Tag::from_char(first) != Some(Tag::Rotate) {
        return false;
    }
    let Some(separator) = line.find(Command::SEPARATOR) else {
        return false;
    };
    line[separator + 1..]
        .chars()
        .find(|&c| c != ' ' && c != '\t')
        .is_some_and(|c| c == '-')
}
