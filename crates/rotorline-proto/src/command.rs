//! Command type and line parsing.
//!
//! A [`Command`] is the decoded form of one wire line. Parsing is strict
//! about structure (length, separator, payload presence) and deliberately
//! loose about payload content: a load keeps only the first payload
//! character, and a rotation amount is scanned left to right, stopping at
//! the first non-digit instead of rejecting it. Senders in the field pad
//! and mangle payloads; the receiver's job is to keep decoding.

use crate::{
    Tag,
    error::{ParseError, Result},
};

/// One decoded protocol instruction.
///
/// Constructed by [`Command::parse`] from a trimmed line and consumed
/// exactly once by the session's dispatch step. The enum is closed by the
/// protocol definition: dispatch matches exhaustively over these two
/// variants with no default arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Load one ciphered symbol into the decoded message.
    Load(char),
    /// Rotate the cipher wheel by a signed amount.
    Rotate(i32),
}

impl Command {
    /// Shortest parseable line in bytes (`L,A`).
    pub const MIN_LINE_LEN: usize = 3;

    /// Separator between tag and payload.
    pub const SEPARATOR: char = ',';

    /// Parse one trimmed line into a command.
    ///
    /// The input must already be stripped of surrounding whitespace and
    /// line terminators; the session loop trims before calling and never
    /// forwards empty lines. The payload (everything after the first `,`)
    /// is taken verbatim with no further trimming:
    ///
    /// - `L`/`l`: the command carries the payload's **first** character;
    ///   trailing payload characters are ignored, not an error.
    /// - `M`/`m`: the payload is scanned as a signed decimal integer:
    ///   optional leading `+` or `-`, then digits up to the first
    ///   non-digit. No digits at all yields a rotation of zero; a
    ///   rotation line is never rejected for its payload content.
    ///
    /// Structural checks run before tag dispatch, so an unknown tag is
    /// only reported for lines that are otherwise well formed.
    ///
    /// # Errors
    ///
    /// - [`ParseError::LineTooShort`] if the line is under 3 bytes
    /// - [`ParseError::MissingSeparator`] if there is no `,`
    /// - [`ParseError::EmptyPayload`] if the `,` is the final character
    /// - [`ParseError::UnknownTag`] if the first character is not a tag
    pub fn parse(line: &str) -> Result<Self> {
        if line.len() < Self::MIN_LINE_LEN {
            return Err(ParseError::LineTooShort { length: line.len() });
        }

        let separator = line.find(Self::SEPARATOR).ok_or(ParseError::MissingSeparator)?;
        let payload = &line[separator + 1..];
        if payload.is_empty() {
            return Err(ParseError::EmptyPayload);
        }

        // Length was checked above, so a first character exists.
        let tag_char =
            line.chars().next().ok_or(ParseError::LineTooShort { length: line.len() })?;

        match Tag::from_char(tag_char) {
            Some(Tag::Load) => {
                let raw = payload.chars().next().ok_or(ParseError::EmptyPayload)?;
                Ok(Self::Load(raw))
            },
            Some(Tag::Rotate) => Ok(Self::Rotate(scan_rotation(payload))),
            None => Err(ParseError::UnknownTag(tag_char)),
        }
    }

    /// Wire tag for this command.
    #[must_use]
    pub fn tag(&self) -> Tag {
        match self {
            Self::Load(_) => Tag::Load,
            Self::Rotate(_) => Tag::Rotate,
        }
    }
}

/// Scan a rotation payload as a signed decimal integer.
///
/// Mirrors the wire convention: one optional sign, then digits, stopping
/// silently at the first non-digit. `"-"`, `"x"` and `""` all scan to 0;
/// `"12abc"` scans to 12. The scanner does not skip whitespace, so
/// `" -3"` scans to 0 even though such a line still counts as a
/// termination signal (that check skips spaces, this one does not).
///
/// Magnitudes beyond `i32` saturate; the wheel reduces modulo the
/// alphabet afterwards, so the clamp is unobservable in decoded output.
fn scan_rotation(payload: &str) -> i32 {
    let mut chars = payload.chars().peekable();

    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        },
        Some('+') => {
            chars.next();
            false
        },
        _ => false,
    };

    let mut magnitude: i64 = 0;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        magnitude = magnitude.saturating_mul(10).saturating_add(i64::from(digit));
        chars.next();
    }

    let clamped = magnitude.min(i64::from(i32::MAX)) as i32;
    if negative { -clamped } else { clamped }
}
