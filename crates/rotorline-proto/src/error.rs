//! Parse errors for PRT-7 lines.
//!
//! Every reject carries the structural reason so the session loop can log a
//! useful malformed-packet diagnostic. Whether a reject is *worth* logging
//! is not decided here: that depends on the line's leading tag (see
//! [`crate::has_command_tag`]), not on the error kind.

use thiserror::Error;

/// Result alias for line parsing.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Reasons a trimmed line failed to parse into a [`Command`].
///
/// Structural checks run before tag dispatch, so [`ParseError::UnknownTag`]
/// only surfaces on lines that are otherwise well formed.
///
/// [`Command`]: crate::Command
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Line is shorter than the shortest valid command (`L,A`).
    #[error("line too short: {length} bytes, shortest command is 3")]
    LineTooShort {
        /// Length of the rejected line in bytes.
        length: usize,
    },

    /// No `,` separator anywhere in the line.
    #[error("missing `,` separator")]
    MissingSeparator,

    /// Separator present but nothing follows it.
    #[error("empty payload after separator")]
    EmptyPayload,

    /// First character is not a known tag.
    #[error("unrecognized tag {0:?}")]
    UnknownTag(char),
}
