//! Wire format for the PRT-7 line protocol.
//!
//! PRT-7 is a one-way, line-oriented ASCII protocol: the sender transmits
//! one command per newline-terminated line, and the receiver decodes them
//! against a rotating substitution cipher. There are exactly two commands:
//!
//! ```text
//! L,<char>   load one ciphered symbol (only the first payload char counts)
//! M,<int>    rotate the cipher wheel by a signed decimal amount
//! ```
//!
//! Tags are case-insensitive. A rotation line whose payload starts with `-`
//! (after optional spaces/tabs) doubles as the session-termination signal;
//! that check is purely syntactic and lives in [`is_termination`],
//! independent of whether the line parses.
//!
//! # Components
//!
//! - [`Tag`]: the two wire tags, the protocol's opcode set
//! - [`Command`]: parsed command value, consumed once at the dispatch site
//! - [`ParseError`]: typed reasons a line failed to parse
//! - [`has_command_tag`] / [`is_termination`]: raw-line classifiers used by
//!   the session loop for diagnostics and shutdown
//!
//! This crate is pure data and parsing. Dispatch semantics (what a command
//! does to the decoder state) live in `rotorline-core`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod command;
mod error;
mod line;
mod tag;

pub use command::Command;
pub use error::{ParseError, Result};
pub use line::{has_command_tag, is_termination};
pub use tag::Tag;
