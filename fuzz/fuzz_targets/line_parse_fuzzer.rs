//! Fuzz target for parsing hostile wire lines
//!
//! Protect the decoder from arbitrary serial noise (HIGH priority)
//!
//! # Strategy
//!
//! - Raw UTF-8 from libFuzzer: tags, separators, signs and digits in any
//!   order, plus multi-byte characters straddling every position
//! - Covers short lines, missing separators, trailing separators and
//!   huge digit runs that must saturate instead of overflowing
//!
//! # Invariants
//!
//! - `Command::parse` MUST never panic
//! - A successful parse implies the line starts with a command tag
//! - Every rejection MUST be structural: the error names a defect the
//!   line actually has
//! - A termination signal always parses as a non-positive rotation

#![no_main]

use libfuzzer_sys::fuzz_target;
use rotorline_proto::{Command, ParseError, Tag, has_command_tag, is_termination};

fuzz_target!(|line: &str| {
    let parsed = Command::parse(line);

    match &parsed {
        Ok(command) => {
            let first = line.chars().next().expect("parsed line is non-empty");
            assert_eq!(Tag::from_char(first), Some(command.tag()));
            assert!(has_command_tag(line));
            assert!(line.len() >= Command::MIN_LINE_LEN);
            assert!(line.contains(Command::SEPARATOR));
        },
        Err(ParseError::LineTooShort { length }) => {
            assert_eq!(*length, line.len());
            assert!(*length < Command::MIN_LINE_LEN);
        },
        Err(ParseError::MissingSeparator) => {
            assert!(!line.contains(Command::SEPARATOR));
        },
        Err(ParseError::EmptyPayload) => {
            assert!(line.ends_with(Command::SEPARATOR));
        },
        Err(ParseError::UnknownTag(symbol)) => {
            assert!(Tag::from_char(*symbol).is_none());
            assert_eq!(line.chars().next(), Some(*symbol));
        },
    }

    if is_termination(line) {
        assert!(has_command_tag(line));
        match parsed {
            Ok(Command::Rotate(delta)) => assert!(delta <= 0),
            other => panic!("termination signal did not parse as a rotation: {other:?}"),
        }
    }
});
