//! Fuzz target for session dispatch and termination bookkeeping
//!
//! Keep the decoder state machine consistent under arbitrary command
//! interleavings (MEDIUM priority)
//!
//! # Strategy
//!
//! - Structured line sequences: loads with arbitrary symbols, rotations
//!   at boundary magnitudes, padded termination signals, raw garbage and
//!   blank lines, in any order
//! - Termination threshold of 4 so both the early-signal and the honored
//!   path are reached quickly
//!
//! # Invariants
//!
//! - Wheel offset stays below 26 after every line
//! - `commands_dispatched` counts exactly the dispatched commands
//! - Message length equals the number of loaded characters, and the
//!   render is 3 characters per symbol
//! - A termination outcome only occurs at or past the threshold and
//!   carries a non-positive rotation
//! - After termination every further line is ignored and the report is
//!   frozen

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rotorline_core::{LineOutcome, Progress, Session, SessionConfig, SessionState};

const MIN_COMMANDS: usize = 4;

#[derive(Debug, Clone, Arbitrary)]
enum WireLine {
    Load(char),
    Rotate(RotationMagnitude),
    Termination { padding: u8, magnitude: u16 },
    Garbage(Vec<u8>),
    Blank,
}

#[derive(Debug, Clone, Arbitrary)]
enum RotationMagnitude {
    Zero,
    Small(u8),
    MaxI32,
    MinI32,
    Random(i32),
}

fn render(line: &WireLine) -> String {
    match line {
        WireLine::Load(symbol) => format!("L,{symbol}"),
        WireLine::Rotate(magnitude) => {
            let delta = match magnitude {
                RotationMagnitude::Zero => 0,
                RotationMagnitude::Small(small) => i32::from(*small),
                RotationMagnitude::MaxI32 => i32::MAX,
                RotationMagnitude::MinI32 => i32::MIN,
                RotationMagnitude::Random(random) => *random,
            };
            format!("M,{delta}")
        },
        WireLine::Termination { padding, magnitude } => {
            let pad = " ".repeat(usize::from(padding % 4));
            format!("M,{pad}-{magnitude}")
        },
        WireLine::Garbage(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        WireLine::Blank => String::new(),
    }
}

fuzz_target!(|lines: Vec<WireLine>| {
    let mut session = Session::new(SessionConfig { min_commands: MIN_COMMANDS });
    let mut dispatched = 0usize;
    let mut loads = 0usize;
    let mut terminated = false;

    for line in &lines {
        let rendered = render(line);
        let outcome = session.handle_line(&rendered);

        if terminated {
            assert_eq!(outcome, LineOutcome::Ignored);
            continue;
        }

        match outcome {
            LineOutcome::Dispatched(progress) => {
                dispatched += 1;
                if matches!(progress, Progress::Loaded { .. }) {
                    loads += 1;
                }
            },
            LineOutcome::Terminated(progress) => {
                dispatched += 1;
                terminated = true;
                assert!(dispatched >= MIN_COMMANDS);
                assert_eq!(session.state(), SessionState::Terminated);
                match progress {
                    Progress::Rotated { delta } => assert!(delta <= 0),
                    Progress::Loaded { .. } => {
                        panic!("termination signal carried a load")
                    },
                }
            },
            LineOutcome::Ignored | LineOutcome::Malformed(_) => {},
        }

        assert!(session.wheel_offset() < 26);
        assert_eq!(session.commands_dispatched(), dispatched);
    }

    let report = session.report();
    assert_eq!(report.commands_dispatched, dispatched);
    assert_eq!(report.message_len, loads);
    assert_eq!(report.message.chars().count(), loads.saturating_mul(3));
});
