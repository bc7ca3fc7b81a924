//! PRT-7 decoder console.
//!
//! # Usage
//!
//! ```bash
//! # Decode a live transmission from a configured serial device node
//! rotorline /dev/ttyUSB0
//!
//! # Replay a captured transmission
//! rotorline - < capture.txt
//! ```
//!
//! Started with no argument, the console asks for the port identifier
//! interactively. Per-command progress goes to the log; the prompt, the
//! banner, and the final report go to stdout.

use std::{
    fs::File,
    io::{self, Read, Write},
    process,
};

use clap::Parser;
use rotorline_core::{
    DEFAULT_MAX_LINE_LEN, DEFAULT_MIN_COMMANDS, DriverConfig, IoLineTransport, Session,
    SessionConfig, SessionDriver, SessionReport,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// PRT-7 rotor-cipher protocol decoder
#[derive(Parser, Debug)]
#[command(name = "rotorline")]
#[command(about = "Decodes PRT-7 rotor-cipher transmissions from a serial line")]
#[command(version)]
struct Args {
    /// Port to read from: a serial device node, or `-` for stdin
    ///
    /// If not provided, the console asks for one interactively.
    port: Option<String>,

    /// Dispatched commands required before the termination signal is honored
    #[arg(long, default_value_t = DEFAULT_MIN_COMMANDS)]
    min_commands: usize,

    /// Longest accepted line in bytes, terminator included
    #[arg(long, default_value_t = DEFAULT_MAX_LINE_LEN)]
    max_line_len: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    print_banner();

    let port = match args.port {
        Some(port) => port,
        None => prompt_for_port()?,
    };

    tracing::info!(port = %port, "Opening transport");

    let reader: Box<dyn Read> = if port == "-" {
        Box::new(io::stdin())
    } else {
        match File::open(&port) {
            Ok(device) => Box::new(device),
            Err(e) => {
                tracing::error!(port = %port, error = %e, "Could not open port");
                print_open_failure_guidance(&port);
                process::exit(1);
            },
        }
    };

    tracing::info!("Connection established, waiting for packet transmission");

    let transport = IoLineTransport::new(reader);
    let session = Session::new(SessionConfig { min_commands: args.min_commands });
    let mut driver =
        SessionDriver::new(transport, session, DriverConfig { max_line_len: args.max_line_len });

    match driver.run() {
        Ok(report) => {
            print_report(&report);
            Ok(())
        },
        Err(e) => {
            tracing::error!(error = %e, "Session aborted");
            process::exit(1);
        },
    }
}

#[allow(clippy::print_stdout)]
fn print_banner() {
    println!("========================================");
    println!("  PRT-7 Protocol Decoder v{}", env!("CARGO_PKG_VERSION"));
    println!("  Rotary transmission, line protocol");
    println!("========================================");
    println!();
}

/// Ask for the port identifier until a non-empty answer arrives.
#[allow(clippy::print_stdout)]
fn prompt_for_port() -> io::Result<String> {
    let stdin = io::stdin();
    loop {
        print!("Enter the port identifier (e.g. /dev/ttyUSB0): ");
        io::stdout().flush()?;

        let mut answer = String::new();
        if stdin.read_line(&mut answer)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no port identifier given"));
        }
        let answer = answer.trim();
        if !answer.is_empty() {
            return Ok(answer.to_string());
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_open_failure_guidance(port: &str) {
    println!();
    println!("ERROR: could not open {port}.");
    println!("Check that:");
    println!("  1. the device is physically connected");
    println!("  2. the port identifier is correct");
    println!("  3. no other program holds the port");
    println!("  4. the USB serial drivers are installed");
}

fn format_report(report: &SessionReport) -> String {
    format!(
        "---\n\
         Transmission complete.\n\
         Commands processed: {}\n\
         Message length: {} characters\n\
         \n\
         DECODED MESSAGE:\n\
         >>> {} <<<\n\
         ---",
        report.commands_dispatched, report.message_len, report.message
    )
}

#[allow(clippy::print_stdout)]
fn print_report(report: &SessionReport) {
    println!();
    println!("{}", format_report(report));
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn report_block_shows_counts_and_message() {
        let report = SessionReport {
            commands_dispatched: 9,
            message_len: 4,
            message: "[H][O][L][A]".to_string(),
        };

        insta::assert_snapshot!(format_report(&report), @r"
        ---
        Transmission complete.
        Commands processed: 9
        Message length: 4 characters

        DECODED MESSAGE:
        >>> [H][O][L][A] <<<
        ---
        ");
    }

    #[test]
    fn report_block_for_empty_message() {
        let report =
            SessionReport { commands_dispatched: 8, message_len: 0, message: String::new() };

        let block = format_report(&report);
        assert!(block.contains("Message length: 0 characters"));
        assert!(block.contains(">>>  <<<"));
    }

    #[test]
    fn args_have_expected_defaults() {
        let args = Args::try_parse_from(["rotorline"]).unwrap();
        assert_eq!(args.port, None);
        assert_eq!(args.min_commands, 8);
        assert_eq!(args.max_line_len, 128);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn args_accept_overrides() {
        let args = Args::try_parse_from([
            "rotorline",
            "-",
            "--min-commands",
            "3",
            "--max-line-len",
            "64",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.port.as_deref(), Some("-"));
        assert_eq!(args.min_commands, 3);
        assert_eq!(args.max_line_len, 64);
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }
}
