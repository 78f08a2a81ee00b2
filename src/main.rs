//! `enigma`: encrypts and decrypts messages with a configured rotor machine.
//!
//! **Usage:**
//! ```text
//! enigma [-v...] <CONFIG> [INPUT] [OUTPUT]
//! ```
//!
//! Reads messages from `INPUT` (default: standard input) and writes the
//! converted text to `OUTPUT` (default: standard output). Exits with
//! status 1 on the first error.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{info, Level};

use enigma::{MachineConfig, Session};

/// Rotor cipher machine simulator.
#[derive(Parser)]
#[command(
    name = "enigma",
    about = "Encrypt and decrypt messages with a rotor cipher machine"
)]
struct Args {
    /// Machine configuration file.
    config: PathBuf,

    /// Message file (default: standard input).
    input: Option<PathBuf>,

    /// Output file (default: standard output).
    output: Option<PathBuf>,

    /// Log more on standard error (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let config = fs::read_to_string(&args.config)
        .with_context(|| format!("could not open {}", args.config.display()))?;
    let machine = MachineConfig::parse(&config)
        .and_then(MachineConfig::build)
        .with_context(|| format!("bad configuration {}", args.config.display()))?;
    info!(
        slots = machine.num_rotors(),
        pawls = machine.num_pawls(),
        rotors = machine.rotors().len(),
        "machine configured"
    );

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("could not open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let mut output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("could not open {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let mut session = Session::new(machine);
    for (number, line) in input.lines().enumerate() {
        let line = line.context("could not read input")?;
        if let Some(converted) = session
            .process_line(&line)
            .with_context(|| format!("input line {}", number + 1))?
        {
            writeln!(output, "{}", converted)?;
        }
    }
    output.flush()?;

    info!(messages = session.converted(), "input processed");
    Ok(())
}
