//! # courtside
//!
//! Command-line front end for the Courtside engines. Inputs are JSON files,
//! the result is JSON on stdout, logs go to stderr.
//!
//! ```text
//! courtside settle   --catalog club.json --draft bill.json
//! courtside party    --draft party.json [--catalog club.json]
//! courtside organize --players pool.json --groups 3 [--filter male-only] [--seed N]
//! ```

mod args;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use courtside_types::{constants, CourtsideError, ErrorKind, Result};
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, Command};

mod exit_codes {
    pub const VALIDATION: u8 = 2;
    pub const NOT_FOUND: u8 = 3;
    pub const EMPTY_POOL: u8 = 4;
    pub const CONFLICT: u8 = 5;
    pub const FORBIDDEN: u8 = 6;
    pub const INTERNAL: u8 = 10;
}

fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    // A second init (tests, embedding) keeps the first subscriber.
    if cli.log_json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = commands::load_config(cli.config.as_deref())?;
    let output = match &cli.command {
        Command::Settle(args) => commands::settle(config, args)?,
        Command::Party(args) => commands::party(config, args)?,
        Command::Organize(args) => commands::organize(&config, args)?,
    };
    let text = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{text}");
    Ok(())
}

fn exit_code(err: &CourtsideError) -> u8 {
    match err.kind() {
        ErrorKind::Validation => exit_codes::VALIDATION,
        ErrorKind::NotFound => exit_codes::NOT_FOUND,
        ErrorKind::EmptyPool => exit_codes::EMPTY_POOL,
        ErrorKind::StateConflict => exit_codes::CONFLICT,
        ErrorKind::Forbidden => exit_codes::FORBIDDEN,
        ErrorKind::Internal => exit_codes::INTERNAL,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);
    tracing::debug!(
        engine = constants::ENGINE_NAME,
        version = constants::VERSION,
        "Starting"
    );

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(kind = %err.kind(), "{err}");
            eprintln!("courtside: {err}");
            ExitCode::from(exit_code(&err))
        }
    }
}
