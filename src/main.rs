//! `brilkit` CLI entry point.
//!
//! Parses arguments, configures `tracing` from the verbosity flag, and
//! dispatches to the selected subcommand. All actual work happens in
//! [`brilkit::cli`]; this binary only wires up logging and the process exit
//! code.

use std::error::Error as _;
use std::process;

use clap::Parser;
use tracing::{error, Level};
use tracing_subscriber::{fmt, EnvFilter};

use brilkit::cli::Cli;

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbosity() {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let env_filter = EnvFilter::from_default_env()
        .add_directive(format!("brilkit={log_level}").parse().unwrap());

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.run() {
        error!("{err}");
        let mut cause = err.source();
        while let Some(source) = cause {
            error!("  caused by: {source}");
            cause = source.source();
        }
        process::exit(1);
    }
}
