use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Control-flow, dominance, SSA and dataflow toolkit for Bril-style JSON IR.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read the program from this file instead of standard input.
    #[arg(long, global = true)]
    pub(super) input: Option<PathBuf>,

    /// Emit compact JSON (no pretty-printing).
    #[arg(long, global = true)]
    pub(super) json_compact: bool,

    /// Reject a use with no reaching definition on any path, instead of the
    /// default of propagating the original variable name unchanged.
    #[arg(long, global = true)]
    pub(super) strict_undefined_vars: bool,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub(super) verbose: u8,

    #[command(subcommand)]
    pub(super) command: Command,
}

impl Cli {
    /// The verbosity count supplied on the command line, used by `main.rs`
    /// to pick a `tracing` level before any subcommand runs.
    #[must_use]
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

#[derive(Debug, Subcommand)]
pub(super) enum Command {
    /// Partition each function into basic blocks and print the named CFG.
    Blocks,
    /// Print predecessor/successor edges for each function's CFG.
    Cfg,
    /// Print the immediate-dominator tree for each function.
    Dom,
    /// Print the dominance frontier for each function.
    Df,
    /// Convert every function to SSA form and print the resulting program.
    ToSsa,
    /// Destruct conventional SSA (materialise phis as copies) and print the
    /// resulting program.
    FromSsa,
    /// Print live-in/live-out variable sets for each block of each function.
    Live,
    /// Run trivial DCE and killed-store elimination to a fixed point and
    /// print the resulting program.
    Dce,
    /// Print whether the program satisfies SSA's single-assignment property.
    IsSsa,
}
