//! Thin CLI drivers over the library's core passes.
//!
//! Each subcommand reads a [`crate::ir::Program`] as JSON (from a file or
//! standard input), runs exactly one pipeline stage, and writes JSON (or, for
//! `is-ssa`, a single boolean line) to standard output. The library itself
//! never touches stdin/stdout; this module is the only place that does.

mod args;
mod runner;

pub use args::Cli;
