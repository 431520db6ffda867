//! CLI command execution: one module per subcommand, dispatched here.

mod blocks;
mod cfg;
mod common;
mod dce;
mod df;
mod dom;
mod from_ssa;
mod is_ssa;
mod live;
mod to_ssa;

use std::io::Read as _;

use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::ir::Program;

use super::args::{Cli, Command};

impl Cli {
    /// Execute the selected CLI subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the program can't be read or parsed, if a
    /// function's CFG is malformed (a branch to an undefined label), or if
    /// SSA destruction is asked to destruct a non-conventional function.
    pub fn run(&self) -> Result<()> {
        let program = self.read_program()?;
        let config = self.config();
        match &self.command {
            Command::Blocks => self.run_blocks(&program),
            Command::Cfg => self.run_cfg(&program),
            Command::Dom => self.run_dom(&program),
            Command::Df => self.run_df(&program),
            Command::ToSsa => self.run_to_ssa(program, &config),
            Command::FromSsa => self.run_from_ssa(program),
            Command::Live => self.run_live(&program, &config),
            Command::Dce => self.run_dce(program, &config),
            Command::IsSsa => self.run_is_ssa(&program),
        }
    }

    fn read_program(&self) -> Result<Program> {
        let raw = match &self.input {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };
        debug!(bytes = raw.len(), "read program");
        let program: Program = serde_json::from_str(&raw)?;
        debug!(functions = program.functions.len(), "parsed program");
        Ok(program)
    }

    fn config(&self) -> Config {
        Config {
            strict_undefined_vars: self.strict_undefined_vars,
            ..Config::default()
        }
    }
}
