use crate::config::Config;
use crate::error::Result;
use crate::ir::Program;
use crate::ssa::to_ssa_on_function;

use super::super::args::Cli;

impl Cli {
    pub(super) fn run_to_ssa(&self, mut program: Program, config: &Config) -> Result<()> {
        for function in &mut program.functions {
            to_ssa_on_function(function, config)?;
        }
        self.print_json(&program)
    }
}
