use crate::config::Config;
use crate::error::Result;
use crate::ir::Program;
use crate::optimize::dce_fixed_point;

use super::super::args::Cli;

impl Cli {
    pub(super) fn run_dce(&self, mut program: Program, config: &Config) -> Result<()> {
        for function in &mut program.functions {
            dce_fixed_point(function, config);
        }
        self.print_json(&program)
    }
}
