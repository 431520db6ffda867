use crate::error::Result;
use crate::ir::Program;
use crate::ssa::destruct_cssa;

use super::super::args::Cli;

impl Cli {
    pub(super) fn run_from_ssa(&self, mut program: Program) -> Result<()> {
        for function in &mut program.functions {
            destruct_cssa(function)?;
        }
        self.print_json(&program)
    }
}
