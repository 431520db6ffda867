use std::io::Write as _;

use crate::error::Result;
use crate::ir::Program;
use crate::verify::is_ssa;

use super::super::args::Cli;

impl Cli {
    pub(super) fn run_is_ssa(&self, program: &Program) -> Result<()> {
        let ok = is_ssa(program);
        self.write_stdout(|out| writeln!(out, "{ok}"))
    }
}
