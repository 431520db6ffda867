use serde_json::json;

use crate::cfg::edges;
use crate::error::Result;

use super::super::args::Cli;
use super::common::normalized_cfg;

impl Cli {
    pub(super) fn run_cfg(&self, program: &crate::ir::Program) -> Result<()> {
        let mut out = Vec::with_capacity(program.functions.len());
        for function in &program.functions {
            let cfg = normalized_cfg(function)?;
            let (pred, succ) = edges(&cfg);
            out.push(json!({"function": function.name, "pred": pred, "succ": succ}));
        }
        self.print_json(&out)
    }
}
