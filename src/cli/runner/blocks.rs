use serde_json::json;

use crate::error::Result;

use super::super::args::Cli;
use super::common::normalized_cfg;

impl Cli {
    pub(super) fn run_blocks(&self, program: &crate::ir::Program) -> Result<()> {
        let mut out = Vec::with_capacity(program.functions.len());
        for function in &program.functions {
            let cfg = normalized_cfg(function)?;
            let blocks: Vec<_> = cfg
                .iter()
                .map(|(label, block)| json!({"label": label, "instrs": block.instrs}))
                .collect();
            out.push(json!({"function": function.name, "entry": cfg.entry(), "blocks": blocks}));
        }
        self.print_json(&out)
    }
}
