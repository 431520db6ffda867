use serde_json::json;

use crate::cfg::{dominator_frontier, dominator_tree};
use crate::error::Result;

use super::super::args::Cli;
use super::common::normalized_cfg;

impl Cli {
    pub(super) fn run_df(&self, program: &crate::ir::Program) -> Result<()> {
        let mut out = Vec::with_capacity(program.functions.len());
        for function in &program.functions {
            let cfg = normalized_cfg(function)?;
            let tree = dominator_tree(&cfg);
            let frontier = dominator_frontier(&cfg, &tree);
            let frontier: serde_json::Map<String, serde_json::Value> = frontier
                .into_iter()
                .map(|(label, set)| (label, json!(set.into_iter().collect::<Vec<_>>())))
                .collect();
            out.push(json!({"function": function.name, "frontier": frontier}));
        }
        self.print_json(&out)
    }
}
