use serde_json::json;

use crate::config::Config;
use crate::dataflow::live_variable_analysis;
use crate::error::Result;

use super::super::args::Cli;
use super::common::normalized_cfg;

impl Cli {
    pub(super) fn run_live(&self, program: &crate::ir::Program, config: &Config) -> Result<()> {
        let mut out = Vec::with_capacity(program.functions.len());
        for function in &program.functions {
            let cfg = normalized_cfg(function)?;
            let analysis = live_variable_analysis(&cfg, config);
            let block_in: serde_json::Map<String, serde_json::Value> = analysis
                .block_in
                .into_iter()
                .map(|(label, set)| (label, json!(set.into_iter().collect::<Vec<_>>())))
                .collect();
            let block_out: serde_json::Map<String, serde_json::Value> = analysis
                .block_out
                .into_iter()
                .map(|(label, set)| (label, json!(set.into_iter().collect::<Vec<_>>())))
                .collect();
            out.push(json!({"function": function.name, "in": block_in, "out": block_out}));
        }
        self.print_json(&out)
    }
}
