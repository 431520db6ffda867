use serde_json::json;

use crate::cfg::dominator_tree;
use crate::error::Result;

use super::super::args::Cli;
use super::common::normalized_cfg;

impl Cli {
    pub(super) fn run_dom(&self, program: &crate::ir::Program) -> Result<()> {
        let mut out = Vec::with_capacity(program.functions.len());
        for function in &program.functions {
            let cfg = normalized_cfg(function)?;
            let tree = dominator_tree(&cfg);
            let idom: serde_json::Map<String, serde_json::Value> = cfg
                .labels()
                .into_iter()
                .filter(|label| tree.is_reachable(label))
                .map(|label| {
                    let idom_of = tree.idom(&label).map(str::to_string);
                    (label, json!(idom_of))
                })
                .collect();
            let children: serde_json::Map<String, serde_json::Value> = cfg
                .labels()
                .into_iter()
                .filter(|label| tree.is_reachable(label))
                .map(|label| {
                    let kids = tree.children(&label).to_vec();
                    (label, json!(kids))
                })
                .collect();
            out.push(json!({
                "function": function.name,
                "entry": tree.entry(),
                "idom": idom,
                "children": children,
            }));
        }
        self.print_json(&out)
    }
}
