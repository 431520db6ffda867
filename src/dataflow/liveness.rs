//! Live-variable analysis: a backward, union dataflow instantiated on top
//! of the generic solver. Facts are dense bitsets over the function's
//! variables rather than hash sets, since every block's fact is recomputed
//! every round until the fixed point and the variable domain is small and
//! known up front.

use bitvec::prelude::*;
use indexmap::{IndexMap, IndexSet};

use crate::cfg::NamedCfg;
use crate::config::Config;

use super::solver::{solve, Analysis, Direction};

struct LiveVariables {
    domain: IndexSet<String>,
    def: IndexMap<String, BitVec>,
    uses: IndexMap<String, BitVec>,
}

impl LiveVariables {
    fn new(cfg: &NamedCfg) -> Self {
        let mut domain = IndexSet::new();
        for (_, block) in cfg.iter() {
            for instr in &block.instrs {
                if let Some(dest) = &instr.dest {
                    domain.insert(dest.clone());
                }
                for arg in &instr.args {
                    domain.insert(arg.clone());
                }
            }
        }

        let mut def = IndexMap::new();
        let mut uses = IndexMap::new();
        for (label, block) in cfg.iter() {
            let mut block_def = bitvec![0; domain.len()];
            let mut block_use = bitvec![0; domain.len()];
            // A use only counts if nothing earlier in this same block
            // already redefined the variable (the later local definition
            // shadows whatever reached the block from outside).
            let mut locally_defined: IndexSet<&str> = IndexSet::new();
            for instr in &block.instrs {
                if !instr.is_operation() {
                    continue;
                }
                for arg in &instr.args {
                    if locally_defined.contains(arg.as_str()) {
                        continue;
                    }
                    if let Some(idx) = domain.get_index_of(arg) {
                        block_use.set(idx, true);
                    }
                }
                if let Some(dest) = &instr.dest {
                    locally_defined.insert(dest.as_str());
                    if let Some(idx) = domain.get_index_of(dest) {
                        block_def.set(idx, true);
                    }
                }
            }
            def.insert(label.clone(), block_def);
            uses.insert(label.clone(), block_use);
        }

        Self { domain, def, uses }
    }

    fn to_names(&self, bits: &BitVec) -> IndexSet<String> {
        bits.iter()
            .enumerate()
            .filter_map(|(i, bit)| {
                (*bit).then(|| self.domain.get_index(i).expect("index within domain").clone())
            })
            .collect()
    }
}

impl Analysis for LiveVariables {
    type Fact = BitVec;

    fn direction(&self) -> Direction {
        Direction::Backward
    }

    fn bottom(&self) -> Self::Fact {
        bitvec![0; self.domain.len()]
    }

    fn meet(&self, facts: &[&Self::Fact]) -> Self::Fact {
        let mut out = self.bottom();
        for fact in facts {
            for i in 0..out.len() {
                if fact[i] {
                    out.set(i, true);
                }
            }
        }
        out
    }

    fn transfer(&self, label: &str, out: &Self::Fact) -> Self::Fact {
        let mut result = out.clone();
        let def = &self.def[label];
        let uses = &self.uses[label];
        for i in 0..result.len() {
            if def[i] {
                result.set(i, false);
            }
        }
        for i in 0..result.len() {
            if uses[i] {
                result.set(i, true);
            }
        }
        result
    }
}

/// Compute live-in and live-out variable sets for every block of `cfg`
/// (backward, union dataflow): `in[b] = (out[b] - def[b]) ∪ use[b]`,
/// `out[b] = ∪ in[s]` over successors `s`.
#[must_use]
pub fn live_variables(
    cfg: &NamedCfg,
    config: &Config,
) -> (IndexMap<String, IndexSet<String>>, IndexMap<String, IndexSet<String>>) {
    let analysis = LiveVariables::new(cfg);
    let (in_bits, out_bits) = solve(&analysis, cfg, config);

    let live_in = in_bits.iter().map(|(l, b)| (l.clone(), analysis.to_names(b))).collect();
    let live_out = out_bits.iter().map(|(l, b)| (l.clone(), analysis.to_names(b))).collect();
    (live_in, live_out)
}

/// The result of [`live_variable_analysis`]: named, rather than positional,
/// so a CLI driver (or any other consumer) doesn't have to remember which
/// side of the tuple is `in` and which is `out`.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveVariableAnalysis {
    pub block_in: IndexMap<String, IndexSet<String>>,
    pub block_out: IndexMap<String, IndexSet<String>>,
}

/// [`live_variables`], wrapped in a named struct. This is the entry point
/// named in the core interface; `live_variables` remains available for
/// callers that just want the bare tuple.
#[must_use]
pub fn live_variable_analysis(cfg: &NamedCfg, config: &Config) -> LiveVariableAnalysis {
    let (block_in, block_out) = live_variables(cfg, config);
    LiveVariableAnalysis { block_in, block_out }
}
