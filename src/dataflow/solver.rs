//! The generic half of the framework: any analysis that can describe its
//! direction, its meet operator and its per-block transfer function gets a
//! worklist-free fixed-point solver for free.

use indexmap::IndexMap;

use crate::cfg::{edges, NamedCfg};
use crate::config::Config;

/// Which way facts flow through the CFG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `in[b]` is a function of predecessors' `out`; the transfer function
    /// maps `in[b]` to `out[b]`.
    Forward,
    /// `out[b]` is a function of successors' `in`; the transfer function
    /// maps `out[b]` to `in[b]`.
    Backward,
}

/// A monotone dataflow analysis over basic blocks.
///
/// Implementors supply the lattice (`Fact`, with its own `meet`) and the
/// per-block transfer function; [`solve`] drives the iteration to a fixed
/// point.
pub trait Analysis {
    type Fact: Clone + PartialEq;

    fn direction(&self) -> Direction;

    /// Boundary/initial fact assigned to every block before the first
    /// round (commonly the empty set, or "everything" for a must-analysis).
    fn bottom(&self) -> Self::Fact;

    /// Combine facts flowing in from multiple edges (union for a
    /// may-analysis, intersection for a must-analysis).
    fn meet(&self, facts: &[&Self::Fact]) -> Self::Fact;

    /// Map the fact on one side of block `label` to the fact on the other
    /// side, per [`Direction`].
    fn transfer(&self, label: &str, fact: &Self::Fact) -> Self::Fact;
}

/// Run `analysis` over `cfg` to a fixed point, returning `(in_facts,
/// out_facts)` keyed by block label.
#[must_use]
pub fn solve<A: Analysis>(
    analysis: &A,
    cfg: &NamedCfg,
    config: &Config,
) -> (IndexMap<String, A::Fact>, IndexMap<String, A::Fact>) {
    let (pred, succ) = edges(cfg);
    let labels = cfg.labels();

    let mut in_facts: IndexMap<String, A::Fact> =
        labels.iter().map(|l| (l.clone(), analysis.bottom())).collect();
    let mut out_facts: IndexMap<String, A::Fact> =
        labels.iter().map(|l| (l.clone(), analysis.bottom())).collect();

    // Processing predecessors/successors before their dependents converges
    // faster but isn't required for correctness; plain textual order (and
    // its reverse) is what the rest of this crate already computes.
    let order: Vec<&String> = match analysis.direction() {
        Direction::Forward => labels.iter().collect(),
        Direction::Backward => labels.iter().rev().collect(),
    };

    for _ in 0..config.max_dataflow_iterations {
        let mut changed = false;

        for label in &order {
            match analysis.direction() {
                Direction::Forward => {
                    let incoming: Vec<&A::Fact> = pred[*label]
                        .iter()
                        .map(|p| &out_facts[p])
                        .collect();
                    let new_in = analysis.meet(&incoming);
                    let new_out = analysis.transfer(label, &new_in);
                    if new_in != in_facts[*label] {
                        changed = true;
                    }
                    if new_out != out_facts[*label] {
                        changed = true;
                    }
                    in_facts.insert((*label).clone(), new_in);
                    out_facts.insert((*label).clone(), new_out);
                }
                Direction::Backward => {
                    let incoming: Vec<&A::Fact> = succ[*label]
                        .iter()
                        .map(|s| &in_facts[s])
                        .collect();
                    let new_out = analysis.meet(&incoming);
                    let new_in = analysis.transfer(label, &new_out);
                    if new_out != out_facts[*label] {
                        changed = true;
                    }
                    if new_in != in_facts[*label] {
                        changed = true;
                    }
                    out_facts.insert((*label).clone(), new_out);
                    in_facts.insert((*label).clone(), new_in);
                }
            }
        }

        if !changed {
            break;
        }
    }

    (in_facts, out_facts)
}
