//! SSA construction: φ-placement at dominance frontiers
//! followed by stack-based renaming driven by a dominator-tree traversal.

use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};

use crate::cfg::{dominator_frontier, dominator_tree, edges, form_blocks, NamedCfg};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::ir::{Function, Instruction, Type};

/// Convert `function` to SSA form in place: insert φ-nodes at dominance
/// frontiers and rename every variable so it is assigned exactly once.
pub fn to_ssa_on_function(function: &mut Function, config: &Config) -> Result<()> {
    let mut cfg = NamedCfg::from_blocks(form_blocks(&function.instrs));
    cfg.add_entry();
    cfg.add_terminators();
    cfg.validate(&function.name)?;

    let (_, succ) = edges(&cfg);
    let tree = dominator_tree(&cfg);
    let frontier = dominator_frontier(&cfg, &tree);

    // Step 1: defs[v] = blocks that define v. Formal arguments are defined
    // in the entry block.
    let mut defs: IndexMap<String, IndexSet<String>> = IndexMap::new();
    let mut vars: IndexSet<String> = IndexSet::new();
    let mut type_map: IndexMap<String, Type> = IndexMap::new();

    if let Some(entry) = tree.entry() {
        for arg in &function.args {
            vars.insert(arg.name.clone());
            defs.entry(arg.name.clone()).or_default().insert(entry.to_string());
            type_map.insert(arg.name.clone(), arg.ty.clone());
        }
    }

    for (label, block) in cfg.iter() {
        for instr in &block.instrs {
            if let Some(dest) = &instr.dest {
                vars.insert(dest.clone());
                defs.entry(dest.clone()).or_default().insert(label.clone());
                if let Some(ty) = &instr.ty {
                    type_map.entry(dest.clone()).or_insert_with(|| ty.clone());
                }
            }
        }
    }

    // Step 3: iterated dominance frontier φ-placement, via an explicit
    // worklist rather than growing `defs[v]` while iterating over it.
    let mut phis: IndexMap<String, IndexSet<String>> = IndexMap::new();
    for v in &vars {
        let Some(def_blocks) = defs.get(v) else { continue };
        let mut worklist: VecDeque<String> = def_blocks.iter().cloned().collect();
        let mut considered: IndexSet<String> = def_blocks.clone();
        while let Some(b) = worklist.pop_front() {
            let Some(df) = frontier.get(&b) else { continue };
            for f in df {
                phis.entry(f.clone()).or_default().insert(v.clone());
                if considered.insert(f.clone()) {
                    worklist.push_back(f.clone());
                }
            }
        }
    }

    // Step 4: rename. Pre-order DFS over the dominator tree, explicit stack
    // so deep CFGs don't recurse.
    let mut stacks: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut counters: IndexMap<String, usize> = IndexMap::new();
    for arg in &function.args {
        stacks.entry(arg.name.clone()).or_default().push(arg.name.clone());
    }
    for v in &vars {
        stacks.entry(v.clone()).or_default();
        counters.entry(v.clone()).or_insert(0);
    }

    let mut phi_dest: IndexMap<String, IndexMap<String, String>> = IndexMap::new();
    let mut phi_args: IndexMap<String, IndexMap<String, Vec<(String, String)>>> = IndexMap::new();
    let mut renamed: IndexMap<String, Vec<Instruction>> = IndexMap::new();

    enum Frame {
        Enter(String),
        Exit(IndexMap<String, usize>),
    }

    if let Some(entry) = tree.entry().map(str::to_string) {
        let mut stack = vec![Frame::Enter(entry)];
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(b) => {
                    let snapshot: IndexMap<String, usize> =
                        stacks.iter().map(|(v, s)| (v.clone(), s.len())).collect();

                    if let Some(needed) = phis.get(&b) {
                        for v in needed {
                            let name = mint(v, &mut stacks, &mut counters);
                            phi_dest.entry(b.clone()).or_default().insert(v.clone(), name);
                        }
                    }

                    let mut out = Vec::new();
                    let mut undefined = None;
                    if let Some(block) = cfg.block(&b) {
                        for instr in &block.instrs {
                            let mut instr = instr.clone();
                            for arg in &mut instr.args {
                                match stacks.get(arg).and_then(|s| s.last()) {
                                    Some(top) => *arg = top.clone(),
                                    // No reaching definition. By default
                                    // the original name is propagated
                                    // unchanged; in strict mode this is a
                                    // hard error instead.
                                    None if config.strict_undefined_vars => {
                                        undefined.get_or_insert_with(|| arg.clone());
                                    }
                                    None => {}
                                }
                            }
                            if let Some(dest) = instr.dest.clone() {
                                instr.dest = Some(mint(&dest, &mut stacks, &mut counters));
                            }
                            out.push(instr);
                        }
                    }
                    if let Some(var) = undefined {
                        return Err(Error::UndefinedVariable {
                            function: function.name.clone(),
                            block: b,
                            var,
                        });
                    }
                    renamed.insert(b.clone(), out);

                    if let Some(targets) = succ.get(&b) {
                        for s in targets {
                            let Some(needed) = phis.get(s) else { continue };
                            for v in needed {
                                if let Some(top) = stacks.get(v).and_then(|st| st.last()) {
                                    phi_args
                                        .entry(s.clone())
                                        .or_default()
                                        .entry(v.clone())
                                        .or_default()
                                        .push((b.clone(), top.clone()));
                                }
                            }
                        }
                    }

                    stack.push(Frame::Exit(snapshot));
                    for child in tree.children(&b).iter().rev() {
                        stack.push(Frame::Enter(child.clone()));
                    }
                }
                Frame::Exit(snapshot) => {
                    for (v, len) in snapshot {
                        if let Some(s) = stacks.get_mut(&v) {
                            s.truncate(len);
                        }
                    }
                }
            }
        }
    }

    // Step 5: emit φs — prepend to each block, after its label if present,
    // dropping any with fewer than two incoming pairs (degenerate).
    for (label, vars_here) in &phis {
        let Some(block_instrs) = renamed.get_mut(label) else { continue };
        let mut to_prepend = Vec::new();
        for v in vars_here {
            let Some(args_for_v) = phi_args.get(label).and_then(|m| m.get(v)) else { continue };
            if args_for_v.len() < 2 {
                continue;
            }
            let dest = phi_dest[label][v].clone();
            let ty = type_map.get(v).cloned().unwrap_or(Type::Null);
            let labels = args_for_v.iter().map(|(pred, _)| pred.clone()).collect();
            let args = args_for_v.iter().map(|(_, name)| name.clone()).collect();
            to_prepend.push(Instruction::phi(dest, ty, labels, args));
        }
        let insert_at = usize::from(block_instrs.first().is_some_and(Instruction::is_label));
        for (offset, phi) in to_prepend.into_iter().enumerate() {
            block_instrs.insert(insert_at + offset, phi);
        }
    }

    // Unreachable blocks never enter the dominator-tree traversal (they're
    // simply omitted by dominance analyses); pass their original
    // instructions through untouched rather than discarding them.
    function.instrs = cfg
        .labels()
        .into_iter()
        .flat_map(|label| match renamed.remove(&label) {
            Some(instrs) => instrs,
            None => cfg.block(&label).map(|b| b.instrs.clone()).unwrap_or_default(),
        })
        .collect();

    Ok(())
}

fn mint(
    var: &str,
    stacks: &mut IndexMap<String, Vec<String>>,
    counters: &mut IndexMap<String, usize>,
) -> String {
    let k = counters.entry(var.to_string()).or_insert(0);
    let name = format!("{var}.{k}");
    *k += 1;
    stacks.entry(var.to_string()).or_default().push(name.clone());
    name
}
