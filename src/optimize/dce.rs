//! Dead-code elimination: a global trivial pass plus an intra-block
//! killed-store pass, alternated to a fixed point.

use std::collections::{HashMap, HashSet};

use crate::cfg::form_blocks;
use crate::config::Config;
use crate::ir::{Function, Instruction};

/// One round of global trivial DCE: compute the set of variable names used
/// anywhere in `function`'s `args`, then drop every instruction whose
/// `dest` isn't in that set — unless [`Instruction::is_effectful`] says it
/// must be kept regardless (a value-producing `call` may have a side
/// effect the caller wants even when the result is unused).
/// Returns whether anything was removed.
pub fn trivial_dce_function(function: &mut Function) -> bool {
    let used: HashSet<&str> = function
        .instrs
        .iter()
        .flat_map(|instr| instr.args.iter().map(String::as_str))
        .collect();

    let before = function.instrs.len();
    function.instrs.retain(|instr| match &instr.dest {
        Some(dest) => instr.is_effectful() || used.contains(dest.as_str()),
        None => true,
    });
    function.instrs.len() != before
}

/// Loop [`trivial_dce_function`] to its own fixed point (removing one dead
/// store can make its only use disappear, exposing another dead store
/// upstream). Returns whether any round changed anything.
pub fn trivial_dce(function: &mut Function, config: &Config) -> bool {
    let mut changed_overall = false;
    for _ in 0..config.max_dce_iterations {
        if !trivial_dce_function(function) {
            break;
        }
        changed_overall = true;
    }
    changed_overall
}

/// One round of intra-block killed-store elimination: within each block,
/// track the most recent still-live definition of each variable. A use
/// clears that bookkeeping (the definition was read, so it isn't dead); a
/// second definition before any intervening use means the first one was
/// never read and would be dead — unless [`Instruction::is_effectful`]
/// says it must be kept regardless (a shadowed `call` may still matter for
/// its side effect even though its result never got read).
pub fn remove_killed_instructions_pass(function: &mut Function) -> bool {
    let mut changed = false;
    let mut out = Vec::with_capacity(function.instrs.len());

    for block in form_blocks(&function.instrs) {
        let (kept, block_changed) = remove_killed_in_block(&block.instrs);
        changed |= block_changed;
        out.extend(kept);
    }

    function.instrs = out;
    changed
}

fn remove_killed_in_block(instrs: &[Instruction]) -> (Vec<Instruction>, bool) {
    let mut last_def: HashMap<&str, usize> = HashMap::new();
    let mut dead: HashSet<usize> = HashSet::new();

    for (i, instr) in instrs.iter().enumerate() {
        for arg in &instr.args {
            last_def.remove(arg.as_str());
        }
        if let Some(dest) = &instr.dest {
            if let Some(&prev) = last_def.get(dest.as_str()) {
                if !instrs[prev].is_effectful() {
                    dead.insert(prev);
                }
            }
            last_def.insert(dest.as_str(), i);
        }
    }

    let changed = !dead.is_empty();
    let kept = instrs
        .iter()
        .enumerate()
        .filter(|(i, _)| !dead.contains(i))
        .map(|(_, instr)| instr.clone())
        .collect();
    (kept, changed)
}

/// Alternate [`trivial_dce`] and [`remove_killed_instructions_pass`] until
/// neither reports a change (or `config.max_dce_iterations` rounds have
/// run). Returns whether anything changed across the whole run.
pub fn dce_fixed_point(function: &mut Function, config: &Config) -> bool {
    let mut changed_overall = false;
    for _ in 0..config.max_dce_iterations {
        let a = trivial_dce(function, config);
        let b = remove_killed_instructions_pass(function);
        if !a && !b {
            break;
        }
        changed_overall = true;
    }
    changed_overall
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instr(op: &str, dest: Option<&str>, args: Vec<&str>) -> Instruction {
        Instruction {
            op: Some(op.to_string()),
            dest: dest.map(str::to_string),
            args: args.into_iter().map(str::to_string).collect(),
            ..Instruction::default()
        }
    }

    fn func(instrs: Vec<Instruction>) -> Function {
        Function { name: "main".to_string(), args: vec![], return_type: None, instrs }
    }

    #[test]
    fn trivial_dce_drops_unused_dest() {
        let mut f = func(vec![
            instr("const", Some("a"), vec![]),
            instr("const", Some("unused"), vec![]),
            instr("print", None, vec!["a"]),
        ]);
        assert!(trivial_dce_function(&mut f));
        assert_eq!(f.instrs.len(), 2);
        assert!(f.instrs.iter().all(|i| i.dest.as_deref() != Some("unused")));
    }

    #[test]
    fn trivial_dce_chains_to_fixed_point() {
        // `a` feeds only `b`, which is itself unused: one pass only drops
        // `b`; a second pass must then also drop `a`.
        let mut f = func(vec![
            instr("const", Some("a"), vec![]),
            instr("id", Some("b"), vec!["a"]),
        ]);
        let changed = trivial_dce(&mut f, &Config::default());
        assert!(changed);
        assert!(f.instrs.is_empty());
    }

    #[test]
    fn killed_store_elimination_removes_shadowed_def() {
        let mut f = func(vec![
            instr("const", Some("x"), vec![]),
            instr("const", Some("x"), vec![]),
            instr("print", None, vec!["x"]),
        ]);
        assert!(remove_killed_instructions_pass(&mut f));
        assert_eq!(f.instrs.len(), 2);
    }

    #[test]
    fn use_between_defs_prevents_removal() {
        let mut f = func(vec![
            instr("const", Some("x"), vec![]),
            instr("print", None, vec!["x"]),
            instr("const", Some("x"), vec![]),
            instr("print", None, vec!["x"]),
        ]);
        assert!(!remove_killed_instructions_pass(&mut f));
        assert_eq!(f.instrs.len(), 4);
    }

    #[test]
    fn combined_driver_clears_dead_chain_and_killed_store() {
        let mut f = func(vec![
            instr("const", Some("x"), vec![]),
            instr("const", Some("x"), vec![]),
            instr("id", Some("unused"), vec!["x"]),
            instr("print", None, vec!["x"]),
        ]);
        assert!(dce_fixed_point(&mut f, &Config::default()));
        assert_eq!(f.instrs.len(), 2);
    }

    #[test]
    fn trivial_dce_keeps_unused_value_producing_call() {
        let mut f = func(vec![
            instr("call", Some("x"), vec![]),
            instr("const", Some("a"), vec![]),
            instr("print", None, vec!["a"]),
        ]);
        assert!(trivial_dce_function(&mut f));
        assert!(f.instrs.iter().any(|i| i.opcode() == Some("call")));
    }

    #[test]
    fn killed_store_elimination_keeps_shadowed_call() {
        let mut f = func(vec![
            instr("call", Some("x"), vec![]),
            instr("const", Some("x"), vec![]),
            instr("print", None, vec!["x"]),
        ]);
        assert!(!remove_killed_instructions_pass(&mut f));
        assert_eq!(f.instrs.len(), 3);
        assert!(f.instrs.iter().any(|i| i.opcode() == Some("call")));
    }
}
