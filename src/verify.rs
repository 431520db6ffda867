//! Sanity checks over an already-built [`Program`], independent of any one
//! pass: "is this SSA" shouldn't need to re-run construction to answer.

use std::collections::HashSet;

use crate::ir::Program;

/// Whether every function in `program` satisfies SSA's defining property:
/// each variable (`dest`) is assigned at most once within its function.
/// This is a necessary, not sufficient, check — it says nothing about
/// dominance (a φ-free reassignment inside a loop body would also fail
/// this check, as it should).
#[must_use]
pub fn is_ssa(program: &Program) -> bool {
    program.functions.iter().all(is_ssa_function)
}

fn is_ssa_function(function: &crate::ir::Function) -> bool {
    let mut seen = HashSet::new();
    for instr in &function.instrs {
        if let Some(dest) = &instr.dest {
            if !seen.insert(dest.as_str()) {
                return false;
            }
        }
    }
    true
}
