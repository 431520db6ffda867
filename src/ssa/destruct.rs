//! SSA destruction, conventional SSA only: replace each φ
//! with copies inserted in its predecessors, just before their terminator.

use crate::cfg::{form_blocks, NamedCfg};
use crate::error::{Error, Result};
use crate::ir::{Function, Instruction, Type};

/// Replace every φ-node in `function` with `id` copies in its predecessor
/// blocks, in place. Assumes conventional SSA form: all φ operands
/// of a block and the φ destination could be coalesced into one name
/// without introducing interference. That property isn't checked by full
/// interference analysis (out of scope) — only the cheap
/// structural precondition that every φ operand names a block that is an
/// actual predecessor and appears at most once is checked, raising
/// [`Error::NonConventionalSsa`] otherwise.
pub fn destruct_cssa(function: &mut Function) -> Result<()> {
    let mut cfg = NamedCfg::from_blocks(form_blocks(&function.instrs));
    cfg.add_entry();
    cfg.add_terminators();
    cfg.validate(&function.name)?;

    let labels = cfg.labels();
    let mut copies_for: std::collections::HashMap<String, Vec<Instruction>> =
        std::collections::HashMap::new();
    let mut phi_free: std::collections::HashMap<String, Vec<Instruction>> =
        std::collections::HashMap::new();

    for label in &labels {
        let block = cfg.block(label).expect("label came from this cfg");
        let mut kept = Vec::with_capacity(block.instrs.len());
        for instr in &block.instrs {
            if !instr.is_phi() {
                kept.push(instr.clone());
                continue;
            }
            let dest = instr.dest.clone().ok_or_else(|| Error::NonConventionalSsa {
                function: function.name.clone(),
                block: label.clone(),
                dest: String::new(),
            })?;
            let ty = instr.ty.clone().unwrap_or(Type::Null);

            let mut seen = std::collections::HashSet::new();
            for (pred_label, src) in instr.labels.iter().zip(instr.args.iter()) {
                if !seen.insert(pred_label.clone()) {
                    return Err(Error::NonConventionalSsa {
                        function: function.name.clone(),
                        block: label.clone(),
                        dest,
                    });
                }
                copies_for
                    .entry(pred_label.clone())
                    .or_default()
                    .push(Instruction::id(dest.clone(), ty.clone(), src.clone()));
            }
        }
        phi_free.insert(label.clone(), kept);
    }

    for label in &labels {
        let Some(block_instrs) = phi_free.get_mut(label) else { continue };
        let Some(copies) = copies_for.remove(label) else { continue };
        // Insert just before the terminator, preserving φ-source order
        // among copies inserted into the same predecessor.
        let insert_at = if block_instrs.last().is_some_and(Instruction::is_terminator) {
            block_instrs.len() - 1
        } else {
            block_instrs.len()
        };
        for (offset, copy) in copies.into_iter().enumerate() {
            block_instrs.insert(insert_at + offset, copy);
        }
    }

    function.instrs = labels
        .into_iter()
        .flat_map(|label| phi_free.remove(&label).unwrap_or_default())
        .collect();

    Ok(())
}
