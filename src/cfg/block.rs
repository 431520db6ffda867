//! Block formation: partition a flat instruction stream into
//! basic blocks.

use crate::ir::Instruction;

/// A maximal straight-line instruction sequence. Invariants upheld by
/// construction: a label, if present, is the first instruction; at most one
/// terminator, and if present it is the last instruction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub instrs: Vec<Instruction>,
}

impl Block {
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.instrs.first().filter(|i| i.is_label()).and_then(|i| i.label.as_deref())
    }

    #[must_use]
    pub fn terminator(&self) -> Option<&Instruction> {
        self.instrs.last().filter(|i| i.is_terminator())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instrs.is_empty()
    }
}

/// Linearly partition `instrs` into basic blocks.
///
/// A label starts a new block (flushing whatever was accumulated); a
/// terminator ends the current block; anything else just appends. The
/// concatenation of the returned blocks' instructions equals `instrs`.
#[must_use]
pub fn form_blocks(instrs: &[Instruction]) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for instr in instrs {
        if instr.is_label() {
            if !current.is_empty() {
                blocks.push(Block { instrs: std::mem::take(&mut current) });
            }
            current.push(instr.clone());
            continue;
        }

        current.push(instr.clone());

        if instr.is_terminator() {
            blocks.push(Block { instrs: std::mem::take(&mut current) });
        }
    }

    if !current.is_empty() {
        blocks.push(Block { instrs: current });
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(name: &str) -> Instruction {
        Instruction::label(name)
    }

    fn op(name: &str, dest: Option<&str>) -> Instruction {
        Instruction {
            op: Some(name.to_string()),
            dest: dest.map(str::to_string),
            ..Instruction::default()
        }
    }

    #[test]
    fn concatenation_round_trips() {
        let instrs = vec![
            label("entry"),
            op("const", Some("a")),
            op("const", Some("b")),
            Instruction::jmp("exit"),
            label("exit"),
            op("ret", None),
        ];
        let blocks = form_blocks(&instrs);
        let flat: Vec<Instruction> = blocks.iter().flat_map(|b| b.instrs.clone()).collect();
        assert_eq!(flat, instrs);
    }

    #[test]
    fn straight_line_is_one_block() {
        let instrs = vec![op("const", Some("a")), op("const", Some("b"))];
        let blocks = form_blocks(&instrs);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].terminator().is_none());
    }

    #[test]
    fn label_always_starts_a_block() {
        let instrs = vec![
            op("const", Some("a")),
            label("l"),
            op("const", Some("b")),
        ];
        let blocks = form_blocks(&instrs);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].label(), Some("l"));
    }

    #[test]
    fn terminator_is_last_and_flushes() {
        let instrs = vec![
            op("const", Some("a")),
            Instruction::jmp("l"),
            op("const", Some("b")),
        ];
        let blocks = form_blocks(&instrs);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].terminator().is_some());
        assert!(blocks[1].terminator().is_none());
    }
}
