//! Naming and normalisation: turn a list of blocks into a
//! named CFG with a guaranteed-predecessor-free entry and a terminator on
//! every block.

use indexmap::{IndexMap, IndexSet};

use crate::error::{Error, Result};
use crate::ir::Instruction;
use crate::naming::fresh;

use super::block::Block;

/// An ordered mapping from block label to block. Order matches the textual
/// order of the function's blocks, so "fall through" for a block missing a
/// terminator targets the next entry in this map. The first entry is the
/// entry block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedCfg {
    blocks: IndexMap<String, Block>,
}

impl NamedCfg {
    /// Assign each block a label (`block_map`). Blocks that already start
    /// with a label keep it (the label instruction itself stays as the
    /// block's header); blocks that don't get a fresh name minted from the
    /// `b` seed, disjoint from every label already in use.
    #[must_use]
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut reserved: IndexSet<String> =
            blocks.iter().filter_map(Block::label).map(str::to_string).collect();
        let mut named = IndexMap::with_capacity(blocks.len());
        for block in blocks {
            let label = match block.label() {
                Some(existing) => existing.to_string(),
                None => {
                    let name = fresh("b", &reserved);
                    reserved.insert(name.clone());
                    name
                }
            };
            named.insert(label, block);
        }
        Self { blocks: named }
    }

    #[must_use]
    pub fn entry(&self) -> Option<&str> {
        self.blocks.first().map(|(label, _)| label.as_str())
    }

    #[must_use]
    pub fn block(&self, label: &str) -> Option<&Block> {
        self.blocks.get(label)
    }

    pub fn block_mut(&mut self, label: &str) -> Option<&mut Block> {
        self.blocks.get_mut(label)
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.blocks.contains_key(label)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Block)> {
        self.blocks.iter()
    }

    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.blocks.keys().cloned().collect()
    }

    /// Ensure the entry block has no predecessors (`add_entry`). If any
    /// block's terminator targets the current entry (a back-edge into it),
    /// prepend a fresh predecessor-free entry that jumps to the old one.
    /// Otherwise the CFG is left unchanged.
    pub fn add_entry(&mut self) {
        let Some(old_entry) = self.entry().map(str::to_string) else {
            return;
        };

        let targets_entry = self.blocks.values().any(|block| {
            block
                .terminator()
                .is_some_and(|term| term.labels.contains(&old_entry))
        });
        if !targets_entry {
            return;
        }

        let mut reserved: IndexSet<String> = self.blocks.keys().cloned().collect();
        let new_entry = fresh("entry", &reserved);
        reserved.insert(new_entry.clone());

        let mut new_blocks = IndexMap::with_capacity(self.blocks.len() + 1);
        new_blocks.insert(
            new_entry,
            Block { instrs: vec![Instruction::jmp(old_entry)] },
        );
        new_blocks.extend(std::mem::take(&mut self.blocks));
        self.blocks = new_blocks;
    }

    /// Append a terminator to every block missing one (`add_terminators`):
    /// `jmp` to the next block in insertion order, or `ret` if there is no
    /// next block.
    pub fn add_terminators(&mut self) {
        let order: Vec<String> = self.blocks.keys().cloned().collect();
        for (i, label) in order.iter().enumerate() {
            let needs_terminator = self.blocks[label].terminator().is_none();
            if !needs_terminator {
                continue;
            }
            let term = match order.get(i + 1) {
                Some(next) => Instruction::jmp(next.clone()),
                None => Instruction { op: Some("ret".to_string()), ..Instruction::default() },
            };
            self.blocks[label].instrs.push(term);
        }
    }

    /// Concatenate blocks in insertion order into a flat instruction list
    /// (`reassemble`).
    #[must_use]
    pub fn reassemble(&self) -> Vec<Instruction> {
        self.blocks.values().flat_map(|b| b.instrs.clone()).collect()
    }

    /// Reject a CFG where a `br`/`jmp` targets a label that names no block
    /// in this function (fatal, signals a bug in the producer).
    pub fn validate(&self, function: &str) -> Result<()> {
        for block in self.blocks.values() {
            let Some(term) = block.terminator() else { continue };
            if term.opcode() == Some("ret") {
                continue;
            }
            for label in &term.labels {
                if !self.contains(label) {
                    return Err(Error::MalformedCfg {
                        function: function.to_string(),
                        label: label.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Derive predecessor/successor maps from each block's terminator.
/// `succ[b]` comes from `labels` on a `jmp`/`br` terminator (empty for
/// `ret` or a missing terminator); `pred` is the inverse. Every block in
/// the CFG appears as a key, even if unreferenced.
#[must_use]
pub fn edges(cfg: &NamedCfg) -> (IndexMap<String, Vec<String>>, IndexMap<String, Vec<String>>) {
    let mut succ: IndexMap<String, Vec<String>> =
        cfg.iter().map(|(label, _)| (label.clone(), Vec::new())).collect();
    let mut pred: IndexMap<String, Vec<String>> =
        cfg.iter().map(|(label, _)| (label.clone(), Vec::new())).collect();

    for (label, block) in cfg.iter() {
        let targets = match block.terminator() {
            Some(term) if term.opcode() == Some("ret") => Vec::new(),
            Some(term) => term.labels.clone(),
            None => Vec::new(),
        };
        for target in &targets {
            if let Some(preds) = pred.get_mut(target) {
                preds.push(label.clone());
            }
        }
        succ.insert(label.clone(), targets);
    }

    (pred, succ)
}
