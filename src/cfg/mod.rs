//! Control-flow graph construction: basic blocks, the named CFG, and
//! dominance information built on top of it.

mod block;
mod dominance;
mod named;

pub use block::{form_blocks, Block};
pub use dominance::{dominator_frontier, dominator_tree, DominatorTree};
pub use named::{edges, NamedCfg};
