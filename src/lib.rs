//! # brilkit
//!
//! Control-flow, dominance, SSA and dataflow toolkit for Bril-style JSON IR.
//!
//! ## Pipeline
//!
//! ```text
//! instrs -> Blocks -> NamedCfg -> DominatorTree -> DominanceFrontier
//!                                     |                  |
//!                                     +--- SSA construction ---+
//!                                                  |
//!                                            SSA destruction
//! ```
//!
//! Every stage operates on one [`ir::Function`] at a time and is
//! synchronous: there is no I/O, threading, or cancellation inside the
//! library. JSON parsing/serialization and the CLI live at the boundary
//! ([`ir::Program`] plus the `cli` module), never inside the analyses
//! themselves.
//!
//! ## Quick start
//!
//! ```
//! use brilkit::cfg::{form_blocks, NamedCfg};
//! use brilkit::ir::{Function, Instruction};
//!
//! let instrs = vec![
//!     Instruction::label("entry"),
//!     Instruction { op: Some("const".into()), dest: Some("a".into()), ..Default::default() },
//!     Instruction { op: Some("print".into()), args: vec!["a".into()], ..Default::default() },
//! ];
//! let mut cfg = NamedCfg::from_blocks(form_blocks(&instrs));
//! cfg.add_entry();
//! cfg.add_terminators();
//! assert_eq!(cfg.entry(), Some("entry"));
//! ```

pub mod cfg;
pub mod config;
pub mod dataflow;
pub mod error;
pub mod ir;
pub mod naming;
pub mod optimize;
pub mod ssa;
pub mod verify;

pub mod cli;

pub use config::Config;
pub use error::{Error, Result};
pub use ir::{Arg, Function, Instruction, Program, Type};
pub use verify::is_ssa;
