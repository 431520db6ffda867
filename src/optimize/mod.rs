//! Dead-code elimination passes.

mod dce;

pub use dce::{dce_fixed_point, remove_killed_instructions_pass, trivial_dce, trivial_dce_function};
