//! SSA construction and destruction.

mod construct;
mod destruct;

pub use construct::to_ssa_on_function;
pub use destruct::destruct_cssa;
