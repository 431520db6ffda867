//! A generic iterative dataflow framework and the live-variable analysis
//! built on top of it.

mod liveness;
mod solver;

pub use liveness::{live_variable_analysis, live_variables, LiveVariableAnalysis};
pub use solver::{solve, Analysis, Direction};
