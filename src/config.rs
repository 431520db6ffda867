//! Runtime knobs shared across passes.
//!
//! Every pass takes a `&Config` rather than reaching for globals, so a CLI
//! invocation and a library embedder configure the same switches the same
//! way.

/// Tunables for the analysis and transformation passes.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// When `true`, a use of a variable with no reaching definition on any
    /// path is a hard error ([`crate::Error::UndefinedVariable`]) instead of
    /// the default of propagating the original variable name into the
    /// renamed instruction unchanged.
    pub strict_undefined_vars: bool,

    /// Upper bound on rounds the dataflow fixed-point solver will run before
    /// giving up and returning its current approximation. A well-formed
    /// monotone analysis over a finite CFG always converges in at most
    /// `#blocks` rounds; this is a backstop against a misbehaving custom
    /// [`crate::dataflow::Analysis`] impl, not a limit this crate's own
    /// analyses are expected to hit.
    pub max_dataflow_iterations: usize,

    /// Upper bound on rounds the combined DCE driver (global trivial DCE +
    /// intra-block killed-store elimination) will alternate before stopping,
    /// even if the last round still reported a change.
    pub max_dce_iterations: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict_undefined_vars: false,
            max_dataflow_iterations: 10_000,
            max_dce_iterations: 10_000,
        }
    }
}
