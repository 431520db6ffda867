//! Error types returned by the library.
//!
//! Most public APIs return [`crate::Result`], which uses [`Error`] as the
//! error type. The core assumes well-formed input produced by an upstream
//! parser: these variants only cover the handful of cases that
//! are genuinely fatal — a malformed CFG, a non-conventional SSA function
//! fed to the destructor — plus the JSON/IO failures that occur at the
//! program boundary.

use thiserror::Error;

/// Convenient result alias for the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top level error surfaced by the library APIs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Failed to parse a program from JSON.
    #[error("failed to parse program json: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O failure while reading a program or writing results.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A `br`/`jmp` targets a label that does not name any block in the
    /// function. Signals a bug in the producer of the IR, not a condition
    /// analyses should try to route around.
    #[error("function {function:?}: branch to undefined label {label:?}")]
    MalformedCfg { function: String, label: String },

    /// SSA destruction was asked to destruct a function whose φ-nodes are
    /// not known to be conventional-SSA-safe (coalescable into a single
    /// name without introducing interference). Full interference checking is out of scope.
    #[error(
        "function {function:?}: cannot destruct non-conventional SSA (phi {dest:?} in block {block:?})"
    )]
    NonConventionalSsa {
        function: String,
        block: String,
        dest: String,
    },

    /// Strict mode (see [`crate::config::Config::strict_undefined_vars`])
    /// rejected a use of a variable that has no reaching definition on any
    /// path, instead of propagating the original name.
    #[error("function {function:?}: use of undefined variable {var:?} in block {block:?}")]
    UndefinedVariable {
        function: String,
        block: String,
        var: String,
    },
}
