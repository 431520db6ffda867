//! The JSON program model.
//!
//! This is the boundary the rest of the crate is built around: a `Program` is
//! what a caller hands in (parsed from Bril's JSON IR) and what every pass
//! ultimately hands back. Unknown fields on an instruction round-trip
//! verbatim so a pass that doesn't understand an extension opcode can't
//! silently corrupt it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An opaque Bril type. The core never interprets types beyond the
/// per-variable lookup used for φ-node placement, so we keep whatever JSON
/// shape the producer used (`"int"`, `{"ptr": "int"}`, ...).
pub type Type = serde_json::Value;

/// A whole Bril program: an ordered list of functions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub functions: Vec<Function>,
}

/// A formal argument to a function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arg {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
}

/// A single function: a name, its formals, and a flat instruction stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Arg>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<Type>,
    pub instrs: Vec<Instruction>,
}

/// The three control-transfer opcodes. Every block must end in one of these
/// after normalisation.
pub const TERMINATOR_OPS: [&str; 3] = ["br", "jmp", "ret"];

/// Opcodes with effects the dead-code passes must never discard regardless
/// of whether their `dest` (if any) is read.
const EFFECTFUL_OPS: [&str; 6] = ["print", "store", "free", "speculate", "commit", "guard"];

/// A single instruction or label, as it appears in the JSON IR.
///
/// Bril distinguishes labels from operations by the *absence* of `op`
/// rather than a discriminant tag, so this is modeled as one struct with
/// classification helpers instead of a serde-tagged enum — that keeps
/// unrecognised opcodes round-tripping field-for-field through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<Type>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub funcs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    /// Fields neither this crate nor Bril core recognises. Preserved
    /// untouched so passes that don't understand an extension can't drop it.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Instruction {
    /// A label pseudo-instruction (`{"label": "foo"}`), not an operation.
    #[must_use]
    pub fn is_label(&self) -> bool {
        self.op.is_none()
    }

    /// A real operation, as opposed to a label.
    #[must_use]
    pub fn is_operation(&self) -> bool {
        self.op.is_some()
    }

    #[must_use]
    pub fn opcode(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// One of `br`, `jmp`, `ret` — the opcodes every block must end in.
    #[must_use]
    pub fn is_terminator(&self) -> bool {
        matches!(self.opcode(), Some(op) if TERMINATOR_OPS.contains(&op))
    }

    #[must_use]
    pub fn is_phi(&self) -> bool {
        self.opcode() == Some("phi")
    }

    /// Whether a dead-code pass must treat this instruction as always-live,
    /// independent of whether its `dest` is read. `call` is always
    /// effectful, `dest` or not — a value-producing call may still have a
    /// side effect the caller wants kept even when the result is unused.
    #[must_use]
    pub fn is_effectful(&self) -> bool {
        match self.opcode() {
            Some(op) if EFFECTFUL_OPS.contains(&op) => true,
            Some("call") => true,
            _ => false,
        }
    }

    /// Construct a label pseudo-instruction.
    #[must_use]
    pub fn label(name: impl Into<String>) -> Self {
        Self {
            label: Some(name.into()),
            ..Self::default()
        }
    }

    /// Construct an unconditional jump.
    #[must_use]
    pub fn jmp(target: impl Into<String>) -> Self {
        Self {
            op: Some("jmp".to_string()),
            labels: vec![target.into()],
            ..Self::default()
        }
    }

    /// Construct an `id` copy, the form SSA destruction inserts.
    #[must_use]
    pub fn id(dest: impl Into<String>, ty: Type, src: impl Into<String>) -> Self {
        Self {
            op: Some("id".to_string()),
            dest: Some(dest.into()),
            ty: Some(ty),
            args: vec![src.into()],
            ..Self::default()
        }
    }

    /// Construct a φ-node.
    #[must_use]
    pub fn phi(
        dest: impl Into<String>,
        ty: Type,
        labels: Vec<String>,
        args: Vec<String>,
    ) -> Self {
        Self {
            op: Some("phi".to_string()),
            dest: Some(dest.into()),
            ty: Some(ty),
            args,
            labels,
            ..Self::default()
        }
    }
}
