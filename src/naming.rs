//! Fresh-name minting shared by block normalisation and SSA renaming.
//!
//! Two distinct policies are named in the glossary and must not be
//! conflated: block/entry labels use [`fresh`] (`seed` + smallest `k >= 1`
//! not already taken); SSA renaming uses the dotted `name.k` form local to
//! [`crate::ssa::construct`].

use indexmap::IndexSet;

/// Smallest-`k` fresh name not present in `reserved`, starting at `k = 1`.
#[must_use]
pub fn fresh(seed: &str, reserved: &IndexSet<String>) -> String {
    let mut k = 1usize;
    loop {
        let candidate = format!("{seed}{k}");
        if !reserved.contains(&candidate) {
            return candidate;
        }
        k += 1;
    }
}
