#![no_main]

use brilkit::ir::Program;
use libfuzzer_sys::fuzz_target;

// The JSON program boundary is the only untrusted-input surface this crate
// has. Parsing arbitrary bytes must never panic, regardless of whether they
// happen to decode to valid JSON or a well-formed `Program`.
fuzz_target!(|data: &[u8]| {
    let _ = serde_json::from_slice::<Program>(data);
});
