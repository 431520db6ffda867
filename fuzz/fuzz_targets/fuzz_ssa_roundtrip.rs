#![no_main]

use brilkit::cfg::{dominator_frontier, dominator_tree, form_blocks, NamedCfg};
use brilkit::config::Config;
use brilkit::dataflow::live_variable_analysis;
use brilkit::ir::Program;
use brilkit::optimize::dce_fixed_point;
use brilkit::ssa::{destruct_cssa, to_ssa_on_function};
use libfuzzer_sys::fuzz_target;

// Drives the full construct -> destruct pipeline, plus dominance and
// liveness, over whatever `Program` the bytes happen to parse into. A
// malformed CFG (a branch to an undefined label) is a structured error, not
// a panic; this target's only job is confirming that holds for arbitrary
// input, including CFGs with unreachable blocks, back edges into the
// entry, and functions with no instructions at all.
fuzz_target!(|data: &[u8]| {
    let Ok(program) = serde_json::from_slice::<Program>(data) else { return };
    let config = Config::default();

    for function in &program.functions {
        let mut cfg = NamedCfg::from_blocks(form_blocks(&function.instrs));
        cfg.add_entry();
        cfg.add_terminators();
        if cfg.validate(&function.name).is_err() {
            continue;
        }
        let tree = dominator_tree(&cfg);
        let _ = dominator_frontier(&cfg, &tree);
        let _ = live_variable_analysis(&cfg, &config);

        let mut ssa_function = function.clone();
        if to_ssa_on_function(&mut ssa_function, &config).is_ok() {
            let _ = destruct_cssa(&mut ssa_function);
        }

        let mut dce_function = function.clone();
        dce_fixed_point(&mut dce_function, &config);
    }
});
