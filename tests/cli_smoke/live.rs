use serde_json::Value;

use crate::common::{brilkit_cmd, DIAMOND_PROGRAM};

#[test]
fn live_reports_x_live_into_both_arms_but_not_into_entry() {
    let output = brilkit_cmd()
        .arg("live")
        .write_stdin(DIAMOND_PROGRAM)
        .output()
        .expect("live output");
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let out_entry = value[0]["out"]["entry"].as_array().unwrap();
    assert!(out_entry.iter().any(|v| v == "c"));
    let in_l = value[0]["in"]["l"].as_array().unwrap();
    assert!(in_l.is_empty() || !in_l.iter().any(|v| v == "x"));
    let in_merge = value[0]["in"]["merge"].as_array().unwrap();
    assert!(in_merge.iter().any(|v| v == "x"));
}
