use serde_json::Value;

use crate::common::{brilkit_cmd, DEAD_CODE_PROGRAM};

#[test]
fn dce_removes_killed_store_and_unused_variable() {
    let output = brilkit_cmd()
        .arg("dce")
        .write_stdin(DEAD_CODE_PROGRAM)
        .output()
        .expect("dce output");
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let instrs = value["functions"][0]["instrs"].as_array().unwrap();
    // only the second `a` assignment and the `print` survive.
    assert_eq!(instrs.len(), 2);
    assert_eq!(instrs[0]["value"], Value::from(2));
    assert_eq!(instrs[1]["op"], Value::String("print".into()));
}
