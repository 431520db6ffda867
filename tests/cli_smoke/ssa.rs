use serde_json::Value;

use crate::common::{brilkit_cmd, DIAMOND_PROGRAM};

#[test]
fn to_ssa_inserts_a_single_phi_with_two_operands() {
    let output = brilkit_cmd()
        .arg("to-ssa")
        .write_stdin(DIAMOND_PROGRAM)
        .output()
        .expect("to-ssa output");
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let instrs = value["functions"][0]["instrs"].as_array().unwrap();
    let phis: Vec<_> = instrs
        .iter()
        .filter(|i| i["op"] == Value::String("phi".into()))
        .collect();
    assert_eq!(phis.len(), 1);
    assert_eq!(phis[0]["args"].as_array().unwrap().len(), 2);
}

#[test]
fn is_ssa_reports_false_before_and_true_after_to_ssa() {
    brilkit_cmd()
        .arg("is-ssa")
        .write_stdin(DIAMOND_PROGRAM)
        .assert()
        .success()
        .stdout("false\n");

    let ssa_json = brilkit_cmd()
        .arg("to-ssa")
        .write_stdin(DIAMOND_PROGRAM)
        .output()
        .expect("to-ssa output")
        .stdout;

    brilkit_cmd()
        .arg("is-ssa")
        .write_stdin(ssa_json)
        .assert()
        .success()
        .stdout("true\n");
}

#[test]
fn from_ssa_round_trip_removes_phis_and_stays_well_formed() {
    let ssa_json = brilkit_cmd()
        .arg("to-ssa")
        .write_stdin(DIAMOND_PROGRAM)
        .output()
        .expect("to-ssa output")
        .stdout;

    let output = brilkit_cmd()
        .arg("from-ssa")
        .write_stdin(ssa_json)
        .output()
        .expect("from-ssa output");
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let instrs = value["functions"][0]["instrs"].as_array().unwrap();
    assert!(!instrs.iter().any(|i| i["op"] == Value::String("phi".into())));
    // one `id` copy per predecessor of the merge block.
    let copies = instrs.iter().filter(|i| i["op"] == Value::String("id".into())).count();
    assert_eq!(copies, 2);
}
