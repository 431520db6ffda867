use predicates::str::contains;
use serde_json::Value;

use crate::common::{brilkit_cmd, DIAMOND_PROGRAM};

#[test]
fn blocks_partitions_diamond_into_four_blocks() {
    let output = brilkit_cmd()
        .arg("blocks")
        .write_stdin(DIAMOND_PROGRAM)
        .output()
        .expect("blocks output");
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let blocks = value[0]["blocks"].as_array().expect("blocks array");
    assert_eq!(blocks.len(), 4);
    assert_eq!(value[0]["entry"], Value::String("entry".into()));
}

#[test]
fn cfg_reports_diamond_edges() {
    let output = brilkit_cmd()
        .arg("cfg")
        .write_stdin(DIAMOND_PROGRAM)
        .output()
        .expect("cfg output");
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let succ = &value[0]["succ"];
    assert_eq!(succ["entry"], serde_json::json!(["l", "r"]));
    let pred = &value[0]["pred"];
    let merge_pred = pred["merge"].as_array().unwrap();
    assert_eq!(merge_pred.len(), 2);
}

#[test]
fn dom_reports_entry_as_immediate_dominator_of_merge() {
    let output = brilkit_cmd()
        .arg("dom")
        .write_stdin(DIAMOND_PROGRAM)
        .output()
        .expect("dom output");
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value[0]["idom"]["merge"], Value::String("entry".into()));
    assert_eq!(value[0]["idom"]["l"], Value::String("entry".into()));
}

#[test]
fn df_places_merge_in_each_arms_frontier() {
    let output = brilkit_cmd()
        .arg("df")
        .write_stdin(DIAMOND_PROGRAM)
        .output()
        .expect("df output");
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let l_frontier = value[0]["frontier"]["l"].as_array().unwrap();
    assert!(l_frontier.iter().any(|v| v == "merge"));
}

#[test]
fn malformed_cfg_reports_error_and_nonzero_exit() {
    let program = r#"{"functions": [{"name": "main", "instrs": [
        {"label": "entry"}, {"op": "jmp", "labels": ["nowhere"]}
    ]}]}"#;
    brilkit_cmd()
        .arg("cfg")
        .write_stdin(program)
        .assert()
        .failure()
        .stderr(contains("nowhere"));
}
