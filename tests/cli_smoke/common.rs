use assert_cmd::Command;

pub(crate) fn brilkit_cmd() -> Command {
    Command::cargo_bin("brilkit").expect("brilkit binary built")
}

/// `entry -> {l, r} -> merge`, `x` assigned on both arms, printed at `merge`.
pub(crate) const DIAMOND_PROGRAM: &str = r#"
{
  "functions": [
    {
      "name": "main",
      "instrs": [
        {"label": "entry"},
        {"op": "const", "dest": "c", "type": "bool", "value": true},
        {"op": "br", "args": ["c"], "labels": ["l", "r"]},
        {"label": "l"},
        {"op": "const", "dest": "x", "type": "int", "value": 1},
        {"op": "jmp", "labels": ["merge"]},
        {"label": "r"},
        {"op": "const", "dest": "x", "type": "int", "value": 2},
        {"op": "jmp", "labels": ["merge"]},
        {"label": "merge"},
        {"op": "print", "args": ["x"]},
        {"op": "ret"}
      ]
    }
  ]
}
"#;

/// A dead-store-then-unused-variable straight line function, for DCE tests.
pub(crate) const DEAD_CODE_PROGRAM: &str = r#"
{
  "functions": [
    {
      "name": "main",
      "instrs": [
        {"op": "const", "dest": "a", "type": "int", "value": 1},
        {"op": "const", "dest": "a", "type": "int", "value": 2},
        {"op": "const", "dest": "b", "type": "int", "value": 3},
        {"op": "print", "args": ["a"]}
      ]
    }
  ]
}
"#;
