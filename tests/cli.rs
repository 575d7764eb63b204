//! Runs the built binary, so environment variables only reach the child.

use std::fs;
use std::iter::zip;
use std::path::PathBuf;
use std::process::{Command, Output};

const HEADS_VAR: &str = "CHOMSKY_SINGLE_SYMBOL_HEADS";

fn scratch(test: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("chomsky-cli-{}-{}.txt", std::process::id(), test));
    let _ = fs::remove_file(&path);
    path
}

fn chomsky(args: &[&str], heads_var: Option<&str>) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_chomsky"));
    command.args(args).env_remove(HEADS_VAR).env_remove("RUST_LOG");
    if let Some(value) = heads_var {
        command.env(HEADS_VAR, value);
    }
    command.output().unwrap()
}

#[test]
fn single_symbol_heads_from_environment() {
    let file = scratch("single_symbol_heads_from_environment");
    let path = file.to_str().unwrap();
    assert!(chomsky(&["new", path, "G"], None).status.success());

    let values = vec!["1", "yes", "on", "true", "0", "no", "off", "false"];
    let strict = vec![true, true, true, true, false, false, false, false];

    for (value, strict) in zip(values, strict) {
        let output = chomsky(&["add", path, "AB", "x"], Some(value));
        let stderr = String::from_utf8_lossy(&output.stderr);

        assert!(!stderr.contains("invalid value"), "{}={} was not parsed: {}", HEADS_VAR, value, stderr);
        assert_eq!(output.status.success(), !strict, "{}={}: {}", HEADS_VAR, value, stderr);
        if strict {
            assert!(stderr.contains("single letter"), "{}={}: {}", HEADS_VAR, value, stderr);
        }
    }

    let _ = fs::remove_file(&file);
}

#[test]
fn single_symbol_heads_flag_still_works() {
    let file = scratch("single_symbol_heads_flag_still_works");
    let path = file.to_str().unwrap();
    assert!(chomsky(&["new", path, "G"], None).status.success());

    assert!(!chomsky(&["--single-symbol-heads", "add", path, "AB", "x"], None).status.success());
    assert!(chomsky(&["add", path, "AB", "x"], None).status.success());
    assert!(chomsky(&["--single-symbol-heads", "add", path, "S", "x"], None).status.success());

    let output = chomsky(&["classify", path], None);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("is Type 0 (unrestricted)"));

    let _ = fs::remove_file(&file);
}
