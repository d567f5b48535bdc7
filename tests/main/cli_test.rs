//! CLI contract tests.

use std::fs;
use std::path::PathBuf;

fn main_source() -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src/main.rs");
    match fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => panic!("main source should load from {}: {err}", path.display()),
    }
}

#[test]
fn main_defines_primary_subcommands() {
    let source = main_source();
    assert!(source.contains("Serve"));
    assert!(source.contains("Triage"));
    assert!(source.contains("Modes"));
}

#[test]
fn triage_never_builds_a_network_provider() {
    let source = main_source();
    let triage = source
        .split("fn handle_triage")
        .nth(1)
        .and_then(|rest| rest.split("fn handle_modes").next())
        .expect("handle_triage present");
    assert!(!triage.contains("build_provider"));
}
